use std::str::FromStr;

use tracing::debug;

use super::payload::Payload;
use super::response::ConfidenceLevel;
use super::trust::TrustBlock;

/// Scale for scores a trust block vouches for: `<=0.4` low, `<=0.7` medium.
pub fn classify_verified(score: f64) -> ConfidenceLevel {
    if !score.is_finite() {
        ConfidenceLevel::Medium
    } else if score <= 0.4 {
        ConfidenceLevel::Low
    } else if score <= 0.7 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::High
    }
}

/// Scale for unverified raw scores: `>=0.8` high, `>=0.5` medium.
pub fn classify_raw(score: f64) -> ConfidenceLevel {
    if !score.is_finite() {
        ConfidenceLevel::Medium
    } else if score >= 0.8 {
        ConfidenceLevel::High
    } else if score >= 0.5 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

pub fn resolve_confidence(payload: &Payload) -> ConfidenceLevel {
    let (level, source) = resolve(payload);
    debug!(level = %level, source, "composer.confidence");
    level
}

fn resolve(payload: &Payload) -> (ConfidenceLevel, &'static str) {
    if let Some(score) = TrustBlock::from_payload(payload).and_then(|t| t.verified_confidence()) {
        return (classify_verified(score), "trust");
    }

    let explicit = payload
        .execution_status
        .text("confidence_level")
        .or_else(|| payload.summary.text("confidence_level"))
        .and_then(|level| ConfidenceLevel::from_str(level.trim()).ok());
    if let Some(level) = explicit {
        return (level, "explicit");
    }

    let raw = payload
        .execution_status
        .numeric("confidence")
        .or_else(|| payload.summary.numeric("confidence"))
        .or_else(|| payload.task.numeric("confidence"))
        .or_else(|| payload.routing.numeric("confidence"));
    if let Some(score) = raw {
        return (classify_raw(score), "raw");
    }

    (ConfidenceLevel::Medium, "default")
}
