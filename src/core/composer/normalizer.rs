use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use super::payload::Payload;

/// Situation a payload describes; drives template choice.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Scenario {
    Created,
    Scheduled,
    Deferred,
    Failed,
    ClarificationNeeded,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Created,
        Scenario::Scheduled,
        Scenario::Deferred,
        Scenario::Failed,
        Scenario::ClarificationNeeded,
    ];

    /// Map an upstream status string onto a scenario. Case and surrounding
    /// whitespace are ignored; unknown statuses (e.g. `"success"`) yield `None`.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.trim().to_ascii_lowercase().as_str() {
            "clarification_needed" => Some(Self::ClarificationNeeded),
            "failed" | "error" => Some(Self::Failed),
            "deferred" => Some(Self::Deferred),
            "scheduled" => Some(Self::Scheduled),
            "created" | "new" | "ready" => Some(Self::Created),
            _ => None,
        }
    }
}

const FAILURE_KEYS: [&str; 3] = ["error", "failure", "reason"];

/// Classify a payload. Total: every payload maps to exactly one scenario.
pub fn normalize(payload: &Payload) -> Scenario {
    let scenario = classify(payload);
    debug!(scenario = %scenario, "composer.normalize");
    scenario
}

fn classify(payload: &Payload) -> Scenario {
    let status = &payload.execution_status;
    let task = &payload.task;

    if status.flag("requires_clarification") || task.flag("requires_clarification") {
        return Scenario::ClarificationNeeded;
    }

    let explicit = status
        .text("status")
        .or_else(|| task.text("status"))
        .or_else(|| payload.routing.text("status"));
    if let Some(scenario) = explicit.as_deref().and_then(Scenario::from_status) {
        return scenario;
    }

    if status.truthy("deferred") {
        return Scenario::Deferred;
    }

    if FAILURE_KEYS.iter().any(|key| status.truthy(key)) {
        return Scenario::Failed;
    }

    if task.nested("parameters").text("datetime").is_some() || task.text("datetime").is_some() {
        return Scenario::Scheduled;
    }

    Scenario::Created
}
