use sha2::{Digest, Sha256};
use tracing::debug;

use super::payload::Payload;
use super::trust::TrustBlock;

pub const DEFAULT_TRACE_PREFIX: &str = "trace";

/// Hex digits of the payload digest kept in a derived id.
const DIGEST_HEX_LEN: usize = 16;

/// How derived trace ids are built when the payload names none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOptions<'a> {
    pub prefix: &'a str,
    /// Caller-supplied salt. `None` keeps ids a pure function of the payload.
    pub seed: Option<&'a str>,
}

impl Default for TraceOptions<'_> {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_TRACE_PREFIX,
            seed: None,
        }
    }
}

impl<'a> TraceOptions<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix, seed: None }
    }

    pub fn with_seed(mut self, seed: Option<&'a str>) -> Self {
        self.seed = seed;
        self
    }

    pub fn fallback_for(&self, payload: &Payload) -> String {
        self.fallback_for_bytes(&payload.canonical_bytes())
    }

    pub fn fallback_for_bytes(&self, bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        if let Some(seed) = self.seed {
            hasher.update(seed.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(bytes);
        let digest = hex::encode(hasher.finalize());
        format!("{}-{}", self.prefix, &digest[..DIGEST_HEX_LEN])
    }
}

/// Trace id named by the payload itself, strongest source first.
pub fn explicit_trace_id(payload: &Payload) -> Option<String> {
    let verified = TrustBlock::from_payload(payload)
        .and_then(|trust| trust.trace_ref)
        .or_else(|| payload.routing.text("verified_trace_id"))
        .or_else(|| payload.execution_status.text("verified_trace_id"));
    if verified.is_some() {
        return verified;
    }

    payload
        .execution_status
        .text("trace_id")
        .or_else(|| payload.task.first_text(&["trace_id", "id"]))
        .or_else(|| payload.routing.text("trace_id"))
        .or_else(|| payload.summary.text("trace_id"))
}

pub fn resolve_trace_id(payload: &Payload, options: &TraceOptions<'_>) -> String {
    match explicit_trace_id(payload) {
        Some(id) => id,
        None => {
            let id = options.fallback_for(payload);
            debug!(trace_id = %id, seeded = options.seed.is_some(), "composer.trace.derived");
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        Payload::from_value(&value).unwrap()
    }

    #[test]
    fn trust_reference_wins() {
        let p = payload(json!({
            "execution_status": {"trust": {"trace_ref": "trusted-xyz"}, "trace_id": "es"},
            "routing": {"verified_trace_id": "rv", "trace_id": "rt"},
            "task": {"trace_id": "tk"}
        }));
        assert_eq!(
            resolve_trace_id(&p, &TraceOptions::default()),
            "trusted-xyz"
        );
    }

    #[test]
    fn numeric_trust_reference_falls_through() {
        let p = payload(json!({
            "execution_status": {"trust": {"trace_ref": 123}, "trace_id": "es"}
        }));
        assert_eq!(explicit_trace_id(&p).as_deref(), Some("es"));
    }

    #[test]
    fn verified_ids_beat_plain_ids() {
        let p = payload(json!({
            "execution_status": {"verified_trace_id": "es-v", "trace_id": "es"},
        }));
        assert_eq!(explicit_trace_id(&p).as_deref(), Some("es-v"));

        let p = payload(json!({
            "routing": {"verified_trace_id": "rt-v"},
            "execution_status": {"verified_trace_id": "es-v"},
        }));
        assert_eq!(explicit_trace_id(&p).as_deref(), Some("rt-v"));
    }

    #[test]
    fn plain_id_order() {
        let p = payload(json!({
            "task": {"id": 17, "trace_id": ""},
            "routing": {"trace_id": "rt"},
            "summary": {"trace_id": "sm"}
        }));
        assert_eq!(explicit_trace_id(&p).as_deref(), Some("17"));

        let p = payload(json!({"summary": {"trace_id": "sm"}}));
        assert_eq!(explicit_trace_id(&p).as_deref(), Some("sm"));
    }

    #[test]
    fn derived_id_is_stable_and_prefixed() {
        let p = payload(json!({"task": {"task_type": "note"}}));
        let opts = TraceOptions::default();
        let a = resolve_trace_id(&p, &opts);
        let b = resolve_trace_id(&p.clone(), &opts);
        assert_eq!(a, b);
        assert!(a.starts_with("trace-"));
        assert_eq!(a.len(), "trace-".len() + DIGEST_HEX_LEN);
    }

    #[test]
    fn derived_id_changes_with_payload() {
        let opts = TraceOptions::default();
        let a = resolve_trace_id(&payload(json!({"task": {"a": 1}})), &opts);
        let b = resolve_trace_id(&payload(json!({"task": {"a": 2}})), &opts);
        assert_ne!(a, b);
    }

    #[test]
    fn seed_salts_the_digest() {
        let p = payload(json!({}));
        let plain = TraceOptions::new("req").fallback_for(&p);
        let seeded = TraceOptions::new("req")
            .with_seed(Some("s1"))
            .fallback_for(&p);
        let other = TraceOptions::new("req")
            .with_seed(Some("s2"))
            .fallback_for(&p);
        assert!(plain.starts_with("req-"));
        assert_ne!(plain, seeded);
        assert_ne!(seeded, other);
    }
}
