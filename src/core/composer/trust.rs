use super::payload::{Payload, Record};

/// Verified side-channel for confidence and trace data.
///
/// Looked up under `execution_status.trust` first, then `routing.trust`; the
/// first one that is an object is the block, even if it lacks the field a
/// caller is after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrustBlock {
    pub confidence: Option<f64>,
    pub confidence_verified: bool,
    pub trace_ref: Option<String>,
}

impl TrustBlock {
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        payload
            .execution_status
            .object("trust")
            .or_else(|| payload.routing.object("trust"))
            .map(|record| Self::from_record(&record))
    }

    pub fn from_record(record: &Record) -> Self {
        Self {
            confidence: record.number("confidence"),
            confidence_verified: record.flag("confidence_verified"),
            trace_ref: record
                .string("trace_ref")
                .or_else(|| record.string("trace_reference")),
        }
    }

    /// Confidence score, only when the block vouches for it.
    pub fn verified_confidence(&self) -> Option<f64> {
        if self.confidence_verified {
            self.confidence
        } else {
            None
        }
    }
}
