use std::str::FromStr;

use serde_json::Value;

use super::response::{ConfidenceLevel, RESPONSE_VERSION, Response};

pub const DEFAULT_MESSAGE: &str = "I processed your request.";
pub const DEFAULT_ACTION: &str = "Processed request.";
pub const UNKNOWN_TRACE_ID: &str = "trace-unknown";

/// A response before validation. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDraft {
    pub assistant_message: Option<String>,
    pub action_taken: Option<String>,
    pub next_steps: Option<Vec<String>>,
    pub confidence_level: Option<String>,
    pub trace_id: Option<String>,
    pub response_version: Option<String>,
}

impl ResponseDraft {
    /// Read whatever is usable out of arbitrary JSON. Wrong-typed fields read
    /// as missing; non-string steps are dropped.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            assistant_message: text("assistant_message"),
            action_taken: text("action_taken"),
            next_steps: value
                .get("next_steps")
                .and_then(Value::as_array)
                .map(|steps| {
                    steps
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                }),
            confidence_level: text("confidence_level"),
            trace_id: text("trace_id"),
            response_version: text("response_version"),
        }
    }
}

impl From<Response> for ResponseDraft {
    fn from(response: Response) -> Self {
        Self {
            assistant_message: Some(response.assistant_message),
            action_taken: Some(response.action_taken),
            next_steps: Some(response.next_steps),
            confidence_level: Some(response.confidence_level.as_str().to_string()),
            trace_id: Some(response.trace_id),
            response_version: Some(response.response_version),
        }
    }
}

/// Enforce the response contract. Idempotent on valid responses.
pub fn validate(draft: ResponseDraft, fallback_trace_id: &str) -> Response {
    let non_blank = |s: Option<String>, default: &str| {
        s.filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let trace_id = draft
        .trace_id
        .filter(|id| !id.is_empty())
        .or_else(|| Some(fallback_trace_id.to_string()).filter(|id| !id.is_empty()))
        .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string());

    Response {
        assistant_message: non_blank(draft.assistant_message, DEFAULT_MESSAGE),
        action_taken: non_blank(draft.action_taken, DEFAULT_ACTION),
        next_steps: draft.next_steps.unwrap_or_default(),
        confidence_level: draft
            .confidence_level
            .and_then(|level| ConfidenceLevel::from_str(level.trim()).ok())
            .unwrap_or_default(),
        trace_id,
        response_version: RESPONSE_VERSION.to_string(),
    }
}

pub fn validate_value(value: &Value, fallback_trace_id: &str) -> Response {
    validate(ResponseDraft::from_value(value), fallback_trace_id)
}
