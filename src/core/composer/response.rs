use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Contract version stamped on every response.
pub const RESPONSE_VERSION: &str = "v1";

/// Three-level confidence scale exposed to users.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConfidenceLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Final, validated assistant response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub assistant_message: String,
    pub action_taken: String,
    pub next_steps: Vec<String>,
    pub confidence_level: ConfidenceLevel,
    pub trace_id: String,
    pub response_version: String,
}

impl Response {
    /// Contract fields every serialized response carries.
    pub const FIELDS: [&'static str; 6] = [
        "assistant_message",
        "action_taken",
        "next_steps",
        "confidence_level",
        "trace_id",
        "response_version",
    ];

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "assistant_message": self.assistant_message,
            "action_taken": self.action_taken,
            "next_steps": self.next_steps,
            "confidence_level": self.confidence_level.as_str(),
            "trace_id": self.trace_id,
            "response_version": self.response_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn confidence_parses_case_insensitively() {
        assert_eq!(
            ConfidenceLevel::from_str("HIGH").unwrap(),
            ConfidenceLevel::High
        );
        assert_eq!(
            ConfidenceLevel::from_str("low").unwrap(),
            ConfidenceLevel::Low
        );
        assert!(ConfidenceLevel::from_str("certain").is_err());
    }

    #[test]
    fn confidence_serializes_lowercase() {
        let json = serde_json::to_string(&ConfidenceLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        assert_eq!(ConfidenceLevel::High.to_string(), "high");
    }

    #[test]
    fn to_json_carries_every_contract_field() {
        let response = Response {
            assistant_message: "hi".into(),
            action_taken: "Processed request.".into(),
            next_steps: vec![],
            confidence_level: ConfidenceLevel::Low,
            trace_id: "t-1".into(),
            response_version: RESPONSE_VERSION.into(),
        };
        let json = response.to_json();
        for field in Response::FIELDS {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert_eq!(json["confidence_level"], "low");
    }
}
