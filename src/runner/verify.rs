use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use tracing::{info, warn};

use super::read_json;
use crate::core::composer::{
    ConfidenceLevel, RESPONSE_VERSION, Response, UNKNOWN_TRACE_ID, validate_value,
};
use crate::error::RunnerError;

/// One way a serialized response breaks the output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractIssue {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ContractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "missing:{field}"),
            Self::Invalid(field) => write!(f, "invalid:{field}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Position in the checked array; `0` for a single object.
    pub index: usize,
    pub issues: Vec<ContractIssue>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check one serialized response against the contract.
pub fn check_object(value: &Value) -> Vec<ContractIssue> {
    let Value::Object(object) = value else {
        return vec![ContractIssue::Invalid("object")];
    };

    let mut issues = Vec::new();
    for field in Response::FIELDS {
        let Some(item) = object.get(field) else {
            issues.push(ContractIssue::Missing(field));
            continue;
        };
        let valid = match field {
            "next_steps" => item
                .as_array()
                .is_some_and(|steps| steps.iter().all(Value::is_string)),
            "confidence_level" => item.as_str().is_some_and(is_confidence_level),
            "response_version" => item.as_str() == Some(RESPONSE_VERSION),
            _ => item.is_string(),
        };
        if !valid {
            issues.push(ContractIssue::Invalid(field));
        }
    }
    issues
}

fn is_confidence_level(raw: &str) -> bool {
    ConfidenceLevel::from_str(raw).is_ok_and(|level| level.as_str() == raw)
}

/// A single object or an array of them.
pub fn verify_value(value: &Value) -> Vec<VerifyReport> {
    let reports: Vec<VerifyReport> = items(value)
        .into_iter()
        .enumerate()
        .map(|(index, item)| VerifyReport {
            index,
            issues: check_object(item),
        })
        .collect();

    for report in &reports {
        if report.passed() {
            info!(index = report.index, "verify.ok");
        } else {
            warn!(
                index = report.index,
                issues = report.issues.len(),
                "verify.fail"
            );
        }
    }
    reports
}

pub fn verify_file(path: &Path) -> Result<Vec<VerifyReport>, RunnerError> {
    let value = read_json(path)?;
    Ok(verify_value(&value))
}

/// Run every item through the output validator, producing responses that
/// satisfy the contract.
pub fn repair_value(value: &Value) -> Vec<Response> {
    items(value)
        .into_iter()
        .map(|item| validate_value(item, UNKNOWN_TRACE_ID))
        .collect()
}

fn items(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}
