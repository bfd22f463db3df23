use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::read_json;
use super::verify::{ContractIssue, check_object};
use crate::core::composer::Composer;
use crate::error::RunnerError;

/// One fixture entry: compose `input`, then compare `expected_partial`
/// field by field against the response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegressionCase {
    pub name: String,
    #[serde(default = "empty_input")]
    pub input: Value,
    #[serde(default)]
    pub expected_partial: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub field: String,
    pub expected: Value,
    /// `None` when the response lacks the field entirely.
    pub actual: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub name: String,
    pub mismatches: Vec<Mismatch>,
    pub contract_issues: Vec<ContractIssue>,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && self.contract_issues.is_empty()
    }
}

/// A case without `input` composes the empty payload.
fn empty_input() -> Value {
    Value::Object(Map::new())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegressionSummary {
    pub reports: Vec<CaseReport>,
}

impl RegressionSummary {
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

pub fn load_cases(path: &Path) -> Result<Vec<RegressionCase>, RunnerError> {
    let value = read_json(path)?;
    serde_json::from_value(value).map_err(|source| RunnerError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn run_case(composer: &Composer, case: &RegressionCase) -> CaseReport {
    let response = composer.compose_value(&case.input).to_json();
    let contract_issues = check_object(&response);

    let mismatches = case
        .expected_partial
        .iter()
        .filter_map(|(field, expected)| {
            let actual = response.get(field);
            (actual != Some(expected)).then(|| Mismatch {
                field: field.clone(),
                expected: expected.clone(),
                actual: actual.cloned(),
            })
        })
        .collect();

    let report = CaseReport {
        name: case.name.clone(),
        mismatches,
        contract_issues,
    };
    if report.passed() {
        info!(case = %report.name, "regression.pass");
    } else {
        warn!(case = %report.name, mismatches = report.mismatches.len(), "regression.fail");
    }
    report
}

pub fn run_cases(composer: &Composer, cases: &[RegressionCase]) -> RegressionSummary {
    RegressionSummary {
        reports: cases.iter().map(|case| run_case(composer, case)).collect(),
    }
}

pub fn run_file(composer: &Composer, path: &Path) -> Result<RegressionSummary, RunnerError> {
    let cases = load_cases(path)?;
    Ok(run_cases(composer, &cases))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case(value: Value) -> RegressionCase {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn matching_case_passes() {
        let report = run_case(
            &Composer::default(),
            &case(json!({
                "name": "failed",
                "input": {"execution_status": {"status": "failed", "error": "timeout"}},
                "expected_partial": {"action_taken": "Failed to execute task: timeout."}
            })),
        );
        assert!(report.passed(), "{report:?}");
    }

    #[test]
    fn mismatch_records_expected_and_actual() {
        let report = run_case(
            &Composer::default(),
            &case(json!({
                "name": "wrong",
                "input": {},
                "expected_partial": {"confidence_level": "high", "not_a_field": 1}
            })),
        );
        assert!(!report.passed());
        assert_eq!(report.mismatches.len(), 2);
        let confidence = report
            .mismatches
            .iter()
            .find(|m| m.field == "confidence_level")
            .unwrap();
        assert_eq!(confidence.actual, Some(json!("medium")));
        let unknown = report
            .mismatches
            .iter()
            .find(|m| m.field == "not_a_field")
            .unwrap();
        assert_eq!(unknown.actual, None);
    }

    #[test]
    fn case_without_expectations_checks_contract_only() {
        let report = run_case(&Composer::default(), &case(json!({"name": "bare"})));
        assert!(report.passed());
    }

    #[test]
    fn missing_input_composes_empty_payload() {
        let bare = case(json!({
            "name": "no input",
            "expected_partial": {
                "assistant_message": "I've created a task task for you: item.",
                "confidence_level": "medium"
            }
        }));
        assert_eq!(bare.input, json!({}));
        assert!(run_case(&Composer::default(), &bare).passed());
    }

    #[test]
    fn summary_counts() {
        let cases = vec![
            case(json!({"name": "ok", "input": {}})),
            case(json!({"name": "bad", "input": {}, "expected_partial": {"trace_id": ""}})),
        ];
        let summary = run_cases(&Composer::default(), &cases);
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_passed());
    }
}
