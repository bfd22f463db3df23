//! Batch wrappers around the composer: example directories, regression
//! fixtures, contract verification of serialized responses and the built-in
//! demo cases. All file I/O lives here; the core composer stays pure.

mod demo;
mod examples;
mod regression;
mod verify;

pub use demo::{DemoCase, DemoOutcome, demo_cases, run_demo};
pub use examples::{ExampleOutcome, OUTPUT_PREFIX, PAYLOAD_PREFIX, output_name, run_examples};
pub use regression::{
    CaseReport, Mismatch, RegressionCase, RegressionSummary, load_cases, run_case, run_cases,
    run_file,
};
pub use verify::{
    ContractIssue, VerifyReport, check_object, repair_value, verify_file, verify_value,
};

use std::path::Path;

use serde_json::Value;

use crate::error::RunnerError;

pub(crate) fn read_json(path: &Path) -> Result<Value, RunnerError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RunnerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| RunnerError::Json {
        path: path.to_path_buf(),
        source,
    })
}
