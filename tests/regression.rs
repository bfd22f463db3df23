use std::path::{Path, PathBuf};

use response_composer::Composer;
use response_composer::runner::{self, load_cases};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/regression_cases.json")
}

#[test]
fn fixture_cases_load() {
    let cases = load_cases(&fixture()).unwrap();
    assert!(cases.len() >= 5);
    assert!(cases.iter().all(|c| !c.name.is_empty()));
}

#[test]
fn fixture_cases_pass_with_builtin_templates() {
    let summary = runner::run_file(&Composer::default(), &fixture()).unwrap();
    let failures: Vec<_> = summary.reports.iter().filter(|r| !r.passed()).collect();
    assert!(failures.is_empty(), "failing cases: {failures:#?}");
    assert!(summary.all_passed());
}

#[test]
fn missing_fixture_is_a_read_error() {
    let err = runner::run_file(&Composer::default(), Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}
