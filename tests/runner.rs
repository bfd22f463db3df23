use std::fs;

use response_composer::Composer;
use response_composer::error::RunnerError;
use response_composer::runner::{
    ContractIssue, demo_cases, run_demo, run_examples, verify_file, verify_value,
};
use serde_json::{Value, json};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, value: &Value) {
    fs::write(dir.path().join(name), value.to_string()).unwrap();
}

fn read(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn run_examples_writes_matching_outputs() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "payload_task_failed.json",
        &json!({"execution_status": {"status": "failed", "error": "timeout"}}),
    );
    write(
        &dir,
        "payload_task_created.json",
        &json!({"task": {"task_type": "note", "description": "groceries"}}),
    );
    write(&dir, "notes.json", &json!({"ignored": true}));

    let outcomes = run_examples(&Composer::default(), dir.path(), None, true).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].payload.ends_with("payload_task_created.json"));
    assert!(outcomes[0].output.ends_with("output_task_created.json"));

    let failed = read(&dir.path().join("output_task_failed.json"));
    assert_eq!(failed["action_taken"], "Failed to execute task: timeout.");
    assert_eq!(failed["response_version"], "v1");
    assert!(!dir.path().join("output_notes.json").exists());
}

#[test]
fn run_examples_into_separate_directory() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let target = out.path().join("nested");
    write(&src, "payload_default.json", &json!({"routing": {"response": "Hi"}}));

    let outcomes = run_examples(&Composer::default(), src.path(), Some(&target), false).unwrap();
    assert_eq!(outcomes.len(), 1);
    let written = fs::read_to_string(target.join("output_default.json")).unwrap();
    assert_eq!(written.lines().count(), 1);
}

#[test]
fn malformed_payload_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("payload_bad.json"), "{not json").unwrap();
    let err = run_examples(&Composer::default(), dir.path(), None, true).unwrap_err();
    assert!(matches!(err, RunnerError::Json { .. }));
}

#[test]
fn missing_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = run_examples(&Composer::default(), &dir.path().join("absent"), None, true)
        .unwrap_err();
    assert!(matches!(err, RunnerError::NotADirectory(_)));
}

#[test]
fn demo_covers_every_case() {
    let outcomes = run_demo(&Composer::default());
    assert_eq!(outcomes.len(), demo_cases().len());
    for outcome in outcomes {
        assert!(!outcome.response.assistant_message.is_empty());
        assert!(!outcome.response.trace_id.is_empty());
    }
}

#[test]
fn verify_flags_only_the_broken_object() {
    let dir = TempDir::new().unwrap();
    let good = response_composer::compose_value(&json!({"task": {"task_type": "note"}}));
    let bad = json!({
        "assistant_message": "done",
        "action_taken": "Processed request.",
        "next_steps": [],
        "confidence_level": "certain",
        "response_version": "v0"
    });
    write(&dir, "responses.json", &json!([good.to_json(), bad]));

    let reports = verify_file(&dir.path().join("responses.json")).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0].passed());
    assert_eq!(reports[1].index, 1);
    assert_eq!(
        reports[1].issues,
        vec![
            ContractIssue::Invalid("confidence_level"),
            ContractIssue::Missing("trace_id"),
            ContractIssue::Invalid("response_version"),
        ]
    );
}

#[test]
fn verify_accepts_a_single_object() {
    let response = response_composer::compose_value(&json!({}));
    let reports = verify_value(&response.to_json());
    assert_eq!(reports.len(), 1);
    assert!(reports[0].passed());
}
