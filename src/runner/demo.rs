use serde_json::{Value, json};

use crate::core::composer::{Composer, Response};

#[derive(Debug, Clone, PartialEq)]
pub struct DemoCase {
    pub name: &'static str,
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoOutcome {
    pub name: &'static str,
    pub response: Response,
}

pub fn demo_cases() -> Vec<DemoCase> {
    vec![
        DemoCase {
            name: "Missing task",
            payload: json!({
                "summary": {"summary": "Buy milk"},
                "task": {},
                "routing": {},
                "execution_status": {"status": "success"}
            }),
        },
        DemoCase {
            name: "Missing execution_status",
            payload: json!({
                "summary": {},
                "task": {"task_type": "reminder", "parameters": {"message": "buy milk"}, "priority": "normal"},
                "routing": {},
                "execution_status": null
            }),
        },
        DemoCase {
            name: "Only routing",
            payload: json!({
                "summary": {},
                "task": {},
                "routing": {"response": "Hello", "confidence": 0.9},
                "execution_status": {"status": "success"}
            }),
        },
        DemoCase {
            name: "Confidence numeric only",
            payload: json!({
                "summary": {},
                "task": {},
                "routing": {"confidence": 0.6},
                "execution_status": {"status": "success"}
            }),
        },
        DemoCase {
            name: "Clarification mode",
            payload: json!({
                "summary": {},
                "task": {},
                "routing": {},
                "execution_status": {"status": "clarification_needed", "clarification_prompt": "Specify date"}
            }),
        },
    ]
}

pub fn run_demo(composer: &Composer) -> Vec<DemoOutcome> {
    demo_cases()
        .into_iter()
        .map(|case| DemoOutcome {
            name: case.name,
            response: composer.compose_value(&case.payload),
        })
        .collect()
}
