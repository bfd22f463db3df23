use super::confidence::resolve_confidence;
use super::payload::Payload;
use super::response::ConfidenceLevel;
use super::trace::{TraceOptions, resolve_trace_id};

pub const DEFAULT_TASK_TYPE: &str = "task";
pub const DEFAULT_DESCRIPTION: &str = "item";
pub const DEFAULT_PRIORITY: &str = "normal";
pub const DEFAULT_DATETIME: &str = "unspecified time";
pub const DEFAULT_ERROR_REASON: &str = "unknown error";
pub const DEFAULT_CLARIFICATION_PROMPT: &str = "Could you provide more details?";
pub const DEFAULT_RESPONSE_TEXT: &str = "I processed your request.";

const TASK_NAME_KEYS: [&str; 5] = ["description", "name", "title", "display_name", "label"];
const PARAMETER_TEXT_KEYS: [&str; 2] = ["message", "query"];
const ERROR_KEYS: [&str; 3] = ["error", "failure", "reason"];

/// Slot values templates may reference as `{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub task_type: String,
    pub description: String,
    pub priority: String,
    pub datetime: String,
    pub error_reason: String,
    pub clarification_prompt: String,
    pub response_text: String,
    pub confidence_level: ConfidenceLevel,
    pub trace_id: String,
}

impl Context {
    pub const SLOTS: [&'static str; 9] = [
        "task_type",
        "description",
        "priority",
        "datetime",
        "error_reason",
        "clarification_prompt",
        "response_text",
        "confidence_level",
        "trace_id",
    ];

    pub fn slot(&self, name: &str) -> Option<&str> {
        let value = match name {
            "task_type" => &self.task_type,
            "description" => &self.description,
            "priority" => &self.priority,
            "datetime" => &self.datetime,
            "error_reason" => &self.error_reason,
            "clarification_prompt" => &self.clarification_prompt,
            "response_text" => &self.response_text,
            "confidence_level" => return Some(self.confidence_level.as_str()),
            "trace_id" => &self.trace_id,
            _ => return None,
        };
        Some(value.as_str())
    }
}

pub fn resolve_context(payload: &Payload, trace: &TraceOptions<'_>) -> Context {
    let task = &payload.task;
    let status = &payload.execution_status;
    let parameters = task.nested("parameters");

    let description = task
        .first_text(&TASK_NAME_KEYS)
        .or_else(|| parameters.first_text(&PARAMETER_TEXT_KEYS))
        .or_else(|| payload.summary.text("summary"))
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    Context {
        task_type: task
            .text("task_type")
            .unwrap_or_else(|| DEFAULT_TASK_TYPE.to_string()),
        description,
        priority: task
            .text("priority")
            .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        datetime: parameters
            .text("datetime")
            .or_else(|| task.text("datetime"))
            .unwrap_or_else(|| DEFAULT_DATETIME.to_string()),
        error_reason: status
            .first_text(&ERROR_KEYS)
            .unwrap_or_else(|| DEFAULT_ERROR_REASON.to_string()),
        clarification_prompt: status
            .text("clarification_prompt")
            .or_else(|| task.text("clarification_prompt"))
            .unwrap_or_else(|| DEFAULT_CLARIFICATION_PROMPT.to_string()),
        response_text: payload
            .routing
            .text("response")
            .unwrap_or_else(|| DEFAULT_RESPONSE_TEXT.to_string()),
        confidence_level: resolve_confidence(payload),
        trace_id: resolve_trace_id(payload, trace),
    }
}
