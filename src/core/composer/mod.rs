//! Response composition: payload → scenario → context → rendered text →
//! validated response. Every stage is a pure function; [`Composer`] only
//! carries the template table and the trace-id prefix.

mod confidence;
mod normalizer;
mod payload;
mod renderer;
mod resolver;
mod response;
mod templates;
mod trace;
mod trust;
mod validator;

use std::str::FromStr;
use std::sync::LazyLock;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ComposeError, ConfigError};

pub use confidence::{classify_raw, classify_verified, resolve_confidence};
pub use normalizer::{Scenario, normalize};
pub use payload::{Payload, Record};
pub use renderer::{Rendered, render, substitute};
pub use resolver::{Context, resolve_context};
pub use response::{ConfidenceLevel, RESPONSE_VERSION, Response};
pub use templates::{Template, TemplateSet};
pub use trace::{DEFAULT_TRACE_PREFIX, TraceOptions, explicit_trace_id, resolve_trace_id};
pub use trust::TrustBlock;
pub use validator::{
    DEFAULT_ACTION, DEFAULT_MESSAGE, ResponseDraft, UNKNOWN_TRACE_ID, validate, validate_value,
};

pub const INTERNAL_ERROR_MESSAGE: &str =
    "I encountered an internal error while processing your request.";
pub const INTERNAL_ERROR_ACTION: &str = "System error caught during response composition.";
pub const INTERNAL_ERROR_STEPS: [&str; 2] = ["Retry request", "Contact support"];

static DEFAULT_COMPOSER: LazyLock<Composer> = LazyLock::new(Composer::default);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    templates: TemplateSet,
    trace_prefix: String,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(TemplateSet::builtin(), DEFAULT_TRACE_PREFIX)
    }
}

impl Composer {
    pub fn new(templates: TemplateSet, trace_prefix: impl Into<String>) -> Self {
        Self {
            templates,
            trace_prefix: trace_prefix.into(),
        }
    }

    /// Built-in templates with `[templates.*]` overrides and the configured
    /// trace prefix applied.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let overrides = config
            .templates
            .iter()
            .map(|(name, template)| {
                Scenario::from_str(name)
                    .map(|scenario| (scenario, template.clone()))
                    .map_err(|_| ConfigError::UnknownScenario(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(
            TemplateSet::builtin().with_overrides(overrides),
            config.composer.trace_prefix.clone(),
        ))
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn trace_prefix(&self) -> &str {
        &self.trace_prefix
    }

    pub fn compose(&self, payload: &Payload) -> Response {
        self.compose_payload(payload, None)
    }

    /// Like [`Composer::compose`], but a derived trace id is salted with
    /// `seed`. Ids named by the payload are unaffected.
    pub fn compose_with_seed(&self, payload: &Payload, seed: &str) -> Response {
        self.compose_payload(payload, Some(seed))
    }

    /// Total entry point for raw JSON: shape errors become the degraded
    /// internal-error response instead of a failure.
    pub fn compose_value(&self, value: &Value) -> Response {
        self.compose_value_seeded(value, None)
    }

    pub fn compose_value_with_seed(&self, value: &Value, seed: &str) -> Response {
        self.compose_value_seeded(value, Some(seed))
    }

    pub fn try_compose_value(&self, value: &Value) -> Result<Response, ComposeError> {
        let payload = Payload::from_value(value)?;
        Ok(self.compose(&payload))
    }

    fn compose_value_seeded(&self, value: &Value, seed: Option<&str>) -> Response {
        match Payload::from_value(value) {
            Ok(payload) => self.compose_payload(&payload, seed),
            Err(err) => {
                warn!(error = %err, "composer.degraded");
                self.degraded(value, seed)
            }
        }
    }

    fn compose_payload(&self, payload: &Payload, seed: Option<&str>) -> Response {
        let trace = TraceOptions::new(&self.trace_prefix).with_seed(seed);
        let scenario = normalize(payload);
        let context = resolve_context(payload, &trace);
        let rendered = render(scenario, &context, &self.templates);

        let draft = ResponseDraft {
            assistant_message: Some(rendered.assistant_message),
            action_taken: Some(rendered.action_taken),
            next_steps: Some(rendered.next_steps),
            confidence_level: Some(context.confidence_level.as_str().to_string()),
            trace_id: Some(context.trace_id),
            response_version: Some(RESPONSE_VERSION.to_string()),
        };
        let response = validate(draft, &trace.fallback_for(payload));
        debug!(
            scenario = %scenario,
            confidence = %response.confidence_level,
            trace_id = %response.trace_id,
            "composer.compose"
        );
        response
    }

    /// Internal-error response for payloads that fail the shape check. The
    /// trace id still honours whatever sections are usable.
    fn degraded(&self, value: &Value, seed: Option<&str>) -> Response {
        let trace = TraceOptions::new(&self.trace_prefix).with_seed(seed);
        let fallback = trace.fallback_for_bytes(&serde_json::to_vec(value).unwrap_or_default());
        let trace_id = explicit_trace_id(&Payload::from_value_lossy(value))
            .unwrap_or_else(|| fallback.clone());

        let draft = ResponseDraft {
            assistant_message: Some(INTERNAL_ERROR_MESSAGE.to_string()),
            action_taken: Some(INTERNAL_ERROR_ACTION.to_string()),
            next_steps: Some(INTERNAL_ERROR_STEPS.map(String::from).to_vec()),
            confidence_level: Some(ConfidenceLevel::Low.as_str().to_string()),
            trace_id: Some(trace_id),
            response_version: Some(RESPONSE_VERSION.to_string()),
        };
        validate(draft, &fallback)
    }
}

/// Compose with the built-in templates and default trace prefix.
pub fn compose(payload: &Payload) -> Response {
    DEFAULT_COMPOSER.compose(payload)
}

pub fn compose_with_seed(payload: &Payload, seed: &str) -> Response {
    DEFAULT_COMPOSER.compose_with_seed(payload, seed)
}

pub fn compose_value(value: &Value) -> Response {
    DEFAULT_COMPOSER.compose_value(value)
}
