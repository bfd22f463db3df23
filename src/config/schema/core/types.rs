use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::super::{ComposerConfig, LoggingConfig, OutputConfig};
use crate::core::composer::{Scenario, Template};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File this config was read from; `None` for built-in defaults.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub composer: ComposerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Per-scenario template overrides keyed by scenario name.
    #[serde(default)]
    pub templates: BTreeMap<String, Template>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.composer.trace_prefix;
        if prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "composer.trace_prefix must not be empty".into(),
            ));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "composer.trace_prefix must not contain whitespace: {prefix:?}"
            )));
        }

        for (name, template) in &self.templates {
            if Scenario::from_str(name).is_err() {
                return Err(ConfigError::UnknownScenario(name.clone()));
            }
            if template.message.trim().is_empty() || template.action.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "templates.{name}: message and action must not be blank"
                )));
            }
        }

        Ok(())
    }
}
