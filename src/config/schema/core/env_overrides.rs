use std::str::FromStr;

use tracing::warn;

use super::Config;
use crate::config::schema::LogLevel;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Same as [`Config::apply_env_overrides`] with an injectable lookup.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(prefix) = lookup("COMPOSER_TRACE_PREFIX")
            && !prefix.is_empty()
        {
            self.composer.trace_prefix = prefix;
        }

        if let Some(level) = lookup("COMPOSER_LOG_LEVEL")
            && !level.is_empty()
        {
            match LogLevel::from_str(level.trim()) {
                Ok(level) => self.logging.level = level,
                Err(_) => warn!(value = %level, "ignoring invalid COMPOSER_LOG_LEVEL"),
            }
        }

        if let Some(pretty) = lookup("COMPOSER_PRETTY") {
            match pretty.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => self.output.pretty = true,
                "0" | "false" => self.output.pretty = false,
                _ => warn!(value = %pretty, "ignoring invalid COMPOSER_PRETTY"),
            }
        }
    }
}
