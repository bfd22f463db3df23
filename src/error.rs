use std::path::PathBuf;

use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unknown scenario `{0}` in [templates]")]
    UnknownScenario(String),
}

// ─── Payload shape errors ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("section `{section}` must be a JSON object, found {found}")]
    InvalidSection {
        section: &'static str,
        found: &'static str,
    },
}

// ─── Composition errors ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),
}

// ─── Runner errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_reason() {
        let err = ConfigError::Validation("bad prefix".into());
        assert_eq!(err.to_string(), "validation failed: bad prefix");
    }

    #[test]
    fn payload_error_names_section_and_kind() {
        let err = ComposeError::from(PayloadError::InvalidSection {
            section: "task",
            found: "string",
        });
        let text = err.to_string();
        assert!(text.contains("`task`"));
        assert!(text.contains("string"));
    }

    #[test]
    fn runner_error_displays_path() {
        let err = RunnerError::NotADirectory(PathBuf::from("/tmp/nowhere"));
        assert!(err.to_string().contains("/tmp/nowhere"));
    }
}
