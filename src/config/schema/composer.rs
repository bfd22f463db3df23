use serde::{Deserialize, Serialize};

use crate::core::composer::DEFAULT_TRACE_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Prefix for trace ids derived from the payload digest.
    #[serde(default = "default_trace_prefix")]
    pub trace_prefix: String,
}

fn default_trace_prefix() -> String {
    DEFAULT_TRACE_PREFIX.into()
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            trace_prefix: default_trace_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON written by the CLI.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}
