//! Output configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_OUTPUT_FORMAT};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// One of `raw`, `markdown`, `compact`. Default: markdown.
    pub format: Option<String>,
    /// Tracing filter directive. Default: `apimap=warn`.
    pub log_level: Option<String>,
}

impl OutputConfig {
    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_OUTPUT_FORMAT)
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
