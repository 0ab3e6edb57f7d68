//! Library configuration
//!
//! Read from JSON. Every key is optional; missing keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::{SchemaError, SchemaResult};

/// Configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemerConfig {
    /// Default strictness for schemas built with
    /// [`SchemaBuilder::with_config`](crate::schema::SchemaBuilder::with_config)
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Lowest log severity that is written
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_strict() -> bool {
    true
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for SchemerConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            log_level: default_log_level(),
        }
    }
}

impl SchemerConfig {
    /// Parse configuration from a JSON string
    pub fn from_json_str(content: &str) -> SchemaResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| SchemaError::Config(format!("Invalid config JSON: {}", e)))
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_json_str(&content)
    }

    /// Install the log threshold process-wide
    pub fn apply(&self) {
        Logger::set_min_severity(self.log_level);

        let strict = self.strict.to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("log_level", self.log_level.as_str()), ("strict", strict.as_str())],
        );
    }
}
