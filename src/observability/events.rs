//! Observability events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and applied
    ConfigLoaded,

    // Schema construction
    /// Schema definition checked and built
    SchemaBuilt,
    /// Schema definition rejected, eagerly or when a dynamic type resolved
    SchemaFormatError,

    // Validation
    /// Document conformed to its schema
    ValidationPassed,
    /// Document rejected with a non-empty report
    ValidationFailed,
    /// Dynamic type resolved for one field
    DynamicTypeResolved,

    // Defaults
    /// Default application finished
    DefaultsApplied,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::SchemaBuilt => "SCHEMA_BUILT",
            Event::SchemaFormatError => "SCHEMA_FORMAT_ERROR",

            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::DynamicTypeResolved => "DYNAMIC_TYPE_RESOLVED",

            Event::DefaultsApplied => "DEFAULTS_APPLIED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaFormatError => Severity::Error,
            Event::DynamicTypeResolved => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
