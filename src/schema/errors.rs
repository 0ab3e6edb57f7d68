//! Schema error types
//!
//! Error codes:
//! - SCHEMER_VALIDATION_FAILED (document rejected, carries the full report)
//! - SCHEMER_SCHEMA_FORMAT (malformed schema definition)
//! - SCHEMER_INVALID_PATTERN (validator built from a bad regex)
//! - SCHEMER_CONFIG (configuration could not be read)

use std::fmt;

use thiserror::Error;

use super::report::ErrorReport;

/// Stable codes for every schema error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Document violates schema
    ValidationFailed,
    /// Schema definition is malformed
    SchemaFormat,
    /// Regex validator pattern does not compile
    InvalidPattern,
    /// Configuration error
    Config,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ValidationFailed => "SCHEMER_VALIDATION_FAILED",
            SchemaErrorCode::SchemaFormat => "SCHEMER_SCHEMA_FORMAT",
            SchemaErrorCode::InvalidPattern => "SCHEMER_INVALID_PATTERN",
            SchemaErrorCode::Config => "SCHEMER_CONFIG",
        }
    }

    /// Whether the error is a problem with the document rather than with
    /// the schema or its surroundings
    pub fn is_document_error(&self) -> bool {
        matches!(self, SchemaErrorCode::ValidationFailed)
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Payload of a failed validation: every problem found in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Path-keyed messages
    pub errors: ErrorReport,
}

impl ValidationFailure {
    pub fn new(errors: ErrorReport) -> Self {
        Self { errors }
    }

    /// Returns the report
    pub fn errors(&self) -> &ErrorReport {
        &self.errors
    }

    /// Consumes the failure and returns the report
    pub fn into_errors(self) -> ErrorReport {
        self.errors
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for (path, message) in self.errors.iter() {
            write!(f, "\n  {}: {}", display_path(path), message)?;
        }
        Ok(())
    }
}

/// Schema error type
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("[SCHEMER_VALIDATION_FAILED] {0}")]
    ValidationFailed(ValidationFailure),

    #[error("[SCHEMER_SCHEMA_FORMAT] {}: {reason}", display_path(.path))]
    Format { path: String, reason: String },

    #[error("[SCHEMER_INVALID_PATTERN] pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("[SCHEMER_CONFIG] {0}")]
    Config(String),
}

impl SchemaError {
    /// Create a schema format error at the given field path
    pub fn format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation failure from a non-empty report
    pub fn validation_failed(errors: ErrorReport) -> Self {
        SchemaError::ValidationFailed(ValidationFailure::new(errors))
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            SchemaError::ValidationFailed(_) => SchemaErrorCode::ValidationFailed,
            SchemaError::Format { .. } => SchemaErrorCode::SchemaFormat,
            SchemaError::InvalidPattern { .. } => SchemaErrorCode::InvalidPattern,
            SchemaError::Config(_) => SchemaErrorCode::Config,
        }
    }

    /// Returns the validation report if this is a validation failure
    pub fn errors(&self) -> Option<&ErrorReport> {
        match self {
            SchemaError::ValidationFailed(failure) => Some(&failure.errors),
            _ => None,
        }
    }

    /// Returns the field path for schema format errors
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::Format { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "$root"
    } else {
        path
    }
}
