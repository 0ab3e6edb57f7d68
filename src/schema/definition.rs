//! Schema container and construction-time checks

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::defaults::DefaultApplier;
use super::errors::{SchemaError, SchemaResult};
use super::report::ErrorReport;
use super::types::{FieldSpec, FieldType};
use super::validator::SchemaValidator;
use crate::config::SchemerConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::validators::FieldValidator;

/// Ordered mapping from field name to field specification.
///
/// A schema is immutable once built. Share it with `Arc<Schema>`; nesting it
/// inside other schemas or dynamic type functions never copies it.
#[derive(Debug)]
pub struct Schema {
    name: Option<String>,
    fields: Vec<(String, FieldSpec)>,
    strict: bool,
    validators: Vec<FieldValidator>,
}

impl Schema {
    /// Start building a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Display name used in type error messages
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Look up a field specification by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, spec)| spec)
    }

    /// Whether the schema declares a field
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether undeclared document fields are rejected
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Validators applied to the whole document
    pub fn validators(&self) -> &[FieldValidator] {
        &self.validators
    }

    /// Validates a document against this schema.
    ///
    /// # Errors
    ///
    /// - `SchemaError::ValidationFailed` carrying every problem found
    /// - `SchemaError::Format` if a dynamic type resolves to something unusable
    pub fn validate(&self, document: &Value) -> SchemaResult<()> {
        SchemaValidator::new(self).validate(document)
    }

    /// Validates a document and returns the report, empty when valid.
    pub fn errors(&self, document: &Value) -> SchemaResult<ErrorReport> {
        SchemaValidator::new(self).report(document)
    }

    /// Fills missing fields that declare a default, using the current time
    /// for clock-based defaults. Returns the same document for chaining.
    pub fn apply_defaults<'d>(&self, document: &'d mut Value) -> &'d mut Value {
        self.apply_defaults_at(document, Utc::now())
    }

    /// Fills missing fields that declare a default, reading `now` for
    /// clock-based defaults.
    pub fn apply_defaults_at<'d>(&self, document: &'d mut Value, now: DateTime<Utc>) -> &'d mut Value {
        DefaultApplier::new(self).at(now).apply(document);
        document
    }
}

/// Builder for [`Schema`], checking the definition on `build`.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: Option<String>,
    fields: Vec<(String, FieldSpec)>,
    strict: bool,
    validators: Vec<FieldValidator>,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            name: None,
            fields: Vec::new(),
            strict: true,
            validators: Vec::new(),
        }
    }

    /// Seed options from configuration
    pub fn with_config(mut self, config: &SchemerConfig) -> Self {
        self.strict = config.strict;
        self
    }

    /// Name shown in type error messages
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare a field. Declaration order is validation order.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    /// Whether undeclared fields are rejected (default true)
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validator run against the whole document before its fields
    pub fn validates(mut self, validator: FieldValidator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Checks the definition and builds the schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Format` naming the offending field if:
    /// - a field name is empty or declared twice
    /// - a union has no candidates
    /// - a literal default does not fit the declared type
    pub fn build(self) -> SchemaResult<Schema> {
        let mut seen = HashSet::new();
        for (name, spec) in &self.fields {
            if name.is_empty() {
                return Err(format_error("", "field names must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(format_error(name, "field is declared more than once"));
            }
            verify_field(name, spec)?;
        }

        let schema = Schema {
            name: self.name,
            fields: self.fields,
            strict: self.strict,
            validators: self.validators,
        };

        let field_count = schema.len().to_string();
        log_event_with_fields(
            Event::SchemaBuilt,
            &[
                ("fields", field_count.as_str()),
                ("schema", schema.name().unwrap_or("-")),
            ],
        );

        Ok(schema)
    }

    /// Builds the schema behind an `Arc`, ready for sharing
    pub fn build_shared(self) -> SchemaResult<Arc<Schema>> {
        self.build().map(Arc::new)
    }
}

fn verify_field(path: &str, spec: &FieldSpec) -> SchemaResult<()> {
    verify_type(path, &spec.field_type)?;

    if let Some(literal) = spec.default.as_ref().and_then(|d| d.as_literal()) {
        if !spec.field_type.accepts_literal(literal) {
            return Err(format_error(
                path,
                format!(
                    "default value {} is not of the declared type {}",
                    literal,
                    spec.field_type.type_name()
                ),
            ));
        }
    }

    Ok(())
}

fn verify_type(path: &str, field_type: &FieldType) -> SchemaResult<()> {
    match field_type {
        FieldType::Mixed(candidates) => {
            if candidates.is_empty() {
                return Err(format_error(path, "mixed type must have at least one candidate"));
            }
            candidates.iter().try_for_each(|c| verify_type(path, c))
        }
        FieldType::Array(element) => verify_type(path, element),
        // Nested schemas were checked when they were built; dynamic types
        // are only checked once a document selects them.
        FieldType::Primitive(_) | FieldType::Schema(_) | FieldType::Dynamic(_) => Ok(()),
    }
}

fn format_error(path: &str, reason: impl Into<String>) -> SchemaError {
    let err = SchemaError::format(path, reason);
    let message = err.to_string();
    log_event_with_fields(Event::SchemaFormatError, &[("error", message.as_str())]);
    err
}
