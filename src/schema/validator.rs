//! Schema validator for documents
//!
//! Validation semantics:
//! - Every problem is collected; a call fails once with the complete report
//! - Required fields must be present
//! - Present nulls are accepted only on nullable fields
//! - Field types match exactly, no coercion
//! - Nested schemas and array elements report under the field's path
//! - Content validators run only on values that passed the type check, and
//!   the first failing validator is the one reported
//! - Strict schemas reject undeclared fields
//!
//! The validator does not mutate documents.

use serde_json::{Map, Value};

use super::definition::Schema;
use super::errors::{SchemaError, SchemaResult};
use super::report::{index_path, make_path, ErrorReport};
use super::resolver::resolve;
use super::types::{FieldSpec, FieldType, Primitive};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::validators::{FieldValidator, Violation};

/// Validation engine bound to one root schema.
///
/// Holds no per-document state, so one validator can check any number of
/// documents, including from several threads.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
    metrics: Option<&'a MetricsRegistry>,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator for the given schema.
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            metrics: None,
        }
    }

    /// Record validation counters in `metrics`
    pub fn with_metrics(mut self, metrics: &'a MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validates a document against the schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` with the full report if any
    /// problem was found, or `SchemaError::Format` if a dynamic type could
    /// not be resolved into a usable descriptor.
    pub fn validate(&self, document: &Value) -> SchemaResult<()> {
        let report = self.report(document)?;
        if report.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::validation_failed(report))
        }
    }

    /// Validates a document and returns the report, empty when valid.
    pub fn report(&self, document: &Value) -> SchemaResult<ErrorReport> {
        let mut report = ErrorReport::new();
        self.validate_document(self.schema, document, "", &mut report)?;
        self.observe(&report);
        Ok(report)
    }

    fn observe(&self, report: &ErrorReport) {
        if let Some(metrics) = self.metrics {
            metrics.increment_validations();
            if !report.is_empty() {
                metrics.increment_validations_failed();
                metrics.add_errors_reported(report.len() as u64);
            }
        }

        let schema = self.schema.name().unwrap_or("-");
        if report.is_empty() {
            log_event_with_fields(Event::ValidationPassed, &[("schema", schema)]);
        } else {
            let count = report.len().to_string();
            let first = report.paths().next().unwrap_or("");
            log_event_with_fields(
                Event::ValidationFailed,
                &[("errors", count.as_str()), ("first_path", first), ("schema", schema)],
            );
        }
    }

    /// Validates a mapping against a schema, recording errors under `path`.
    fn validate_document(
        &self,
        schema: &Schema,
        value: &Value,
        path: &str,
        report: &mut ErrorReport,
    ) -> SchemaResult<()> {
        let Some(doc) = value.as_object() else {
            report.record(
                path,
                format!("expected an embedded document, got type {}", json_type_name(value)),
            );
            return Ok(());
        };

        // Document-level validators see the mapping as a whole
        apply_validators(schema.validators(), value, path, report);

        for (field_name, spec) in schema.fields() {
            let field_path = make_path(path, field_name);

            match doc.get(field_name) {
                None => {
                    if spec.required {
                        report.record(&field_path, format!("{} is required", field_path));
                    }
                }
                Some(Value::Null) => {
                    if !spec.is_nullable() {
                        report.record(&field_path, format!("{} is not nullable", field_path));
                    }
                }
                Some(field_value) => {
                    self.validate_field(field_value, spec, doc, &field_path, report)?;
                }
            }
        }

        if schema.is_strict() {
            for key in doc.keys() {
                if !schema.declares(key) {
                    report.record(
                        make_path(path, key),
                        "unexpected field not present in schema",
                    );
                }
            }
        }

        Ok(())
    }

    /// Type-checks a present, non-null field value, then runs its validators.
    fn validate_field(
        &self,
        value: &Value,
        spec: &FieldSpec,
        parent: &Map<String, Value>,
        path: &str,
        report: &mut ErrorReport,
    ) -> SchemaResult<()> {
        if self.check_value(value, &spec.field_type, parent, path, report)? {
            apply_validators(&spec.validators, value, path, report);
        }
        Ok(())
    }

    /// Checks a value against a type descriptor. Returns whether the value
    /// conformed; on failure the reasons are already in `report`.
    fn check_value(
        &self,
        value: &Value,
        field_type: &FieldType,
        parent: &Map<String, Value>,
        path: &str,
        report: &mut ErrorReport,
    ) -> SchemaResult<bool> {
        let resolved = resolve(field_type, parent, path, self.metrics)?;

        match resolved.as_ref() {
            FieldType::Primitive(primitive) => {
                if primitive.matches(value) {
                    return Ok(true);
                }
                report.record(path, type_mismatch(primitive.name(), value));
                Ok(false)
            }
            FieldType::Mixed(candidates) => {
                if candidates.is_empty() {
                    return Err(SchemaError::format(path, "mixed type must have at least one candidate"));
                }
                for candidate in candidates {
                    let mut scratch = ErrorReport::new();
                    if self.check_value(value, candidate, parent, path, &mut scratch)? {
                        return Ok(true);
                    }
                }
                let names: Vec<String> = candidates.iter().map(FieldType::type_name).collect();
                report.record(
                    path,
                    format!(
                        "expected one of types [{}], got type {}",
                        names.join(", "),
                        json_type_name(value)
                    ),
                );
                Ok(false)
            }
            FieldType::Schema(schema) => {
                let mut nested = ErrorReport::new();
                self.validate_document(schema, value, path, &mut nested)?;
                let conformed = nested.is_empty();
                report.merge(nested);
                Ok(conformed)
            }
            FieldType::Array(element) => {
                let Some(items) = value.as_array() else {
                    report.record(
                        path,
                        format!("expected an array, got type {}", json_type_name(value)),
                    );
                    return Ok(false);
                };

                let mut conformed = true;
                for (i, item) in items.iter().enumerate() {
                    let item_path = index_path(path, i);
                    if !self.check_value(item, element, parent, &item_path, report)? {
                        conformed = false;
                    }
                }
                Ok(conformed)
            }
            FieldType::Dynamic(_) => Err(SchemaError::format(
                path,
                "dynamic type resolved to another dynamic type",
            )),
        }
    }
}

/// Runs validators in order; the first violation is recorded and the rest
/// are skipped.
fn apply_validators(validators: &[FieldValidator], value: &Value, path: &str, report: &mut ErrorReport) {
    let Some(violation) = validators.iter().find_map(|v| v.check(value).err()) else {
        return;
    };

    match violation {
        Violation::Message(message) => {
            report.record(path, message);
        }
        Violation::Items(items) => {
            for (i, message) in items {
                report.record(index_path(path, i), message);
            }
        }
    }
}

fn type_mismatch(expected: &str, actual: &Value) -> String {
    format!("expected type {}, got type {}", expected, json_type_name(actual))
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Primitive::Int.name()
            } else {
                Primitive::Float.name()
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
