//! Type resolution
//!
//! Turns a declared field type into the concrete descriptor to check a value
//! against. Only dynamic types need work: the resolver function is called
//! with the mapping that holds the field, and its answer is used for this
//! one check. Resolution is single-level: the answer must not be, or hold
//! through unions and arrays, another dynamic type.

use std::borrow::Cow;

use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};
use super::types::FieldType;
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry, Severity};

/// Resolves `field_type` for a value held by `parent` at `path`.
///
/// The returned descriptor is never `FieldType::Dynamic`.
///
/// # Errors
///
/// Returns `SchemaError::Format` at `path` when a dynamic type resolves to
/// another dynamic type, directly or as a union candidate or array element.
pub fn resolve<'a>(
    field_type: &'a FieldType,
    parent: &Map<String, Value>,
    path: &str,
    metrics: Option<&MetricsRegistry>,
) -> SchemaResult<Cow<'a, FieldType>> {
    let FieldType::Dynamic(dynamic) = field_type else {
        return Ok(Cow::Borrowed(field_type));
    };

    let resolved = dynamic.resolve(parent);
    if let Some(metrics) = metrics {
        metrics.increment_dynamic_resolutions();
    }

    if contains_dynamic(&resolved) {
        let err = SchemaError::format(path, "dynamic type resolved to another dynamic type");
        let message = err.to_string();
        log_event_with_fields(Event::SchemaFormatError, &[("error", message.as_str())]);
        return Err(err);
    }

    if Logger::enabled(Severity::Trace) {
        let type_name = resolved.type_name();
        log_event_with_fields(
            Event::DynamicTypeResolved,
            &[("path", path), ("type", type_name.as_str())],
        );
    }

    Ok(Cow::Owned(resolved))
}

/// Whether a resolved descriptor still holds a dynamic type outside of any
/// nested schema. Fields of a nested schema are resolved against that
/// schema's own documents, so the walk stops there.
fn contains_dynamic(field_type: &FieldType) -> bool {
    match field_type {
        FieldType::Dynamic(_) => true,
        FieldType::Mixed(candidates) => candidates.iter().any(contains_dynamic),
        FieldType::Array(element) => contains_dynamic(element),
        FieldType::Primitive(_) | FieldType::Schema(_) => false,
    }
}
