//! Default application
//!
//! Fills missing fields that declare a default. Nested documents, directly
//! or as elements of an array of documents, get their own defaults filled
//! recursively, including documents that were themselves just produced by a
//! default. Dynamically typed fields are never descended into.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::definition::Schema;
use super::types::FieldType;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Default-application engine bound to one root schema.
pub struct DefaultApplier<'a> {
    schema: &'a Schema,
    now: DateTime<Utc>,
    metrics: Option<&'a MetricsRegistry>,
}

impl<'a> DefaultApplier<'a> {
    /// Creates an applier reading the current time for clock defaults.
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            now: Utc::now(),
            metrics: None,
        }
    }

    /// Use `now` as the clock reading for clock-based defaults
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Record how many fields were filled in `metrics`
    pub fn with_metrics(mut self, metrics: &'a MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fills defaults into `document` in place and returns the number of
    /// fields that were filled. Anything other than a mapping is left alone.
    pub fn apply(&self, document: &mut Value) -> usize {
        let filled = match document.as_object_mut() {
            Some(doc) => self.apply_to_document(self.schema, doc),
            None => 0,
        };

        if let Some(metrics) = self.metrics {
            metrics.add_defaults_applied(filled as u64);
        }
        let count = filled.to_string();
        log_event_with_fields(
            Event::DefaultsApplied,
            &[("filled", count.as_str()), ("schema", self.schema.name().unwrap_or("-"))],
        );

        filled
    }

    fn apply_to_document(&self, schema: &Schema, doc: &mut Map<String, Value>) -> usize {
        let mut filled = 0;

        for (field_name, spec) in schema.fields() {
            if !doc.contains_key(field_name) {
                let Some(default) = &spec.default else {
                    continue;
                };
                doc.insert(field_name.to_string(), default.produce(self.now));
                filled += 1;
            }
            // Freshly defaulted documents are descended like pre-existing ones
            let Some(value) = doc.get_mut(field_name) else {
                continue;
            };

            match &spec.field_type {
                FieldType::Schema(nested) => {
                    if let Some(nested_doc) = value.as_object_mut() {
                        filled += self.apply_to_document(nested, nested_doc);
                    }
                }
                FieldType::Array(element) => {
                    if let (FieldType::Schema(nested), Some(items)) = (element.as_ref(), value.as_array_mut()) {
                        for item in items.iter_mut() {
                            if let Some(item_doc) = item.as_object_mut() {
                                filled += self.apply_to_document(nested, item_doc);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        filled
    }
}
