//! Observability subsystem
//!
//! - Structured logging (JSON lines, filtered by a process-wide threshold)
//! - Atomic counters for validation and default application
//! - Typed events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use schemer::observability::{Logger, MetricsRegistry, Severity};
//! use schemer::schema::SchemaValidator;
//!
//! Logger::set_min_severity(Severity::Info);
//!
//! let metrics = MetricsRegistry::new();
//! SchemaValidator::new(&schema).with_metrics(&metrics).validate(&doc)?;
//! println!("{}", metrics.to_json());
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event at its own severity, with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
