//! Metrics registry
//!
//! - Counters only (no gauges, no histograms)
//! - Monotonic increase
//! - Thread-safe but lock-minimal

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for validation and default application.
///
/// All counters use atomic operations with Relaxed ordering, so one
/// registry can be shared by validators running on many threads.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Validation calls completed
    validations_run: AtomicU64,
    /// Validation calls that produced a non-empty report
    validations_failed: AtomicU64,
    /// Report entries produced across all failed validations
    errors_reported: AtomicU64,
    /// Fields filled by default application
    defaults_applied: AtomicU64,
    /// Dynamic type resolutions performed
    dynamic_resolutions: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Validation metrics

    /// Increment validations run
    pub fn increment_validations(&self) {
        self.validations_run.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment failed validations
    pub fn increment_validations_failed(&self) {
        self.validations_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Add to the number of report entries produced
    pub fn add_errors_reported(&self, count: u64) {
        self.errors_reported.fetch_add(count, Ordering::Relaxed);
    }

    /// Increment dynamic type resolutions
    pub fn increment_dynamic_resolutions(&self) {
        self.dynamic_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    // Default metrics

    /// Add to the number of fields filled by defaults
    pub fn add_defaults_applied(&self, count: u64) {
        self.defaults_applied.fetch_add(count, Ordering::Relaxed);
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"validations_run":{},"validations_failed":{},"errors_reported":{},"defaults_applied":{},"dynamic_resolutions":{}}}"#,
            s.validations_run,
            s.validations_failed,
            s.errors_reported,
            s.defaults_applied,
            s.dynamic_resolutions,
        )
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            validations_run: self.validations_run.load(Ordering::Relaxed),
            validations_failed: self.validations_failed.load(Ordering::Relaxed),
            errors_reported: self.errors_reported.load(Ordering::Relaxed),
            defaults_applied: self.defaults_applied.load(Ordering::Relaxed),
            dynamic_resolutions: self.dynamic_resolutions.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub validations_run: u64,
    pub validations_failed: u64,
    pub errors_reported: u64,
    pub defaults_applied: u64,
    pub dynamic_resolutions: u64,
}
