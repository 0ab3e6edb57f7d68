//! Structured JSON logger
//!
//! One JSON object per line: `event`, then `severity`, then the caller's
//! fields sorted by key. ERROR and above go to stderr, the rest to stdout.
//! Events below the process-wide threshold are dropped before rendering.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Per-field resolution detail
    Trace = 0,
    /// Schema and validation outcomes
    Info = 1,
    Warn = 2,
    /// Broken schema definitions
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_level(level: u8) -> Self {
        match level {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Warn as u8);

/// Process-wide structured logger
pub struct Logger;

impl Logger {
    /// Set the lowest severity that is written
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// The lowest severity that is written
    pub fn min_severity() -> Severity {
        Severity::from_level(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Whether events at `severity` are currently written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Write one event line if `severity` passes the threshold
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        let line = render(severity, event, fields);
        // A failed log write never affects validation
        let _ = if severity >= Severity::Error {
            io::stderr().lock().write_all(line.as_bytes())
        } else {
            io::stdout().lock().write_all(line.as_bytes())
        };
    }
}

fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
    sorted.sort_by_key(|(key, _)| *key);

    let mut line = format!(
        "{{\"event\":{},\"severity\":\"{}\"",
        quoted(event),
        severity
    );
    for (key, value) in sorted {
        line.push(',');
        line.push_str(&quoted(key));
        line.push(':');
        line.push_str(&quoted(value));
    }
    line.push_str("}\n");
    line
}

fn quoted(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}
