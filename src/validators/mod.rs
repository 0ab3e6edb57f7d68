//! Field validator combinators
//!
//! A field validator is a pure function over a single, already type-checked
//! field value. It never sees sibling fields or the document root, keeps no
//! internal state, and may be called any number of times per validation run.
//!
//! Built-in factories close over their parameters:
//!
//! ```ignore
//! use schemer::validators::{gte, one_of};
//!
//! let non_negative = gte(0);
//! let category = one_of(["cooking", "politics"]);
//! ```

mod collection;
mod compare;
mod pattern;

pub use collection::{distinct, each_item, length, one_of};
pub use compare::{between, gt, gte, lt, lte};
pub use pattern::{is_email, is_url, matches};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Why a validator rejected a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// One message for the whole field
    Message(String),
    /// Messages for individual elements of a sequence, keyed by index.
    /// Reported at `<field>.<index>`.
    Items(BTreeMap<usize, String>),
}

impl Violation {
    /// Single-line summary, used when a per-item violation has to be
    /// folded into one message.
    pub fn summary(&self) -> String {
        match self {
            Violation::Message(message) => message.clone(),
            Violation::Items(items) => items
                .iter()
                .map(|(i, m)| format!("item {}: {}", i, m))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

type CheckFn = dyn Fn(&Value) -> Result<(), Violation> + Send + Sync;

/// A named, shareable field validator.
#[derive(Clone)]
pub struct FieldValidator {
    name: &'static str,
    check: Arc<CheckFn>,
}

impl FieldValidator {
    /// Wrap a function following the plain contract: `None` when the value
    /// is valid, a message when it is not.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self::named("custom", move |value| match f(value) {
            Some(message) => Err(Violation::Message(message)),
            None => Ok(()),
        })
    }

    /// Wrap a function that may report per-item violations.
    pub fn named<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&Value) -> Result<(), Violation> + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(f),
        }
    }

    /// Validator name, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the validator against a value
    pub fn check(&self, value: &Value) -> Result<(), Violation> {
        (self.check)(value)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldValidator({})", self.name)
    }
}

/// Shorthand for a failed check carrying one message
pub(crate) fn fail(message: String) -> Result<(), Violation> {
    Err(Violation::Message(message))
}
