//! Path-keyed validation error report
//!
//! Keys are dotted paths (`author.first_name`, `line_items.2.price`); the
//! root document itself is the empty path. When two problems land on the same
//! path the first message recorded is kept.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Collection of validation messages produced by one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    errors: BTreeMap<String, String>,
}

impl ErrorReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message at a path. Returns false if the path already held
    /// a message, in which case the earlier message is kept.
    pub fn record(&mut self, path: impl Into<String>, message: impl Into<String>) -> bool {
        match self.errors.entry(path.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(message.into());
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Merges another report into this one, keeping existing messages on
    /// conflicting paths.
    pub fn merge(&mut self, other: ErrorReport) {
        for (path, message) in other.errors {
            self.record(path, message);
        }
    }

    /// Returns the message recorded at a path
    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// Whether a message exists at a path
    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    /// Number of paths with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when the validated document had no problems
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All error paths, in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Iterate over `(path, message)` pairs in sorted path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(p, m)| (p.as_str(), m.as_str()))
    }

    /// Consume the report into its underlying map
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.errors
    }
}

impl IntoIterator for ErrorReport {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", path, message)?;
        }
        Ok(())
    }
}

/// Creates a field path from prefix and field name.
pub(crate) fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Creates an element path from an array path and index.
pub(crate) fn index_path(prefix: &str, index: usize) -> String {
    if prefix.is_empty() {
        index.to_string()
    } else {
        format!("{}.{}", prefix, index)
    }
}
