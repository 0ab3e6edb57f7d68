//! Membership and sequence validators: `one_of`, `length`, `each_item`, `distinct`

use std::collections::BTreeMap;

use serde_json::Value;

use super::{fail, FieldValidator, Violation};

/// Value must equal one of the given items
pub fn one_of<I, T>(items: I) -> FieldValidator
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    let items: Vec<Value> = items.into_iter().map(Into::into).collect();
    FieldValidator::named("one_of", move |value| {
        if items.contains(value) {
            Ok(())
        } else {
            fail(format!("{} is not in the list {}", value, Value::Array(items.clone())))
        }
    })
}

/// Length of a string (in characters), array or object must lie within the
/// given bounds. A bound of `None` or zero is not enforced.
pub fn length(min: Option<usize>, max: Option<usize>) -> FieldValidator {
    let min = min.filter(|m| *m > 0);
    let max = max.filter(|m| *m > 0);
    FieldValidator::named("length", move |value| {
        let len = match value {
            Value::String(s) => s.chars().count(),
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => return fail(format!("{} has no length", value)),
        };
        if let Some(min) = min {
            if len < min {
                return fail(format!("{} does not have a length of at least {}", value, min));
            }
        }
        if let Some(max) = max {
            if len > max {
                return fail(format!("{} does not have a length of at most {}", value, max));
            }
        }
        Ok(())
    })
}

/// Applies the given validators to every element of a sequence. Each failing
/// element is reported separately with the first message its validators
/// produced.
pub fn each_item(validators: impl IntoIterator<Item = FieldValidator>) -> FieldValidator {
    let validators: Vec<FieldValidator> = validators.into_iter().collect();
    FieldValidator::named("each_item", move |value| {
        let Some(items) = value.as_array() else {
            return fail(format!("{} is not a list", value));
        };

        let mut failures = BTreeMap::new();
        for (i, item) in items.iter().enumerate() {
            if let Some(violation) = validators.iter().find_map(|v| v.check(item).err()) {
                failures.insert(i, violation.summary());
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Violation::Items(failures))
        }
    })
}

/// Sequence must not contain duplicate elements
pub fn distinct() -> FieldValidator {
    FieldValidator::named("distinct", |value| {
        let Some(items) = value.as_array() else {
            return fail(format!("{} is not a list", value));
        };
        let has_duplicate = items
            .iter()
            .enumerate()
            .any(|(i, item)| items[i + 1..].contains(item));
        if has_duplicate {
            fail(format!("{} is not a distinct set of values", value))
        } else {
            Ok(())
        }
    })
}
