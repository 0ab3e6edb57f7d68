//! Ordering validators: `gte`, `lte`, `gt`, `lt`, `between`
//!
//! Numbers compare numerically (exactly when both sides are integers),
//! strings lexically and booleans false < true. Any other pairing is
//! rejected as incomparable.

use std::cmp::Ordering;

use serde_json::Value;

use super::{fail, FieldValidator};

/// Value must be greater than or equal to `min`
pub fn gte(min: impl Into<Value>) -> FieldValidator {
    let min = min.into();
    FieldValidator::named("gte", move |value| match compare(value, &min) {
        Some(Ordering::Less) => fail(format!("{} is not greater than or equal to {}", value, min)),
        Some(_) => Ok(()),
        None => fail(incomparable(value, &min)),
    })
}

/// Value must be less than or equal to `max`
pub fn lte(max: impl Into<Value>) -> FieldValidator {
    let max = max.into();
    FieldValidator::named("lte", move |value| match compare(value, &max) {
        Some(Ordering::Greater) => fail(format!("{} is not less than or equal to {}", value, max)),
        Some(_) => Ok(()),
        None => fail(incomparable(value, &max)),
    })
}

/// Value must be strictly greater than `bound`
pub fn gt(bound: impl Into<Value>) -> FieldValidator {
    let bound = bound.into();
    FieldValidator::named("gt", move |value| match compare(value, &bound) {
        Some(Ordering::Greater) => Ok(()),
        Some(_) => fail(format!("{} is not greater than {}", value, bound)),
        None => fail(incomparable(value, &bound)),
    })
}

/// Value must be strictly less than `bound`
pub fn lt(bound: impl Into<Value>) -> FieldValidator {
    let bound = bound.into();
    FieldValidator::named("lt", move |value| match compare(value, &bound) {
        Some(Ordering::Less) => Ok(()),
        Some(_) => fail(format!("{} is not less than {}", value, bound)),
        None => fail(incomparable(value, &bound)),
    })
}

/// Value must lie within `[min, max]`
pub fn between(min: impl Into<Value>, max: impl Into<Value>) -> FieldValidator {
    let min = min.into();
    let max = max.into();
    FieldValidator::named("between", move |value| {
        match compare(value, &min) {
            Some(Ordering::Less) => {
                return fail(format!("{} is not greater than or equal to {}", value, min))
            }
            None => return fail(incomparable(value, &min)),
            Some(_) => {}
        }
        match compare(value, &max) {
            Some(Ordering::Greater) => fail(format!("{} is not less than or equal to {}", value, max)),
            Some(_) => Ok(()),
            None => fail(incomparable(value, &max)),
        }
    })
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return Some(a.cmp(&b));
            }
            if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                return Some(a.cmp(&b));
            }
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn incomparable(value: &Value, bound: &Value) -> String {
    format!("{} cannot be compared with {}", value, bound)
}
