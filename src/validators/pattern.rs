//! Regex-backed string validators: `matches`, `is_email`, `is_url`

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::{fail, FieldValidator};
use crate::schema::{SchemaError, SchemaResult};

const URL_PATTERN: &str = concat!(
    r"^(?:http|ftp)s?://",
    r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|",
    r"localhost|",
    r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
    r"(?::\d+)?",
    r"(?:/?|[/?]\S+)$",
);

/// String value must match `pattern` starting at its first character.
///
/// # Errors
///
/// Returns `SchemaError::InvalidPattern` if the pattern does not compile.
pub fn matches(pattern: &str) -> SchemaResult<FieldValidator> {
    let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| SchemaError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    let pattern = pattern.to_string();

    Ok(FieldValidator::named("matches", move |value| {
        let Some(s) = value.as_str() else {
            return fail(not_a_string(value));
        };
        if regex.is_match(s) {
            Ok(())
        } else {
            fail(format!("{} does not match the pattern {:?}", value, pattern))
        }
    }))
}

/// String value must look like an email address
pub fn is_email() -> FieldValidator {
    FieldValidator::named("is_email", |value| {
        let Some(s) = value.as_str() else {
            return fail(not_a_string(value));
        };
        if looks_like_email(s) {
            Ok(())
        } else {
            fail(format!("{} is not a valid email address", value))
        }
    })
}

/// String value must be an http(s) or ftp(s) URL
pub fn is_url() -> FieldValidator {
    FieldValidator::named("is_url", |value| {
        let Some(s) = value.as_str() else {
            return fail(not_a_string(value));
        };
        if url_regex().is_match(s) {
            Ok(())
        } else {
            fail(format!("{} is not a valid URL", value))
        }
    })
}

fn looks_like_email(s: &str) -> bool {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| Regex::new(r"^\S+@\S+$").expect("email shape pattern compiles"));

    shape.is_match(s)
        && !s.starts_with('.')
        && !s.ends_with('.')
        && !s.contains(".@")
        && !s.contains("@.")
        && !s.contains("..")
}

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        RegexBuilder::new(URL_PATTERN)
            .case_insensitive(true)
            .build()
            .expect("url pattern compiles")
    })
}

fn not_a_string(value: &Value) -> String {
    format!("{} is not a string", value)
}
