//! Coercion of raw attribute strings into typed JSON scalars.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::tree::Attributes;
use crate::tree::AttributeValue;

/// JSON number literal without a leading `+` or redundant leading zeros.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(0|[1-9]\d*)(\.\d+)?([eE][+-]?\d+)?$").expect("valid regex")
});

/// Parse a raw string as a JSON number, if it is written as one.
#[must_use]
pub fn parse_number(raw: &str) -> Option<Number> {
    if !NUMBER_PATTERN.is_match(raw) {
        return None;
    }
    serde_json::from_str::<Number>(raw).ok()
}

/// Coerce a raw attribute string into a boolean, number or string.
///
/// # Examples
/// ```
/// use draft_parser::value::coerce_scalar;
/// use serde_json::json;
///
/// assert_eq!(coerce_scalar("true"), json!(true));
/// assert_eq!(coerce_scalar("2"), json!(2));
/// assert_eq!(coerce_scalar("007"), json!("007"));
/// assert_eq!(coerce_scalar("Intro"), json!("Intro"));
/// ```
#[must_use]
pub fn coerce_scalar(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => parse_number(raw)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
    }
}

/// Coerce the raw string attributes of a node into a JSON object,
/// skipping the keys in `skip`.
#[must_use]
pub fn coerce_attributes(attributes: &Attributes, skip: &[&str]) -> Map<String, Value> {
    attributes
        .iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .filter_map(|(key, value)| match value {
            AttributeValue::Text(raw) => Some((key.clone(), coerce_scalar(raw))),
            _ => None,
        })
        .collect()
}
