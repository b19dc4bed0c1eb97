//! Purpose: Leaf coercers turning one text payload into one native scalar.
//! Exports: `to_string`, `to_number`, `to_boolean`, `to_null`.
//! Role: Stateless validation layer under the tag dispatcher.
//! Invariants: Payloads must be `Node::Text`; anything else is `InvalidData`.
//! Invariants: Surrounding whitespace is trimmed before any check.
//! Invariants: Coercers never swallow errors; callers decide whether to drop.
use serde_json::{Number, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::error::{Error, ErrorKind};
use crate::core::node::Node;

const TRUE_WORDS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];
const FALSE_WORDS: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn payload_text<'a>(node: &'a Node, expected: &str) -> Result<&'a str, Error> {
    node.as_text().ok_or_else(|| {
        Error::new(ErrorKind::InvalidData).with_message(format!(
            "{expected} payload must be a string, found {}",
            node.kind_name()
        ))
    })
}

/// Trimmed text, or Unix seconds when the text is a complete RFC 3339 timestamp.
pub fn to_string(node: &Node) -> Result<Value, Error> {
    let text = payload_text(node, "string")?.trim();
    if text.is_empty() {
        return Err(Error::new(ErrorKind::EmptyData).with_message("string payload is empty"));
    }
    if let Some(seconds) = unix_seconds(text) {
        return Ok(Value::from(seconds));
    }
    Ok(Value::String(text.to_string()))
}

/// Strict RFC 3339: uppercase `T` and `Z` (or a `±HH:MM` offset), no leap second.
fn unix_seconds(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    if bytes.len() < 20 || bytes[10] != b'T' || &bytes[17..19] == b"60" {
        return None;
    }
    let len = bytes.len();
    let zoned = bytes[len - 1] == b'Z'
        || (len >= 25 && matches!(bytes[len - 6], b'+' | b'-') && bytes[len - 3] == b':');
    if !zoned {
        return None;
    }
    OffsetDateTime::parse(text, &Rfc3339)
        .ok()
        .map(|ts| ts.unix_timestamp())
}

/// Parses a base-10 float after stripping whitespace and then leading zeros.
///
/// The zero strip applies to the whole string, so `"0"` is empty and `"0.5"`
/// parses from `".5"`. Integral results within the exact f64 range are
/// emitted as JSON integers, so `"011"` renders as `11`.
pub fn to_number(node: &Node) -> Result<Value, Error> {
    let text = payload_text(node, "number")?
        .trim()
        .trim_start_matches('0');
    if text.is_empty() {
        return Err(Error::new(ErrorKind::EmptyData).with_message("number payload is empty"));
    }
    let parsed = text.parse::<f64>().map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("invalid number {text:?}"))
            .with_source(err)
    })?;
    if parsed.fract() == 0.0 && parsed.abs() <= MAX_EXACT_INTEGER {
        return Ok(Value::from(parsed as i64));
    }
    Number::from_f64(parsed).map(Value::Number).ok_or_else(|| {
        Error::new(ErrorKind::Parse).with_message(format!("number {text:?} is not finite"))
    })
}

pub fn to_boolean(node: &Node) -> Result<bool, Error> {
    let text = payload_text(node, "boolean")?.trim();
    if TRUE_WORDS.contains(&text) {
        return Ok(true);
    }
    if FALSE_WORDS.contains(&text) {
        return Ok(false);
    }
    Err(Error::new(ErrorKind::InvalidData).with_message(format!("invalid boolean {text:?}")))
}

/// Null succeeds only when the payload is an affirmed boolean.
pub fn to_null(node: &Node) -> Result<Value, Error> {
    match to_boolean(node) {
        Ok(true) => Ok(Value::Null),
        Ok(false) => Err(Error::new(ErrorKind::InvalidData)
            .with_message("null payload must be a true boolean")),
        Err(err) => Err(Error::new(ErrorKind::InvalidData)
            .with_message("null payload must be a true boolean")
            .with_source(err)),
    }
}
