//! Type-narrowing helpers for loosely-shaped catalog documents.
//!
//! Every helper takes an ordered list of candidate field names and returns an
//! owned, validated value or nothing. A field holding `null` counts as absent.

use md5::{Digest, Md5};
use serde_json::Value;

use crate::models::SYNTHETIC_ID_PREFIX;

/// First non-null value among `names`.
pub fn first_present<'a>(doc: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().filter_map(|name| doc.get(*name)).find(|value| !value.is_null())
}

/// Non-blank trimmed string from a JSON string.
fn non_blank(value: &Value) -> Option<String> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty()).map(ToOwned::to_owned)
}

/// String-or-sequence collapse: the string itself, or the first string of a sequence.
pub fn string_field(doc: &Value, names: &[&str]) -> Option<String> {
    match first_present(doc, names)? {
        Value::Array(items) => items.iter().find_map(non_blank),
        value => non_blank(value),
    }
}

/// Sequence-or-string widening: string elements of a sequence, or a lone string
/// wrapped as one element. Anything else is an empty list.
pub fn string_list(doc: &Value, names: &[&str]) -> Vec<String> {
    match first_present(doc, names) {
        Some(Value::Array(items)) => items.iter().filter_map(non_blank).collect(),
        Some(value) => non_blank(value).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Integer value; floats and strings are not integers here.
pub fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_u64().and_then(|v| i64::try_from(v).ok()))
}

/// Identifier rendered as a string: strings are trimmed, integers stringified.
pub fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_blank(value),
        Value::Number(_) => integer(value).map(|v| v.to_string()),
        _ => None,
    }
}

/// Publication year from a number, a year string or a date string ("2004-05-01").
///
/// Sequences contribute their first element.
pub fn year_field(doc: &Value, names: &[&str]) -> Option<i32> {
    let value = match first_present(doc, names)? {
        Value::Array(items) => items.first()?,
        value => value,
    };

    match value {
        Value::Number(_) => integer(value).and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => {
            let digits: String =
                s.trim().chars().take_while(char::is_ascii_digit).take(4).collect();
            if digits.len() == 4 { digits.parse().ok() } else { None }
        }
        _ => None,
    }
}

/// Absolute http(s) URL, upgraded to https.
pub fn https_url(value: &Value) -> Option<String> {
    let mut url = url::Url::parse(value.as_str()?.trim()).ok()?;
    match url.scheme() {
        "https" => {}
        "http" => url.set_scheme("https").ok()?,
        _ => return None,
    }
    Some(url.into())
}

/// Deterministic identifier for a document that carries none.
pub fn digest_id(doc: &Value) -> String {
    let mut hasher = Md5::new();
    hasher.update(doc.to_string().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{SYNTHETIC_ID_PREFIX}{}", &digest[..16])
}
