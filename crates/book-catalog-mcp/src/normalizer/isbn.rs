//! ISBN classification from mixed identifier lists.

use serde_json::Value;

/// ISBN length class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsbnKind {
    /// 10 characters, mod-11 check digit.
    Isbn10,
    /// 13 digits, mod-10 check digit.
    Isbn13,
}

/// ISBNs found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Isbns {
    /// First ISBN-10 seen.
    pub isbn10: Option<String>,
    /// First ISBN-13 seen.
    pub isbn13: Option<String>,
}

/// Strip hyphens and whitespace; uppercase a trailing `x`.
#[must_use]
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn isbn10_checksum_ok(isbn: &[u8]) -> bool {
    let sum: u32 = isbn
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let digit = if b == b'X' { 10 } else { u32::from(b - b'0') };
            digit * (10 - i as u32)
        })
        .sum();
    sum % 11 == 0
}

fn isbn13_checksum_ok(isbn: &[u8]) -> bool {
    let sum: u32 = isbn
        .iter()
        .enumerate()
        .map(|(i, &b)| u32::from(b - b'0') * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    sum % 10 == 0
}

/// Classify an already-cleaned candidate by length and format.
#[must_use]
pub fn classify(candidate: &str, validate_checksum: bool) -> Option<IsbnKind> {
    let bytes = candidate.as_bytes();
    match bytes.len() {
        10 => {
            let (body, check) = bytes.split_at(9);
            let well_formed = body.iter().all(u8::is_ascii_digit)
                && (check[0].is_ascii_digit() || check[0] == b'X');
            (well_formed && (!validate_checksum || isbn10_checksum_ok(bytes)))
                .then_some(IsbnKind::Isbn10)
        }
        13 => {
            let well_formed = bytes.iter().all(u8::is_ascii_digit);
            (well_formed && (!validate_checksum || isbn13_checksum_ok(bytes)))
                .then_some(IsbnKind::Isbn13)
        }
        _ => None,
    }
}

fn candidate(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(clean(s)),
        Value::Number(n) => n.as_u64().map(|v| v.to_string()),
        _ => None,
    }
}

/// Scan identifier values (strings, numbers, or sequences of those) in order.
///
/// The first valid candidate of each length wins; everything else is ignored.
pub fn collect<'a>(values: impl IntoIterator<Item = &'a Value>, validate_checksum: bool) -> Isbns {
    let mut found = Isbns::default();

    let flattened = values.into_iter().flat_map(|value| match value {
        Value::Array(items) => items.iter().collect::<Vec<_>>(),
        other => vec![other],
    });

    for value in flattened {
        let Some(candidate) = candidate(value) else { continue };
        match classify(&candidate, validate_checksum) {
            Some(IsbnKind::Isbn10) if found.isbn10.is_none() => found.isbn10 = Some(candidate),
            Some(IsbnKind::Isbn13) if found.isbn13.is_none() => found.isbn13 = Some(candidate),
            _ => {}
        }
        if found.isbn10.is_some() && found.isbn13.is_some() {
            break;
        }
    }

    found
}
