//! Version identifiers.
//!
//! Versions are decimal numbers zero-padded to three digits. Ordering is
//! numeric, so `"1000"` sorts after `"999"`; tokens that are not numbers sort
//! after every numeric one, in string order.

use std::cmp::Ordering;

/// Identifier of the first snapshot of a project
pub const FIRST_VERSION: &str = "001";

/// Numeric value of a version token, if it is all ASCII digits
pub fn parse(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Zero-pad a version number to three digits
pub fn format(number: u64) -> String {
    format!("{number:03}")
}

/// The identifier following the largest numeric token
///
/// A token too large to be incremented is ignored.
pub fn next_after<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .filter_map(parse)
        .filter_map(|number| number.checked_add(1))
        .max()
        .map(format)
        .unwrap_or_else(|| FIRST_VERSION.to_string())
}

/// Order two tokens: numeric ones by value first, then the rest as strings
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort tokens in place using [`compare`]
pub fn sort(tokens: &mut [String]) {
    tokens.sort_by(|a, b| compare(a, b));
}
