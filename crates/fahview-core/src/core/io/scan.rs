//! Stateless string scanning primitives.
//!
//! The span functions return byte ranges into their input so callers can keep
//! scanning from where the previous match ended without copying; each has a
//! convenience form that returns the matched `&str` directly. None of these
//! functions validate anything: a missing delimiter is reported as `None` and
//! the caller decides whether that is an error.

use std::ops::Range;

/// Locates the text strictly between `header` and `footer`.
///
/// The first `header` at or after `from` is found, then the first `footer` at
/// or after the end of that header. Both delimiters are excluded from the
/// returned range.
///
/// # Return
///
/// Returns `None` if `from` is out of bounds or either delimiter is absent.
pub fn between_span(text: &str, header: &str, footer: &str, from: usize) -> Option<Range<usize>> {
    let start = text.get(from..)?.find(header)? + from + header.len();
    let end = text[start..].find(footer)? + start;
    Some(start..end)
}

/// Returns the first substring between `header` and `footer`.
pub fn between<'a>(text: &'a str, header: &str, footer: &str) -> Option<&'a str> {
    between_from(text, header, footer, 0)
}

/// Returns the first substring between `header` and `footer` at or after `from`.
pub fn between_from<'a>(text: &'a str, header: &str, footer: &str, from: usize) -> Option<&'a str> {
    between_span(text, header, footer, from).map(|range| &text[range])
}

/// Splits `text` on every occurrence of `delimiter`.
///
/// Empty tokens are kept and the final token runs to the end of the input, so
/// `n` delimiters always yield `n + 1` tokens.
pub fn explode(text: &str, delimiter: char) -> Vec<&str> {
    text.split(delimiter).collect()
}

/// Splits `text` on `delimiter` and trims every token of `trim_chars`.
pub fn explode_and_trim<'a>(text: &'a str, delimiter: char, trim_chars: &str) -> Vec<&'a str> {
    text.split(delimiter)
        .map(|token| trim(token, trim_chars))
        .collect()
}

/// Strips every leading and trailing character that occurs in `trim_chars`.
///
/// A string made only of trim characters collapses to `""`.
pub fn trim<'a>(text: &'a str, trim_chars: &str) -> &'a str {
    text.trim_matches(|c| trim_chars.contains(c))
}

/// Returns `true` if the first `b.len()` bytes of `a` equal `b`.
pub fn starts_with(a: &str, b: &str) -> bool {
    a.as_bytes().get(..b.len()) == Some(b.as_bytes())
}
