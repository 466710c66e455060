//! Configuration file parsing utilities.
//!
//! Helpers for the `key = value` format used by `selector.conf`: comment
//! skipping, key normalisation, inline comment stripping, and the list and
//! boolean value shapes the selector settings accept.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character.
/// - The key is lower-cased with `.`, `-` and spaces folded to `_`, so
///   `Max-App-Age` and `max_app_age` name the same setting.
/// - Inline comments are removed from the value before trimming.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let (raw_key, raw_value) = trimmed.split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    let value = strip_inline_comment(raw_value.trim()).to_string();
    Some((key, value))
}

/// Remove a trailing `//` or `#` comment from a value.
#[must_use]
pub fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    if let Some(i) = s.find('#') {
        s = &s[..i];
    }
    s.trim()
}

/// What: Split a comma-separated setting value into its entries.
///
/// Inputs:
/// - `value`: Raw value such as `Games, Science & Education`
///
/// Output:
/// - Trimmed, non-empty entries in their original order.
#[must_use]
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// What: Interpret a boolean-ish setting value.
///
/// Inputs:
/// - `value`: Raw value (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
///
/// Output:
/// - `Some(bool)` for recognised spellings, `None` otherwise.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
