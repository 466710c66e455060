//! Small utility helpers for config parsing, file naming and JSON output.

pub mod config;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// What: Title-case a display name the way the APK file names expect.
///
/// Inputs:
/// - `input`: Display name, e.g. `k-9 mail` or `OpenTracks`.
///
/// Output:
/// - Name where the first letter of every run of cased letters is upper-cased
///   and the rest of the run lower-cased (`K-9 Mail`, `Opentracks`).
///
/// Details:
/// - Only letters with case form a run. Digits, spaces, punctuation and uncased
///   letters such as CJK all start a new one, so `9lives` becomes `9Lives`,
///   `don't` becomes `Don'T` and `日本a` becomes `日本A`.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for ch in input.chars() {
        if ch.is_uppercase() || ch.is_lowercase() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// What: Serialize `data` as pretty JSON with four-space indentation.
///
/// Inputs:
/// - `data`: Any serializable value.
///
/// Output:
/// - The JSON text, or the serializer error.
///
/// # Errors
/// - Returns the serializer error when `data` cannot be represented as JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// What: Write `data` to `path` as pretty JSON, replacing any previous file.
///
/// Inputs:
/// - `path`: Destination file.
/// - `data`: Value to serialize.
///
/// Output:
/// - `Ok(())` once the whole file is written.
///
/// Details:
/// - Creates the parent directory when it does not exist yet.
/// - The write is a plain overwrite; a crash mid-write leaves a partial file.
///
/// # Errors
/// - Returns serialization and I/O errors unchanged.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, data: &T) -> crate::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let body = to_pretty_json(data)?;
    fs::write(path, body)?;
    tracing::debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

/// What: Read a JSON file back into a typed value.
///
/// Inputs:
/// - `path`: File previously written by [`write_json_file`] or any JSON file.
///
/// Output:
/// - The deserialized value.
///
/// # Errors
/// - Returns I/O errors and JSON syntax/shape errors unchanged.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> crate::Result<T> {
    let body = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&body)?)
}

/// What: Format a coverage value the way the LaTeX tables print numbers.
///
/// Inputs:
/// - `value`: Maximum coverage, `None` when no data contributed.
///
/// Output:
/// - `"0"` for `None`; otherwise the shortest float representation that always
///   carries a decimal point (`50.0`, `45.25`).
#[must_use]
pub fn format_coverage(value: Option<f64>) -> String {
    value.map_or_else(|| "0".to_string(), |v| format!("{v:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Title-casing follows letter runs rather than whitespace.
    ///
    /// Inputs:
    /// - Names with digits, hyphens, apostrophes, mixed case and uncased CJK letters.
    ///
    /// Output:
    /// - Each run of cased letters starts upper-case and continues lower-case.
    fn util_title_case_letter_runs() {
        assert_eq!(title_case("k-9 mail"), "K-9 Mail");
        assert_eq!(title_case("OpenTracks"), "Opentracks");
        assert_eq!(title_case("9lives"), "9Lives");
        assert_eq!(title_case("don't panic"), "Don'T Panic");
        assert_eq!(title_case("日本a app"), "日本A App");
        assert_eq!(title_case("ÉCRAN noir"), "Écran Noir");
        assert_eq!(title_case(""), "");
    }

    #[test]
    /// What: Pretty JSON uses four-space indentation and keeps key order.
    ///
    /// Inputs:
    /// - A small object built with `json!` (order preserved by serde_json).
    ///
    /// Output:
    /// - Text with four-space indented keys in insertion order.
    fn util_pretty_json_indent() {
        let value = serde_json::json!({"zeta": 1, "alpha": [true]});
        let text = to_pretty_json(&value).expect("serializable");
        assert_eq!(
            text,
            "{\n    \"zeta\": 1,\n    \"alpha\": [\n        true\n    ]\n}"
        );
    }

    #[test]
    /// What: Coverage numbers print with a decimal point, missing as `0`.
    ///
    /// Inputs:
    /// - `None`, whole and fractional values.
    ///
    /// Output:
    /// - `0`, `50.0`, `45.25`.
    fn util_format_coverage_python_style() {
        assert_eq!(format_coverage(None), "0");
        assert_eq!(format_coverage(Some(50.0)), "50.0");
        assert_eq!(format_coverage(Some(45.25)), "45.25");
    }

    #[test]
    /// What: JSON files round-trip through write and read.
    ///
    /// Inputs:
    /// - Nested vector written into a fresh temp directory subfolder.
    ///
    /// Output:
    /// - The parent directory is created and the value reads back equal.
    fn util_json_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("values.json");
        let data = vec![vec![1_u32, 2], vec![3]];
        write_json_file(&path, &data).expect("write");
        let back: Vec<Vec<u32>> = read_json_file(&path).expect("read");
        assert_eq!(back, data);
    }
}
