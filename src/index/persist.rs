use std::fs;
use std::path::Path;

/// What: Rewrite the index file as indented JSON, keeping key order.
///
/// Inputs:
/// - `path`: Index file to reformat in place.
///
/// Output:
/// - `Ok(())` after the file was rewritten.
///
/// Details:
/// - Works on an untyped document so fields the selector ignores survive.
/// - Key order is kept through serde_json's `preserve_order` feature.
///
/// # Errors
/// - Read, parse and write failures propagate.
pub fn format_index_file(path: &Path) -> crate::Result<()> {
    let body = fs::read_to_string(path)?;
    let doc: serde_json::Value = serde_json::from_str(&body)?;
    crate::util::write_json_file(path, &doc)?;
    tracing::info!(path = %path.display(), "index reformatted");
    Ok(())
}
