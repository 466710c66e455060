//! Directory layout of a results tree.
//!
//! ```text
//! <base>/<App_Name_Id>/Droid_Traversal/results_raw.csv
//! <base>/<App_Name_Id>/Monkey_Click/{average,minimum,maximum}_results_raw.csv
//! <base>/<App_Name_Id>/Monkey_Click/Test_<N>/results_raw_<N>.csv
//! <base>/<App_Name_Id>/Monkey_All/...
//! ```

use std::path::{Path, PathBuf};

/// Explorative traversal results of one app.
pub const TRAVERSAL_DIR: &str = "Droid_Traversal";
/// Monkey runs restricted to click events.
pub const MONKEY_CLICK_DIR: &str = "Monkey_Click";
/// Monkey runs with every event type.
pub const MONKEY_ALL_DIR: &str = "Monkey_All";
/// Traversal log file name.
pub const RESULTS_RAW_FILE: &str = "results_raw.csv";
/// Average over the monkey test runs.
pub const AVERAGE_FILE: &str = "average_results_raw.csv";
/// Minimum over the monkey test runs.
pub const MINIMUM_FILE: &str = "minimum_results_raw.csv";
/// Maximum over the monkey test runs.
pub const MAXIMUM_FILE: &str = "maximum_results_raw.csv";

/// What: Name the kind of monkey test a directory holds.
///
/// Inputs:
/// - `base`: Monkey results directory.
///
/// Output:
/// - `"All"` when the directory name mentions `All`, else `"Click"` when it
///   mentions `Click`, else an empty string.
///
/// Details:
/// - Only the last path component is inspected, so parent directories that
///   happen to contain `All` do not change the answer.
#[must_use]
pub fn test_type(base: &Path) -> &'static str {
    let text = base
        .file_name()
        .map_or_else(|| base.to_string_lossy(), |n| n.to_string_lossy());
    if text.contains("All") {
        "All"
    } else if text.contains("Click") {
        "Click"
    } else {
        ""
    }
}

/// What: Extract the run number from a `Test_<N>` directory name.
///
/// Inputs:
/// - `name`: Directory name.
///
/// Output:
/// - `Some("<N>")` when the name is `Test_` followed by one or two ASCII digits.
#[must_use]
pub fn test_number(name: &str) -> Option<&str> {
    let digits = name.strip_prefix("Test_")?;
    let valid = (1..=2).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
    valid.then_some(digits)
}

/// What: Turn an app results directory name into a table/axis label.
///
/// Inputs:
/// - `name`: Directory name such as `K9_Mail_12`.
///
/// Output:
/// - The part before the last `_`, underscores removed (`K9Mail`); names without
///   `_` are returned unchanged.
#[must_use]
pub fn app_label(name: &str) -> String {
    name.rfind('_')
        .map_or(name, |i| &name[..i])
        .replace('_', "")
}

/// What: List `Test_<N>` run directories inside a monkey results directory.
///
/// Inputs:
/// - `base`: Monkey results directory.
///
/// Output:
/// - `(path, number)` pairs sorted by directory name; unreadable directories yield none.
#[must_use]
pub fn test_directories(base: &Path) -> Vec<(PathBuf, String)> {
    let mut found: Vec<(PathBuf, String)> = sorted_subdirectories(base)
        .into_iter()
        .filter_map(|path| {
            let number = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(test_number)?
                .to_string();
            Some((path, number))
        })
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

/// What: Immediate subdirectories of `base`, sorted by name.
///
/// Inputs:
/// - `base`: Directory to scan.
///
/// Output:
/// - Subdirectory paths; empty when `base` cannot be read.
///
/// Details:
/// - Sorting makes chart bar order and table row order stable across file systems.
#[must_use]
pub fn sorted_subdirectories(base: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(base) else {
        tracing::warn!(dir = %base.display(), "cannot read results directory");
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}
