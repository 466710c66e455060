//! F-Droid style app index: typed model, loading and version resolution.
//!
//! Only the fields the selector reads are modelled; everything else in the
//! index is ignored on load. Maps are `IndexMap`s so iteration follows the
//! order entries appear in the file, which the version resolver and the
//! sampler both depend on for reproducibility.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod latest;
mod persist;

pub use latest::get_latest_version;
pub use persist::format_index_file;

/// Locale whose display name is preferred.
pub const PREFERRED_LOCALE: &str = "en-US";

/// What: Root of the index document.
///
/// Details:
/// - `packages` keeps file order; it is the iteration order of the filter pass.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppIndex {
    /// Repository description.
    pub repo: RepoInfo,
    /// Package id to package entry.
    #[serde(default)]
    pub packages: IndexMap<String, PackageEntry>,
}

/// Repository-level metadata.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Base URL prepended to every version's file name.
    pub address: String,
    /// Category name to its (unused) localized description.
    #[serde(default)]
    pub categories: IndexMap<String, serde_json::Value>,
}

/// One package with its metadata and every published version.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Descriptive metadata.
    pub metadata: Metadata,
    /// Version id to version record, in file order.
    #[serde(default)]
    pub versions: IndexMap<String, Version>,
}

/// Package metadata used by the filters and the flattened record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Locale to display name.
    #[serde(default)]
    pub name: IndexMap<String, String>,
    /// Last update, epoch milliseconds.
    pub last_updated: i64,
    /// Categories the package is listed under.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Metadata {
    /// What: Resolve the display name of the package.
    ///
    /// Inputs:
    /// - `fallback`: Value used when no localized name exists (the package id).
    ///
    /// Output:
    /// - The `en-US` name, else the first localized name, else `fallback`.
    #[must_use]
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name
            .get(PREFERRED_LOCALE)
            .or_else(|| self.name.values().next())
            .map_or(fallback, String::as_str)
    }
}

/// A single published version.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Version {
    /// Publication time, epoch milliseconds.
    pub added: i64,
    /// Manifest summary.
    pub manifest: Manifest,
    /// Downloadable artifact.
    pub file: FileRef,
}

/// Manifest fields used for SDK filtering and file naming.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Monotonic version code.
    pub version_code: u64,
    /// SDK requirements; absent for malformed manifests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_sdk: Option<UsesSdk>,
}

/// Declared SDK bounds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsesSdk {
    /// Minimum supported SDK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sdk_version: Option<u32>,
    /// SDK the app targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_sdk_version: Option<u32>,
}

/// Artifact reference relative to the repository address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileRef {
    /// Path of the APK, usually starting with `/`.
    pub name: String,
}

impl AppIndex {
    /// What: Category names in index order, minus `excluded` ones.
    ///
    /// Inputs:
    /// - `excluded`: Predicate naming categories to drop.
    ///
    /// Output:
    /// - Remaining category names.
    pub fn categories_excluding(&self, excluded: impl Fn(&str) -> bool) -> Vec<String> {
        self.repo
            .categories
            .keys()
            .filter(|c| !excluded(c))
            .cloned()
            .collect()
    }
}

/// What: Load and parse the index file.
///
/// Inputs:
/// - `path`: Location of the JSON index.
///
/// Output:
/// - Parsed `AppIndex`.
///
/// # Errors
/// - I/O errors and malformed JSON propagate; the selector cannot run without an index.
pub fn load_index(path: &Path) -> crate::Result<AppIndex> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read index {}: {e}", path.display()))?;
    let index: AppIndex = serde_json::from_str(&body)
        .map_err(|e| format!("failed to parse index {}: {e}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        packages = index.packages.len(),
        categories = index.repo.categories.len(),
        "index loaded"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal index document with two packages in a deliberate non-sorted order.
    fn sample_index() -> serde_json::Value {
        serde_json::json!({
            "repo": {
                "address": "https://f-droid.org/repo",
                "categories": {"Internet": {}, "Games": {}, "Navigation": {}},
                "timestamp": 1
            },
            "packages": {
                "org.zeta": {
                    "metadata": {
                        "name": {"de": "Zeta DE", "en-US": "Zeta"},
                        "lastUpdated": 1_600_000_000_000_i64,
                        "categories": ["Internet"]
                    },
                    "versions": {
                        "abc": {
                            "added": 1_600_000_000_000_i64,
                            "manifest": {"versionCode": 3, "usesSdk": {"minSdkVersion": 16, "targetSdkVersion": 28}},
                            "file": {"name": "/org.zeta_3.apk", "sha256": "00"}
                        }
                    }
                },
                "org.alpha": {
                    "metadata": {"name": {"fr": "Alpha FR"}, "lastUpdated": 5},
                    "versions": {}
                }
            }
        })
    }

    #[test]
    /// What: Index parsing keeps file order and tolerates unknown/missing fields.
    ///
    /// Inputs:
    /// - JSON index with extra keys, a package without categories and without versions.
    ///
    /// Output:
    /// - Packages in file order, defaults for missing collections.
    fn index_parses_in_file_order() {
        let index: AppIndex = serde_json::from_value(sample_index()).expect("valid index");
        let ids: Vec<&String> = index.packages.keys().collect();
        assert_eq!(ids, vec!["org.zeta", "org.alpha"]);
        let alpha = &index.packages["org.alpha"];
        assert!(alpha.metadata.categories.is_empty());
        assert!(alpha.versions.is_empty());
        let zeta_version = &index.packages["org.zeta"].versions["abc"];
        assert_eq!(zeta_version.manifest.version_code, 3);
        assert_eq!(
            zeta_version.manifest.uses_sdk.and_then(|s| s.target_sdk_version),
            Some(28)
        );
    }

    #[test]
    /// What: Display names prefer `en-US`, then any locale, then the id.
    ///
    /// Inputs:
    /// - Metadata with `en-US`, with only `fr`, and with no names.
    ///
    /// Output:
    /// - `Zeta`, `Alpha FR`, and the fallback id.
    fn index_display_name_fallbacks() {
        let index: AppIndex = serde_json::from_value(sample_index()).expect("valid index");
        assert_eq!(index.packages["org.zeta"].metadata.display_name("org.zeta"), "Zeta");
        assert_eq!(
            index.packages["org.alpha"].metadata.display_name("org.alpha"),
            "Alpha FR"
        );
        let nameless = Metadata {
            name: IndexMap::new(),
            last_updated: 0,
            categories: Vec::new(),
        };
        assert_eq!(nameless.display_name("org.none"), "org.none");
    }

    #[test]
    /// What: Excluded categories never appear in the category list.
    ///
    /// Inputs:
    /// - Index listing `Internet`, `Games`, `Navigation`.
    ///
    /// Output:
    /// - `Internet`, `Navigation` in index order.
    fn index_categories_excluding_games() {
        let index: AppIndex = serde_json::from_value(sample_index()).expect("valid index");
        let cats = index.categories_excluding(|c| c == "Games");
        assert_eq!(cats, vec!["Internet", "Navigation"]);
    }

    #[test]
    /// What: Loading a missing or malformed file reports an error.
    ///
    /// Inputs:
    /// - Nonexistent path and a file holding invalid JSON.
    ///
    /// Output:
    /// - Both calls return `Err` mentioning the path.
    fn index_load_errors_propagate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.json");
        let err = load_index(&missing).expect_err("missing file");
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"repo\": ").expect("write");
        assert!(load_index(&broken).is_err());
    }
}
