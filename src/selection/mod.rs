//! App selection: filter the index, group by category, sample one app per category.
//!
//! The stages mirror the JSON artifacts they produce:
//! categories → filtered packages → per-category packages → one sample per category.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::FilterRules;
use crate::index::{AppIndex, Metadata, Version, get_latest_version};

mod filter;
mod sample;

pub use filter::{FilterCounts, FilterReason, exclusion_reason};
pub use sample::{CategoryOutcome, CategorySelection, draw_position, sample_per_category};

/// Category list artifact.
pub const CATEGORIES_FILE: &str = "categories.json";
/// Filtered package map artifact.
pub const PACKAGES_FILE: &str = "packages.json";
/// Per-category package map artifact.
pub const CATEGORY_PACKAGES_FILE: &str = "category_packages.json";
/// Sampled app per category artifact.
pub const SELECTION_FILE: &str = "random_app_per_category.json";

/// What: Flattened view of a package at its latest version.
///
/// Details:
/// - Serialized with camelCase keys; this is the record shape of every output file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    /// Display name.
    pub name: String,
    /// Package identifier.
    pub package: String,
    /// Version code of the resolved version.
    pub version_code: u64,
    /// Last update, epoch milliseconds.
    pub last_updated: i64,
    /// Categories the package is listed under.
    pub categories: Vec<String>,
    /// Download URL of the APK.
    pub url: String,
    /// Minimum SDK of the resolved version.
    pub min_sdk_version: u32,
    /// Target SDK of the resolved version.
    pub target_sdk_version: u32,
}

impl PackageRecord {
    /// What: Flatten an index entry into a record.
    ///
    /// Inputs:
    /// - `package`: Package id.
    /// - `metadata`: Package metadata.
    /// - `version`: Resolved latest version.
    /// - `base_url`: Repository address prefixed to the file name.
    ///
    /// Output:
    /// - `Some(record)`, or `None` when the version declares no complete SDK bounds.
    #[must_use]
    pub fn from_entry(
        package: &str,
        metadata: &Metadata,
        version: &Version,
        base_url: &str,
    ) -> Option<Self> {
        let sdk = version.manifest.uses_sdk?;
        Some(Self {
            name: metadata.display_name(package).to_string(),
            package: package.to_string(),
            version_code: version.manifest.version_code,
            last_updated: metadata.last_updated,
            categories: metadata.categories.clone(),
            url: format!("{base_url}{}", version.file.name),
            min_sdk_version: sdk.min_sdk_version?,
            target_sdk_version: sdk.target_sdk_version?,
        })
    }

    /// Whether the record is listed under `category`.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Package id to record, in index order.
pub type PackageMap = IndexMap<String, PackageRecord>;
/// Category to its packages, in category-list order.
pub type CategoryPackages = IndexMap<String, PackageMap>;

/// What: Run the filter pipeline over every package of the index.
///
/// Inputs:
/// - `index`: Loaded app index.
/// - `rules`: Exclusion rules.
/// - `now`: Reference time for the age rule.
///
/// Output:
/// - Surviving packages as records (index order) and the exclusion tally.
#[must_use]
pub fn list_filtered_packages(
    index: &AppIndex,
    rules: &FilterRules,
    now: DateTime<Utc>,
) -> (PackageMap, FilterCounts) {
    let mut counts = FilterCounts::default();
    let mut packages = PackageMap::new();

    for (id, entry) in &index.packages {
        let version = get_latest_version(entry.metadata.last_updated, &entry.versions);
        if version.is_none() {
            tracing::warn!(package = %id, "package has no versions");
        }
        if counts.filtered(id, &entry.metadata, version, rules, now) {
            continue;
        }
        if let Some(record) = version
            .and_then(|v| PackageRecord::from_entry(id, &entry.metadata, v, &index.repo.address))
        {
            packages.insert(id.clone(), record);
        }
    }

    (packages, counts)
}

/// What: Packages listed under `category`, keeping the filtered order.
///
/// Inputs:
/// - `category`: Category name.
/// - `filtered`: Output of [`list_filtered_packages`].
///
/// Output:
/// - Sub-map of matching packages.
#[must_use]
pub fn list_category_packages(category: &str, filtered: &PackageMap) -> PackageMap {
    filtered
        .iter()
        .filter(|(_, record)| record.in_category(category))
        .map(|(id, record)| (id.clone(), record.clone()))
        .collect()
}

/// Group filtered packages under every category of `categories`, in that order.
#[must_use]
pub fn group_by_category(categories: &[String], filtered: &PackageMap) -> CategoryPackages {
    categories
        .iter()
        .map(|category| (category.clone(), list_category_packages(category, filtered)))
        .collect()
}
