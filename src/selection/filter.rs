//! Exclusion pipeline deciding which index packages are eligible for sampling.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::FilterRules;
use crate::index::{Metadata, Version};

/// Days per year used by the age rule.
const DAYS_PER_YEAR: f64 = 365.0;

/// Why a package was excluded. Rules are checked in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterReason {
    /// Listed in the manual exclusion list.
    Manual,
    /// Shares a category with the excluded-category set.
    Category,
    /// Last updated longer ago than the age limit.
    Age,
    /// SDK requirements missing or outside the accepted range.
    Sdk,
}

/// What: Decide whether a package is excluded, and by which rule.
///
/// Inputs:
/// - `package`: Package identifier.
/// - `metadata`: Package metadata (categories, last update).
/// - `version`: Resolved latest version, `None` when the package has no versions.
/// - `rules`: Exclusion rules.
/// - `now`: Reference time for the age rule.
///
/// Output:
/// - `Some(reason)` for the first rule that matches, `None` if the package survives.
///
/// Details:
/// - Pure: the result depends only on the arguments.
/// - Age is whole elapsed days divided by 365, compared with a strict `>`.
/// - A missing `usesSdk` block, missing min/target values, or a missing version
///   all count as SDK failures.
#[must_use]
pub fn exclusion_reason(
    package: &str,
    metadata: &Metadata,
    version: Option<&Version>,
    rules: &FilterRules,
    now: DateTime<Utc>,
) -> Option<FilterReason> {
    if rules.excluded_apps.iter().any(|id| id == package) {
        return Some(FilterReason::Manual);
    }

    if metadata
        .categories
        .iter()
        .any(|c| rules.is_excluded_category(c))
    {
        return Some(FilterReason::Category);
    }

    if let Some(last_updated) = DateTime::<Utc>::from_timestamp_millis(metadata.last_updated) {
        #[allow(clippy::cast_precision_loss)]
        let years = (now - last_updated).num_days() as f64 / DAYS_PER_YEAR;
        if years > rules.max_app_age_years {
            return Some(FilterReason::Age);
        }
    }

    let sdk = version.and_then(|v| v.manifest.uses_sdk);
    match sdk.and_then(|s| s.min_sdk_version.zip(s.target_sdk_version)) {
        Some((min, target)) if rules.sdk_in_range(min) && rules.sdk_in_range(target) => None,
        _ => Some(FilterReason::Sdk),
    }
}

/// What: Tally of exclusions made by one filter pass.
///
/// Details:
/// - Replaces process-wide counters; a fresh value is created per pass and
///   reported once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterCounts {
    /// Packages excluded by the manual list.
    pub manual: usize,
    /// Packages excluded by category.
    pub category: usize,
    /// Packages excluded for age.
    pub age: usize,
    /// Packages excluded for SDK requirements.
    pub sdk: usize,
}

impl FilterCounts {
    /// What: Apply the pipeline to one package and count the outcome.
    ///
    /// Inputs:
    /// - Same as [`exclusion_reason`].
    ///
    /// Output:
    /// - `true` when the package is excluded; the matching counter was incremented.
    pub fn filtered(
        &mut self,
        package: &str,
        metadata: &Metadata,
        version: Option<&Version>,
        rules: &FilterRules,
        now: DateTime<Utc>,
    ) -> bool {
        match exclusion_reason(package, metadata, version, rules, now) {
            Some(reason) => {
                self.record(reason);
                true
            }
            None => false,
        }
    }

    /// Increment the counter for `reason`.
    pub const fn record(&mut self, reason: FilterReason) {
        match reason {
            FilterReason::Manual => self.manual += 1,
            FilterReason::Category => self.category += 1,
            FilterReason::Age => self.age += 1,
            FilterReason::Sdk => self.sdk += 1,
        }
    }

    /// Total number of excluded packages.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.manual + self.category + self.age + self.sdk
    }
}

impl fmt::Display for FilterCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "manual={} category={} age={} sdk={}",
            self.manual, self.category, self.age, self.sdk
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{FileRef, Manifest, UsesSdk};
    use chrono::{Duration, TimeZone};
    use indexmap::IndexMap;

    /// Fixed reference time so the age rule is deterministic.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid date")
    }

    /// Metadata last updated `days_ago` before [`now`] with the given categories.
    fn metadata(days_ago: i64, categories: &[&str]) -> Metadata {
        Metadata {
            name: IndexMap::new(),
            last_updated: (now() - Duration::days(days_ago)).timestamp_millis(),
            categories: categories.iter().map(ToString::to_string).collect(),
        }
    }

    /// Version with optional SDK bounds.
    fn version(sdk: Option<(Option<u32>, Option<u32>)>) -> Version {
        Version {
            added: 0,
            manifest: Manifest {
                version_code: 1,
                uses_sdk: sdk.map(|(min, target)| UsesSdk {
                    min_sdk_version: min,
                    target_sdk_version: target,
                }),
            },
            file: FileRef {
                name: "/app.apk".to_string(),
            },
        }
    }

    #[test]
    /// What: A recent, in-range package in an allowed category survives.
    ///
    /// Inputs:
    /// - Updated 30 days ago, `Internet`, SDK 21/28.
    ///
    /// Output:
    /// - Not filtered, all counters zero.
    fn filter_keeps_eligible_package() {
        let mut counts = FilterCounts::default();
        let v = version(Some((Some(21), Some(28))));
        let excluded = counts.filtered(
            "org.ok",
            &metadata(30, &["Internet"]),
            Some(&v),
            &FilterRules::default(),
            now(),
        );
        assert!(!excluded);
        assert_eq!(counts, FilterCounts::default());
    }

    #[test]
    /// What: A package last updated 11 years ago is excluded for age only.
    ///
    /// Inputs:
    /// - Updated 11 * 365 + 3 days ago, otherwise eligible.
    ///
    /// Output:
    /// - Filtered; only the age counter is incremented.
    fn filter_age_counts_only_age() {
        let mut counts = FilterCounts::default();
        let v = version(Some((Some(21), Some(28))));
        let excluded = counts.filtered(
            "org.old",
            &metadata(11 * 365 + 3, &["Internet"]),
            Some(&v),
            &FilterRules::default(),
            now(),
        );
        assert!(excluded);
        assert_eq!(
            counts,
            FilterCounts {
                age: 1,
                ..FilterCounts::default()
            }
        );
    }

    #[test]
    /// What: Exactly ten years old is still accepted (strict comparison).
    ///
    /// Inputs:
    /// - Updated 3650 days ago.
    ///
    /// Output:
    /// - No exclusion reason.
    fn filter_age_boundary_is_inclusive() {
        let v = version(Some((Some(16), Some(29))));
        let reason = exclusion_reason(
            "org.edge",
            &metadata(3650, &[]),
            Some(&v),
            &FilterRules::default(),
            now(),
        );
        assert_eq!(reason, None);
    }

    #[test]
    /// What: Rules short-circuit in fixed order.
    ///
    /// Inputs:
    /// - A manually excluded, old, `Games` package with a bad SDK; then the same
    ///   package under a different id.
    ///
    /// Output:
    /// - `Manual` first, then `Category` once the manual rule no longer applies.
    fn filter_rules_short_circuit_in_order() {
        let rules = FilterRules::default();
        let v = version(Some((Some(3), Some(3))));
        let md = metadata(5000, &["Games", "Internet"]);
        assert_eq!(
            exclusion_reason("se.manyver", &md, Some(&v), &rules, now()),
            Some(FilterReason::Manual)
        );
        assert_eq!(
            exclusion_reason("org.other", &md, Some(&v), &rules, now()),
            Some(FilterReason::Category)
        );
    }

    #[test]
    /// What: Missing or out-of-range SDK data counts as an SDK exclusion.
    ///
    /// Inputs:
    /// - No `usesSdk`, missing target, min below range, target above range, no version.
    ///
    /// Output:
    /// - Every case is `Sdk`; the counter reaches five.
    fn filter_sdk_failures() {
        let rules = FilterRules::default();
        let md = metadata(10, &["Internet"]);
        let cases = [
            Some(version(None)),
            Some(version(Some((Some(21), None)))),
            Some(version(Some((Some(15), Some(28))))),
            Some(version(Some((Some(21), Some(30))))),
            None,
        ];
        let mut counts = FilterCounts::default();
        for case in &cases {
            assert!(counts.filtered("org.sdk", &md, case.as_ref(), &rules, now()));
        }
        assert_eq!(counts.sdk, 5);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    /// What: The decision is deterministic for identical inputs.
    ///
    /// Inputs:
    /// - Same package evaluated repeatedly.
    ///
    /// Output:
    /// - Identical reasons every time.
    fn filter_is_deterministic() {
        let rules = FilterRules::default();
        let v = version(Some((Some(21), Some(31))));
        let md = metadata(100, &["Science & Education"]);
        let first = exclusion_reason("org.x", &md, Some(&v), &rules, now());
        for _ in 0..5 {
            assert_eq!(exclusion_reason("org.x", &md, Some(&v), &rules, now()), first);
        }
    }
}
