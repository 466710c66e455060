use indexmap::IndexMap;

use super::Version;

/// What: Resolve the version a package's `lastUpdated` refers to.
///
/// Inputs:
/// - `last_updated`: Package last-updated timestamp (epoch ms).
/// - `versions`: Version id to version record, in index order.
///
/// Output:
/// - The first version whose `added` equals `last_updated`; otherwise the version
///   with the greatest `added`; `None` for an empty map.
///
/// Details:
/// - The running maximum is only replaced on a strictly greater `added`, so the
///   earliest entry wins ties. Iteration order therefore matters.
#[must_use]
pub fn get_latest_version(last_updated: i64, versions: &IndexMap<String, Version>) -> Option<&Version> {
    let mut latest: Option<&Version> = None;
    for version in versions.values() {
        if version.added == last_updated {
            return Some(version);
        }
        if latest.is_none_or(|best| version.added > best.added) {
            latest = Some(version);
        }
    }
    latest
}
