use std::collections::HashSet;

use crate::models::VersionId;

/// Collapse a version listing to its unique versions, keeping the order in
/// which each version was first seen. A version deployed for several services
/// shows up once per service in the raw listing.
pub fn dedupe_versions(versions: &[VersionId]) -> Vec<VersionId> {
    let mut seen: HashSet<&VersionId> = HashSet::new();
    versions
        .iter()
        .filter(|v| seen.insert(*v))
        .cloned()
        .collect()
}
