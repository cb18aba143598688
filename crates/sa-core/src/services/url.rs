use crate::models::{ProjectId, VersionId};

/// Externally reachable URL of one version of a project. Identifiers come from
/// the inventory and are not validated.
pub fn build_url(version: &VersionId, project: &ProjectId) -> String {
    format!("https://{version}-dot-{project}.appspot.com")
}
