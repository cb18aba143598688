use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::Result;
use crate::models::{ProjectId, SkipReason, VersionId, VersionListing};

/// Source of project and version listings.
///
/// Project listing failures are fatal and come back as `Err`. Version listing
/// failures only ever skip the project, so that call has no error channel.
#[async_trait]
pub trait Inventory: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectId>>;

    async fn list_versions(&self, project: &ProjectId) -> VersionListing;
}

static FIRST_COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\S+)").unwrap());

static SECOND_COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\S+\s+(\S+)").unwrap());

/// Lines between the header and the last line. The last line is dropped
/// unconditionally, so output missing its final newline loses its last row.
fn data_rows(output: &str) -> Vec<&str> {
    let lines: Vec<&str> = output.split('\n').collect();
    if lines.len() < 2 {
        return Vec::new();
    }
    lines[1..lines.len() - 1].to_vec()
}

fn column(output: &str, re: &Regex) -> Vec<String> {
    data_rows(output)
        .into_iter()
        .filter_map(|line| re.captures(line).map(|caps| caps[1].to_string()))
        .collect()
}

/// Extract project ids from the first column of a project listing.
pub fn parse_projects_listing(output: &str) -> Vec<ProjectId> {
    column(output, &FIRST_COLUMN_RE)
        .into_iter()
        .map(ProjectId)
        .collect()
}

/// Extract version ids from the second column of a version listing. The first
/// column is the service name and is ignored.
pub fn parse_versions_listing(output: &str) -> Vec<VersionId> {
    column(output, &SECOND_COLUMN_RE)
        .into_iter()
        .map(VersionId)
        .collect()
}

/// Classify raw version listing output into a [`VersionListing`].
pub fn versions_outcome(output: &str) -> VersionListing {
    let versions = parse_versions_listing(output);
    if versions.is_empty() {
        VersionListing::Skip(SkipReason::NoVersions)
    } else {
        VersionListing::Versions(versions)
    }
}
