use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one project, as printed in the first column of the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

/// Identifier of one deployed version. Only unique within its project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl VersionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for VersionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum SkipReason {
    /// The version listing command failed to run or exited non-zero.
    CommandFailed(String),
    /// The listing ran but contained no version rows.
    NoVersions,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::CommandFailed(message) => write!(f, "version listing failed: {message}"),
            SkipReason::NoVersions => f.write_str("no deployed versions"),
        }
    }
}

/// Outcome of listing one project's versions. Fatal failures never show up
/// here; they travel on the `Err` side of [`crate::error::Result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionListing {
    Versions(Vec<VersionId>),
    Skip(SkipReason),
}
