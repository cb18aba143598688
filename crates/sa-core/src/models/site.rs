use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::inventory::{ProjectId, SkipReason};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDefinition {
    pub url: String,
    pub is_locked_down: bool,
}

impl SiteDefinition {
    pub fn new(url: String, is_locked_down: bool) -> Self {
        Self {
            url,
            is_locked_down,
        }
    }
}

/// Sites keyed by their URL.
pub type ResultMapping = HashMap<String, SiteDefinition>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedProject {
    pub project: ProjectId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sites: Vec<SiteDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_projects: Vec<SkippedProject>,
    /// URLs whose lockdown state could not be determined.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_probes: Vec<String>,
}

impl AuditReport {
    /// Build a report from a finished run. Sites are sorted by URL so output is stable.
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        mapping: ResultMapping,
        skipped_projects: Vec<SkippedProject>,
    ) -> Self {
        let mut sites: Vec<SiteDefinition> = mapping.into_values().collect();
        sites.sort_by(|a, b| a.url.cmp(&b.url));
        Self {
            started_at,
            finished_at,
            sites,
            skipped_projects,
            failed_probes: Vec::new(),
        }
    }

    pub fn with_failed_probes(mut self, mut failed_probes: Vec<String>) -> Self {
        failed_probes.sort();
        self.failed_probes = failed_probes;
        self
    }

    pub fn locked_down_count(&self) -> usize {
        self.sites.iter().filter(|s| s.is_locked_down).count()
    }

    pub fn exposed(&self) -> impl Iterator<Item = &SiteDefinition> {
        self.sites.iter().filter(|s| !s.is_locked_down)
    }
}
