use crate::error::Result;
use crate::models::{ProbeErrorPolicy, ResultMapping, SiteDefinition, SkipReason, VersionListing};

use super::dedupe::dedupe_versions;
use super::inventory::Inventory;
use super::lockdown::LockdownProbe;
use super::observer::DiscoveryObserver;
use super::url::build_url;

/// Walks every project and version from the inventory and probes each
/// synthesized URL, one at a time.
pub struct DiscoveryOrchestrator<I, P> {
    inventory: I,
    probe: P,
    on_probe_error: ProbeErrorPolicy,
}

impl<I: Inventory, P: LockdownProbe> DiscoveryOrchestrator<I, P> {
    pub fn new(inventory: I, probe: P) -> Self {
        Self {
            inventory,
            probe,
            on_probe_error: ProbeErrorPolicy::Abort,
        }
    }

    pub fn with_probe_error_policy(mut self, policy: ProbeErrorPolicy) -> Self {
        self.on_probe_error = policy;
        self
    }

    /// Run the full discovery. Any fatal error discards what was gathered so far.
    pub async fn run(&self, observer: &mut dyn DiscoveryObserver) -> Result<ResultMapping> {
        let projects = match self.inventory.list_projects().await {
            Ok(projects) => projects,
            Err(e) => {
                observer.fatal(&e);
                return Err(e);
            }
        };
        observer.projects_listed(projects.len());

        let mut mapping = ResultMapping::new();
        for project in &projects {
            let versions = match self.inventory.list_versions(project).await {
                VersionListing::Versions(versions) if !versions.is_empty() => versions,
                VersionListing::Versions(_) => {
                    observer.project_skipped(project, &SkipReason::NoVersions);
                    continue;
                }
                VersionListing::Skip(reason) => {
                    observer.project_skipped(project, &reason);
                    continue;
                }
            };

            let unique = dedupe_versions(&versions);
            observer.scanning_project(project, unique.len());

            for version in &unique {
                let url = build_url(version, project);
                match self.probe.check_lockdown(&url).await {
                    Ok(is_locked_down) => {
                        let site = SiteDefinition::new(url.clone(), is_locked_down);
                        observer.site_recorded(&site);
                        mapping.insert(url, site);
                    }
                    Err(e) => match self.on_probe_error {
                        ProbeErrorPolicy::Abort => {
                            observer.fatal(&e);
                            return Err(e);
                        }
                        ProbeErrorPolicy::Skip => observer.probe_failed(&url, &e),
                    },
                }
            }
        }

        Ok(mapping)
    }
}
