use crate::error::AuditError;
use crate::models::{ProjectId, SiteDefinition, SkipReason, SkippedProject};

/// Receives progress events from a discovery run.
///
/// Every hook has an empty default so implementations only pick what they need.
pub trait DiscoveryObserver: Send {
    fn projects_listed(&mut self, _count: usize) {}

    fn project_skipped(&mut self, _project: &ProjectId, _reason: &SkipReason) {}

    fn scanning_project(&mut self, _project: &ProjectId, _versions: usize) {}

    fn site_recorded(&mut self, _site: &SiteDefinition) {}

    /// Only called when probe errors are configured to skip the URL.
    fn probe_failed(&mut self, _url: &str, _error: &AuditError) {}

    /// Called once right before a fatal error aborts the run.
    fn fatal(&mut self, _error: &AuditError) {}
}

/// Logs events through `tracing` and keeps the skipped projects for the report.
#[derive(Debug, Default)]
pub struct TracingObserver {
    pub skipped: Vec<SkippedProject>,
    pub failed_probes: Vec<String>,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiscoveryObserver for TracingObserver {
    fn projects_listed(&mut self, count: usize) {
        tracing::info!(count, "projects listed");
    }

    fn project_skipped(&mut self, project: &ProjectId, reason: &SkipReason) {
        match reason {
            SkipReason::CommandFailed(message) => {
                tracing::warn!(%project, "skipping project: {message}");
            }
            SkipReason::NoVersions => {
                tracing::debug!(%project, "skipping project: no deployed versions");
            }
        }
        self.skipped.push(SkippedProject {
            project: project.clone(),
            reason: reason.clone(),
        });
    }

    fn scanning_project(&mut self, project: &ProjectId, versions: usize) {
        tracing::info!("{project} ~ scanning {versions} version(s)");
    }

    fn site_recorded(&mut self, site: &SiteDefinition) {
        tracing::debug!(url = %site.url, locked_down = site.is_locked_down, "site recorded");
    }

    fn probe_failed(&mut self, url: &str, error: &AuditError) {
        tracing::warn!(url, "probe failed, skipping: {error}");
        self.failed_probes.push(url.to_string());
    }

    /// The caller reports the error itself, so this only leaves a debug trace.
    fn fatal(&mut self, error: &AuditError) {
        tracing::debug!("discovery aborted: {error}");
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under an info-level subscriber and return what it logged.
    fn logged_at_info(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn records_skipped_projects() {
        let mut observer = TracingObserver::new();
        observer.project_skipped(&ProjectId::from("proj-b"), &SkipReason::NoVersions);
        assert_eq!(observer.skipped.len(), 1);
        assert_eq!(observer.skipped[0].project, ProjectId::from("proj-b"));
    }

    #[test]
    fn records_failed_probes() {
        let mut observer = TracingObserver::new();
        let error = AuditError::Probe {
            url: "https://v1-dot-p.appspot.com".into(),
            message: "timeout".into(),
        };
        observer.probe_failed("https://v1-dot-p.appspot.com", &error);
        assert_eq!(observer.failed_probes, vec!["https://v1-dot-p.appspot.com"]);
    }

    #[test]
    fn fatal_stays_below_info() {
        let mut observer = TracingObserver::new();
        let output = logged_at_info(|| {
            observer.project_skipped(
                &ProjectId::from("proj-b"),
                &SkipReason::CommandFailed("exit 1".into()),
            );
            observer.fatal(&AuditError::ProjectListing("permission denied".into()));
        });
        assert!(output.contains("skipping project"), "{output}");
        assert!(!output.contains("discovery aborted"), "{output}");
    }
}
