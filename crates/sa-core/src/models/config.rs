use std::time::Duration;

use serde::Deserialize;

/// What to do when a single lockdown probe errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeErrorPolicy {
    /// Abort the whole run and discard partial results.
    #[default]
    Abort,
    /// Report the URL to the observer and continue without recording it.
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub gcloud_path: String,
    pub projects_args: Vec<String>,
    pub versions_args: Vec<String>,
    pub preflight_args: Vec<String>,
    pub preflight: bool,
    pub command_timeout_secs: u64,
    pub probe_timeout_secs: u64,
    pub max_redirects: usize,
    pub login_hosts: Vec<String>,
    /// Route probes through the proxy named by `HTTP(S)_PROXY`.
    pub use_system_proxy: bool,
    pub on_probe_error: ProbeErrorPolicy,
}

impl AuditConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            gcloud_path: "gcloud".into(),
            projects_args: strings(&["projects", "list"]),
            versions_args: strings(&["app", "versions", "list"]),
            preflight_args: strings(&["components", "update", "app", "--quiet"]),
            preflight: false,
            command_timeout_secs: 120,
            probe_timeout_secs: 30,
            max_redirects: 10,
            login_hosts: strings(&["accounts.google.com"]),
            use_system_proxy: true,
            on_probe_error: ProbeErrorPolicy::Abort,
        }
    }
}
