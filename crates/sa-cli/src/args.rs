use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use sa_core::models::{AuditConfig, ProbeErrorPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Find every App Engine version URL in the current account and check that
/// each one rejects unauthenticated visitors.
#[derive(Debug, Parser)]
#[command(name = "site-audit", version)]
pub struct Cli {
    /// Config file to use instead of `./.site-audit.yaml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the gcloud binary.
    #[arg(long)]
    pub gcloud: Option<String>,

    /// Update the gcloud app components before listing.
    #[arg(long)]
    pub preflight: bool,

    /// Log probe failures and keep going instead of aborting.
    #[arg(long)]
    pub skip_probe_errors: bool,

    /// Per-URL probe timeout in seconds.
    #[arg(long)]
    pub probe_timeout: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Exit non-zero when any site is reachable without authentication or
    /// could not be checked.
    #[arg(long)]
    pub fail_on_exposed: bool,

    #[arg(long)]
    pub debug: bool,

    /// Send logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut AuditConfig) {
        if let Some(gcloud) = &self.gcloud {
            config.gcloud_path = gcloud.clone();
        }
        if self.preflight {
            config.preflight = true;
        }
        if self.skip_probe_errors {
            config.on_probe_error = ProbeErrorPolicy::Skip;
        }
        if let Some(secs) = self.probe_timeout {
            config.probe_timeout_secs = secs;
        }
    }
}
