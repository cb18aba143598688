use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{AuditError, Result};
use crate::models::{AuditConfig, ProjectId, SkipReason, VersionListing};

use super::inventory::{parse_projects_listing, versions_outcome, Inventory};

enum CommandFailure {
    /// The binary could not be started or did not finish in time.
    Spawn(String),
    /// The binary ran and exited non-zero.
    Exit(String),
}

impl CommandFailure {
    fn into_message(self) -> String {
        match self {
            CommandFailure::Spawn(m) | CommandFailure::Exit(m) => m,
        }
    }
}

/// Inventory backed by the `gcloud` CLI.
pub struct GcloudInventory {
    binary: String,
    projects_args: Vec<String>,
    versions_args: Vec<String>,
    preflight_args: Vec<String>,
    timeout: Duration,
}

impl GcloudInventory {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            binary: config.gcloud_path.clone(),
            projects_args: config.projects_args.clone(),
            versions_args: config.versions_args.clone(),
            preflight_args: config.preflight_args.clone(),
            timeout: config.command_timeout(),
        }
    }

    async fn run_gcloud(&self, args: &[String]) -> std::result::Result<String, CommandFailure> {
        let command_line = format!("{} {}", self.binary, args.join(" "));
        tracing::debug!(command = %command_line, "running inventory command");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(CommandFailure::Spawn(format!("failed to run {command_line}: {e}")));
            }
            Err(_) => {
                return Err(CommandFailure::Spawn(format!(
                    "{command_line} timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CommandFailure::Exit(format!(
                "{command_line} failed (exit {}): {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        // Not trimmed: the listing grammar relies on the header and the trailing newline.
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Install or update the CLI components the listings depend on.
    pub async fn preflight(&self) -> Result<()> {
        tracing::info!("updating gcloud app components");
        self.run_gcloud(&self.preflight_args)
            .await
            .map_err(|f| AuditError::Preflight(f.into_message()))?;
        Ok(())
    }
}

#[async_trait]
impl Inventory for GcloudInventory {
    async fn list_projects(&self) -> Result<Vec<ProjectId>> {
        let output = self
            .run_gcloud(&self.projects_args)
            .await
            .map_err(|f| match f {
                CommandFailure::Spawn(m) => AuditError::Inventory(m),
                CommandFailure::Exit(m) => AuditError::ProjectListing(m),
            })?;
        Ok(parse_projects_listing(&output))
    }

    async fn list_versions(&self, project: &ProjectId) -> VersionListing {
        let mut args = self.versions_args.clone();
        args.extend(["--project".to_string(), project.to_string()]);
        match self.run_gcloud(&args).await {
            Ok(output) => versions_outcome(&output),
            Err(f) => VersionListing::Skip(SkipReason::CommandFailed(f.into_message())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_binary_config() -> AuditConfig {
        AuditConfig {
            gcloud_path: "definitely-not-a-real-gcloud-binary".into(),
            ..AuditConfig::default()
        }
    }

    #[tokio::test]
    async fn missing_binary_is_fatal_for_projects() {
        let inventory = GcloudInventory::new(&missing_binary_config());
        assert!(matches!(
            inventory.list_projects().await,
            Err(AuditError::Inventory(_))
        ));
    }

    #[tokio::test]
    async fn failure_message_names_the_command_line() {
        let inventory = GcloudInventory::new(&missing_binary_config());
        match inventory.list_projects().await {
            Err(AuditError::Inventory(message)) => {
                assert!(
                    message.contains("definitely-not-a-real-gcloud-binary projects list"),
                    "{message}"
                );
            }
            other => panic!("expected inventory error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_skips_versions() {
        let inventory = GcloudInventory::new(&missing_binary_config());
        let outcome = inventory.list_versions(&ProjectId::from("proj-a")).await;
        assert!(matches!(
            outcome,
            VersionListing::Skip(SkipReason::CommandFailed(_))
        ));
    }

    #[tokio::test]
    async fn missing_binary_fails_preflight() {
        let inventory = GcloudInventory::new(&missing_binary_config());
        assert!(matches!(
            inventory.preflight().await,
            Err(AuditError::Preflight(_))
        ));
    }
}
