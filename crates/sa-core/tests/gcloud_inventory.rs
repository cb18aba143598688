#![cfg(unix)]

use std::fs;
use std::path::Path;

use async_trait::async_trait;

use sa_core::error::{AuditError, Result};
use sa_core::models::{AuditConfig, ProjectId, SkipReason, VersionListing};
use sa_core::services::gcloud::GcloudInventory;
use sa_core::services::inventory::Inventory;
use sa_core::services::lockdown::LockdownProbe;
use sa_core::services::observer::TracingObserver;
use sa_core::services::orchestrator::DiscoveryOrchestrator;

const FAKE_GCLOUD: &str = r#"
case "$*" in
  "projects list")
    printf 'PROJECT_ID  NAME       PROJECT_NUMBER\n'
    printf 'proj-a      Project A  111\n'
    printf 'proj-b      Project B  222\n'
    printf 'proj-c      Project C  333\n'
    ;;
  "app versions list --project proj-a")
    printf 'SERVICE  VERSION.ID  TRAFFIC_SPLIT\n'
    printf 'default  v1          1.00\n'
    printf 'worker   v1          0.00\n'
    printf 'worker   v2          1.00\n'
    ;;
  "app versions list --project proj-b")
    echo "ERROR: (gcloud.app.versions.list) Apps instance [proj-b] not found." >&2
    exit 1
    ;;
  "app versions list --project proj-c")
    printf 'SERVICE  VERSION.ID  TRAFFIC_SPLIT\n'
    ;;
  *)
    exit 2
    ;;
esac
"#;

/// Runs the script through `/bin/sh` so the test never execs a freshly written file.
fn fake_config(script: &Path) -> AuditConfig {
    let script = script.to_string_lossy().to_string();
    AuditConfig {
        gcloud_path: "/bin/sh".into(),
        projects_args: vec![script.clone(), "projects".into(), "list".into()],
        versions_args: vec![script.clone(), "app".into(), "versions".into(), "list".into()],
        preflight_args: vec![script, "components".into(), "update".into()],
        ..AuditConfig::default()
    }
}

fn write_script(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("gcloud.sh");
    fs::write(&path, FAKE_GCLOUD).unwrap();
    path
}

struct OpenProbe;

#[async_trait]
impl LockdownProbe for OpenProbe {
    async fn check_lockdown(&self, url: &str) -> Result<bool> {
        Ok(url.contains("v2"))
    }
}

#[tokio::test]
async fn lists_projects_from_cli_output() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = GcloudInventory::new(&fake_config(&write_script(dir.path())));

    let projects = inventory.list_projects().await.unwrap();

    assert_eq!(
        projects,
        vec![
            ProjectId::from("proj-a"),
            ProjectId::from("proj-b"),
            ProjectId::from("proj-c"),
        ]
    );
}

#[tokio::test]
async fn version_listing_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = GcloudInventory::new(&fake_config(&write_script(dir.path())));

    match inventory.list_versions(&ProjectId::from("proj-a")).await {
        VersionListing::Versions(versions) => assert_eq!(versions.len(), 3),
        other => panic!("expected versions, got {other:?}"),
    }
    match inventory.list_versions(&ProjectId::from("proj-b")).await {
        VersionListing::Skip(SkipReason::CommandFailed(message)) => {
            assert!(message.contains("not found"), "{message}");
        }
        other => panic!("expected command failure, got {other:?}"),
    }
    assert_eq!(
        inventory.list_versions(&ProjectId::from("proj-c")).await,
        VersionListing::Skip(SkipReason::NoVersions)
    );
}

#[tokio::test]
async fn failing_project_listing_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fake_config(&write_script(dir.path()));
    config.projects_args.push("--bogus".into());
    let inventory = GcloudInventory::new(&config);

    assert!(matches!(
        inventory.list_projects().await,
        Err(AuditError::ProjectListing(_))
    ));
}

#[tokio::test]
async fn preflight_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = GcloudInventory::new(&fake_config(&write_script(dir.path())));

    assert!(matches!(
        inventory.preflight().await,
        Err(AuditError::Preflight(_))
    ));
}

#[tokio::test]
async fn full_discovery_against_fake_cli() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = GcloudInventory::new(&fake_config(&write_script(dir.path())));
    let orchestrator = DiscoveryOrchestrator::new(inventory, OpenProbe);
    let mut observer = TracingObserver::new();

    let mapping = orchestrator.run(&mut observer).await.unwrap();

    assert_eq!(mapping.len(), 2);
    assert!(!mapping["https://v1-dot-proj-a.appspot.com"].is_locked_down);
    assert!(mapping["https://v2-dot-proj-a.appspot.com"].is_locked_down);
    let skipped: Vec<&str> = observer
        .skipped
        .iter()
        .map(|s| s.project.as_str())
        .collect();
    assert_eq!(skipped, vec!["proj-b", "proj-c"]);
}
