use std::path::Path;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::bail;
use tracing_subscriber::EnvFilter;

use sa_cli::args::{Cli, OutputFormat};
use sa_cli::render;
use sa_core::models::AuditReport;
use sa_core::services::config_loader;
use sa_core::services::gcloud::GcloudInventory;
use sa_core::services::lockdown::HttpLockdownProbe;
use sa_core::services::observer::TracingObserver;
use sa_core::services::orchestrator::DiscoveryOrchestrator;
use sa_core::services::report_store;

const DEFAULT_LOG_FILE: &str = ".site-audit.log";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _guard = setup_logging(&cli);

    let mut config = match &cli.config {
        Some(path) => config_loader::load_file(path)?,
        None => config_loader::load(&std::env::current_dir()?)?,
    };
    cli.apply(&mut config);
    config_loader::validate(&config)?;

    let inventory = GcloudInventory::new(&config);
    if config.preflight {
        inventory.preflight().await?;
    }
    let probe = HttpLockdownProbe::new(&config)?;
    let orchestrator = DiscoveryOrchestrator::new(inventory, probe)
        .with_probe_error_policy(config.on_probe_error);

    let mut observer = TracingObserver::new();
    let started_at = Utc::now();
    let mapping = orchestrator.run(&mut observer).await?;
    let report = AuditReport::new(started_at, Utc::now(), mapping, observer.skipped)
        .with_failed_probes(observer.failed_probes);

    if let Some(path) = &cli.output {
        report_store::write_report(path, &report).await?;
        tracing::info!(path = %path.display(), "report written");
    }

    let rendered = match cli.format {
        OutputFormat::Text => render::render_text(&report),
        OutputFormat::Json => render::render_json(&report)?,
    };
    println!("{rendered}");

    let exposed = report.exposed().count();
    let unchecked = report.failed_probes.len();
    if cli.fail_on_exposed && (exposed > 0 || unchecked > 0) {
        bail!("{exposed} site(s) reachable without authentication, {unchecked} could not be checked");
    }
    Ok(())
}

/// Log to stderr, or to `--log-file` through a non-blocking writer. The
/// returned guard must stay alive until the program exits.
fn setup_logging(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(log_file) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
        return None;
    };

    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
