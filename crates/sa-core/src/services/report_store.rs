use std::path::Path;

use crate::error::{AuditError, Result};
use crate::models::AuditReport;

/// Write the report as pretty-printed JSON, creating parent directories as needed.
pub async fn write_report(path: &Path, report: &AuditReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AuditError::Report(format!("failed to create report dir: {e}")))?;
    }
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| AuditError::Report(format!("failed to write {}: {e}", path.display())))?;
    Ok(())
}
