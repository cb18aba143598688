use std::path::Path;

use crate::error::{AuditError, Result};
use crate::models::AuditConfig;

pub const CONFIG_FILENAME: &str = ".site-audit.yaml";

/// Load `.site-audit.yaml` from `directory`, falling back to defaults when absent.
pub fn load(directory: &Path) -> Result<AuditConfig> {
    let config_path = directory.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(AuditConfig::default());
    }
    load_file(&config_path)
}

/// Load an explicitly named config file. A missing file is an error.
pub fn load_file(config_path: &Path) -> Result<AuditConfig> {
    if !config_path.exists() {
        return Err(AuditError::ConfigNotFound(config_path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(config_path)?;
    let config: AuditConfig = if contents.trim().is_empty() {
        AuditConfig::default()
    } else {
        serde_yaml::from_str(&contents).map_err(|e| AuditError::InvalidConfig(e.to_string()))?
    };
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &AuditConfig) -> Result<()> {
    if config.gcloud_path.trim().is_empty() {
        return Err(AuditError::InvalidConfig("gcloud_path must not be empty".into()));
    }
    if config.projects_args.is_empty() {
        return Err(AuditError::InvalidConfig("projects_args must not be empty".into()));
    }
    if config.versions_args.is_empty() {
        return Err(AuditError::InvalidConfig("versions_args must not be empty".into()));
    }
    if config.command_timeout_secs == 0 || config.probe_timeout_secs == 0 {
        return Err(AuditError::InvalidConfig("timeouts must be greater than zero".into()));
    }
    Ok(())
}
