use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("inventory command could not be executed: {0}")]
    Inventory(String),

    #[error("project listing failed: {0}")]
    ProjectListing(String),

    #[error("inventory preflight failed: {0}")]
    Preflight(String),

    #[error("lockdown probe failed for {url}: {message}")]
    Probe { url: String, message: String },

    #[error("report write failed: {0}")]
    Report(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
