pub mod config_loader;
pub mod dedupe;
pub mod gcloud;
pub mod inventory;
pub mod lockdown;
pub mod observer;
pub mod orchestrator;
pub mod report_store;
pub mod url;
