pub mod config;
pub mod inventory;
pub mod site;

pub use config::{AuditConfig, ProbeErrorPolicy};
pub use inventory::{ProjectId, SkipReason, VersionId, VersionListing};
pub use site::{AuditReport, ResultMapping, SiteDefinition, SkippedProject};
