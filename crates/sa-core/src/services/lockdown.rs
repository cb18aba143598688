use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::StatusCode;

use crate::error::{AuditError, Result};
use crate::models::AuditConfig;

/// Decides whether a URL rejects unauthenticated access.
#[async_trait]
pub trait LockdownProbe: Send + Sync {
    async fn check_lockdown(&self, url: &str) -> Result<bool>;
}

/// Probe that fetches the URL without credentials and inspects where it lands.
pub struct HttpLockdownProbe {
    client: reqwest::Client,
    login_hosts: Vec<String>,
}

impl HttpLockdownProbe {
    pub fn new(config: &AuditConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.probe_timeout())
            .redirect(Policy::limited(config.max_redirects));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| AuditError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            login_hosts: config.login_hosts.clone(),
        })
    }
}

#[async_trait]
impl LockdownProbe for HttpLockdownProbe {
    async fn check_lockdown(&self, url: &str) -> Result<bool> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AuditError::Probe {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        let status = response.status();
        let final_host = response.url().host_str().map(str::to_string);
        tracing::debug!(url, %status, final_host = ?final_host, "probe response");
        Ok(is_locked_down(
            status,
            final_host.as_deref(),
            &self.login_hosts,
        ))
    }
}

/// A response is locked down when it refuses outright or when redirects
/// ended on a sign-in host.
pub fn is_locked_down(status: StatusCode, final_host: Option<&str>, login_hosts: &[String]) -> bool {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return true;
    }
    match final_host {
        Some(host) => login_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)),
        None => false,
    }
}
