//! Explorer provider configuration and the balance lookup trait

use std::time::Duration;

use async_trait::async_trait;

use crate::crypto::keys::KeyType;
use crate::error::{Error, Result};

/// Provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider base URL
    pub url: String,
    /// API key (if required)
    pub api_key: Option<String>,
    /// Timeout in seconds
    pub timeout: Option<u64>,
}

impl ProviderConfig {
    /// Configuration with a base URL and no key or timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: None,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Build the HTTP client described by this configuration
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("seedscan/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        builder.build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

/// A service that reports the balance of an address on one chain
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// The chain this provider answers for
    fn key_type(&self) -> KeyType;

    /// Fetch the balance of `address` in the chain's base unit
    async fn fetch_balance(&self, address: &str) -> Result<u128>;
}

/// Issue a GET request and return the status code and body text
pub(crate) async fn get_text(request: reqwest::RequestBuilder) -> Result<(u16, String)> {
    let response = request.send()
        .await
        .map_err(|e| Error::Network(format!("Failed to send request: {}", e)))?;

    let status = response.status().as_u16();
    let body = response.text()
        .await
        .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;

    Ok((status, body))
}

/// Reject any status other than 200, keeping the body for the log
pub(crate) fn ensure_ok(status: u16, body: &str) -> Result<()> {
    if status == 200 {
        Ok(())
    } else {
        Err(Error::BadResponse { status, body: body.to_string() })
    }
}
