//! Bitcoin balances from an Esplora-compatible explorer

use async_trait::async_trait;
use serde::Deserialize;

use crate::crypto::keys::KeyType;
use crate::error::{Error, Result};
use super::provider::{ensure_ok, get_text, BalanceProvider, ProviderConfig};

/// Default Esplora endpoint
pub const DEFAULT_ESPLORA_URL: &str = "https://blockstream.info/api";

/// Confirmed transaction output totals of an address
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainStats {
    /// Sum of all outputs ever paid to the address, in satoshis
    #[serde(default)]
    pub funded_txo_sum: u64,
    /// Sum of those outputs that have been spent, in satoshis
    #[serde(default)]
    pub spent_txo_sum: u64,
}

/// Address summary returned by `GET /address/{address}`
#[derive(Debug, Clone, Deserialize)]
pub struct AddressSummary {
    /// Confirmed on-chain statistics
    #[serde(default)]
    pub chain_stats: ChainStats,
}

/// Parse an address summary response into a satoshi balance
pub fn parse_esplora_balance(status: u16, body: &str) -> Result<u128> {
    ensure_ok(status, body)?;

    let summary: AddressSummary = serde_json::from_str(body)
        .map_err(|e| Error::bad_body(status, body, e))?;

    let stats = summary.chain_stats;
    stats.funded_txo_sum
        .checked_sub(stats.spent_txo_sum)
        .map(u128::from)
        .ok_or_else(|| Error::bad_body(status, body, "spent exceeds funded"))
}

/// Bitcoin balance provider backed by Esplora
pub struct EsploraProvider {
    /// Provider configuration
    config: ProviderConfig,
    /// HTTP client
    client: reqwest::Client,
}

impl EsploraProvider {
    /// Create a new Esplora provider
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = config.http_client()?;

        Ok(Self {
            config,
            client,
        })
    }
}

#[async_trait]
impl BalanceProvider for EsploraProvider {
    fn key_type(&self) -> KeyType {
        KeyType::Bitcoin
    }

    async fn fetch_balance(&self, address: &str) -> Result<u128> {
        let url = format!("{}/address/{}", self.config.base_url(), address);

        let (status, body) = get_text(self.client.get(&url)).await?;
        parse_esplora_balance(status, &body)
    }
}
