//! USD spot rates for the supported chains

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::crypto::keys::KeyType;
use crate::error::{Error, Result};
use crate::explorer::provider::{get_text, ProviderConfig};

/// Default CoinGecko endpoint
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// USD price of one whole coin of each supported chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRates {
    /// USD per BTC
    pub btc_usd: f64,
    /// USD per ETH
    pub eth_usd: f64,
}

impl ExchangeRates {
    /// Create a rate pair, rejecting prices that cannot be used for conversion
    pub fn new(btc_usd: f64, eth_usd: f64) -> Result<Self> {
        for (key_type, rate) in [(KeyType::Bitcoin, btc_usd), (KeyType::Ethereum, eth_usd)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(Error::RateUnavailable(format!("{} rate {} is not a usable price", key_type, rate)));
            }
        }

        Ok(Self { btc_usd, eth_usd })
    }

    /// USD per whole coin of `key_type`
    pub fn usd_per_coin(&self, key_type: KeyType) -> f64 {
        match key_type {
            KeyType::Bitcoin => self.btc_usd,
            KeyType::Ethereum => self.eth_usd,
        }
    }
}

/// A service that quotes USD spot prices
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch BTC/USD and ETH/USD together
    async fn fetch_rates(&self) -> Result<ExchangeRates>;
}

fn coingecko_id(key_type: KeyType) -> &'static str {
    match key_type {
        KeyType::Bitcoin => "bitcoin",
        KeyType::Ethereum => "ethereum",
    }
}

#[derive(Debug, Deserialize)]
struct CoinGeckoQuote {
    usd: Option<f64>,
}

/// Parse a `simple/price` response into exchange rates
pub fn parse_coingecko_rates(status: u16, body: &str) -> Result<ExchangeRates> {
    if status != 200 {
        return Err(Error::RateUnavailable(format!("status {}: {}", status, body)));
    }

    let quotes: HashMap<String, CoinGeckoQuote> = serde_json::from_str(body)
        .map_err(|e| Error::RateUnavailable(format!("Failed to parse response: {}", e)))?;

    let usd = |key_type: KeyType| {
        quotes.get(coingecko_id(key_type))
            .and_then(|quote| quote.usd)
            .ok_or_else(|| Error::RateUnavailable(format!("No USD price for {}", key_type)))
    };

    ExchangeRates::new(usd(KeyType::Bitcoin)?, usd(KeyType::Ethereum)?)
}

/// CoinGecko API provider implementation
pub struct CoinGeckoProvider {
    /// Provider configuration
    config: ProviderConfig,
    /// HTTP client
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    /// Create a new CoinGecko provider
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = config.http_client()?;

        Ok(Self {
            config,
            client,
        })
    }
}

#[async_trait]
impl RateProvider for CoinGeckoProvider {
    async fn fetch_rates(&self) -> Result<ExchangeRates> {
        let ids = KeyType::ALL.map(coingecko_id).join(",");
        let url = format!("{}/simple/price", self.config.base_url());

        let mut request = self.client.get(&url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", "usd")]);
        if let Some(ref api_key) = self.config.api_key {
            request = request.header("x-cg-demo-api-key", api_key);
        }

        let (status, body) = get_text(request)
            .await
            .map_err(|e| Error::RateUnavailable(e.to_string()))?;

        parse_coingecko_rates(status, &body)
    }
}
