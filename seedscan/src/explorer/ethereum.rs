//! Ethereum balances from the Etherscan API

use async_trait::async_trait;
use serde::Deserialize;

use crate::crypto::keys::KeyType;
use crate::error::{Error, Result};
use super::provider::{ensure_ok, get_text, BalanceProvider, ProviderConfig};

/// Default Etherscan v2 endpoint
pub const DEFAULT_ETHERSCAN_URL: &str = "https://api.etherscan.io/v2/api";

/// Ethereum mainnet chain id
pub const MAINNET_CHAIN_ID: u64 = 1;

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    #[serde(default)]
    result: serde_json::Value,
}

/// Parse an Etherscan `account/balance` response into a wei balance
///
/// Etherscan answers errors with status 200 and a message in `result`, so the
/// field must hold a decimal integer to count as a balance. Etherscan sends
/// that integer as a string; a bare JSON number is accepted only while it
/// fits in a `u64`, since larger ones have already been rounded to `f64` by
/// the JSON parser.
pub fn parse_etherscan_balance(status: u16, body: &str) -> Result<u128> {
    ensure_ok(status, body)?;

    let response: EtherscanResponse = serde_json::from_str(body)
        .map_err(|e| Error::bad_body(status, body, e))?;

    match &response.result {
        serde_json::Value::String(s) => s.trim()
            .parse::<u128>()
            .map_err(|e| Error::bad_body(status, body, e)),
        serde_json::Value::Number(n) => n.as_u64()
            .map(u128::from)
            .ok_or_else(|| Error::bad_body(status, body, "numeric result is not an exact non-negative integer")),
        _ => Err(Error::bad_body(status, body, "missing result")),
    }
}

/// Ethereum balance provider backed by Etherscan
pub struct EtherscanProvider {
    /// Provider configuration
    config: ProviderConfig,
    /// Chain id passed to the multichain endpoint
    chain_id: u64,
    /// HTTP client
    client: reqwest::Client,
}

impl EtherscanProvider {
    /// Create a new Etherscan provider
    ///
    /// The configuration must carry the Etherscan API key.
    pub fn new(config: ProviderConfig, chain_id: u64) -> Result<Self> {
        if config.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(Error::Config("Etherscan API key is required".to_string()));
        }

        let client = config.http_client()?;

        Ok(Self {
            config,
            chain_id,
            client,
        })
    }
}

#[async_trait]
impl BalanceProvider for EtherscanProvider {
    fn key_type(&self) -> KeyType {
        KeyType::Ethereum
    }

    async fn fetch_balance(&self, address: &str) -> Result<u128> {
        let chain_id = self.chain_id.to_string();
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        let request = self.client.get(self.config.base_url()).query(&[
            ("chainid", chain_id.as_str()),
            ("module", "account"),
            ("action", "balance"),
            ("address", address),
            ("tag", "latest"),
            ("apikey", api_key),
        ]);

        let (status, body) = get_text(request).await?;
        parse_etherscan_balance(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_wei_string() {
        let body = r#"{"status":"1","message":"OK","result":"500000000000000000"}"#;
        assert_eq!(parse_etherscan_balance(200, body).unwrap(), 500_000_000_000_000_000);
    }

    #[test]
    fn test_parses_zero() {
        let body = r#"{"status":"1","message":"OK","result":"0"}"#;
        assert_eq!(parse_etherscan_balance(200, body).unwrap(), 0);
    }

    #[test]
    fn test_numeric_result() {
        assert_eq!(parse_etherscan_balance(200, r#"{"result":42}"#).unwrap(), 42);
        assert_eq!(parse_etherscan_balance(200, r#"{"result":18446744073709551615}"#).unwrap(), u64::MAX as u128);

        // Past u64 the JSON parser only has an approximation
        let err = parse_etherscan_balance(200, r#"{"result":1000000000000000000000}"#).unwrap_err();
        match err {
            Error::BadResponse { status, body } => {
                assert_eq!(status, 200);
                assert!(body.contains("not an exact non-negative integer"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(parse_etherscan_balance(200, r#"{"result":-1}"#).is_err());
        assert!(parse_etherscan_balance(200, r#"{"result":1.5}"#).is_err());
    }

    #[test]
    fn test_wide_string_result() {
        let body = r#"{"status":"1","message":"OK","result":"1000000000000000000000"}"#;
        assert_eq!(parse_etherscan_balance(200, body).unwrap(), 1_000_000_000_000_000_000_000);
    }

    #[test]
    fn test_error_message_in_result_is_bad_response() {
        let body = r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#;
        let err = parse_etherscan_balance(200, body).unwrap_err();

        match err {
            Error::BadResponse { status, body } => {
                assert_eq!(status, 200);
                assert!(body.contains("Invalid API Key"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_200_keeps_body() {
        let err = parse_etherscan_balance(503, "maintenance").unwrap_err();
        assert!(matches!(err, Error::BadResponse { status: 503, ref body } if body == "maintenance"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(parse_etherscan_balance(200, "{not json").is_err());
        assert!(parse_etherscan_balance(200, r#"{"status":"1"}"#).is_err());
    }

    #[test]
    fn test_provider_requires_api_key() {
        let config = ProviderConfig::new(DEFAULT_ETHERSCAN_URL);
        assert!(matches!(EtherscanProvider::new(config, MAINNET_CHAIN_ID), Err(Error::Config(_))));

        let config = ProviderConfig::new(DEFAULT_ETHERSCAN_URL).with_api_key("key");
        let provider = EtherscanProvider::new(config, MAINNET_CHAIN_ID).unwrap();
        assert_eq!(provider.key_type(), KeyType::Ethereum);
    }
}
