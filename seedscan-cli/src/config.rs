//! Command-line and environment configuration

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use seedscan::explorer::{ProviderConfig, DEFAULT_ESPLORA_URL, DEFAULT_ETHERSCAN_URL, MAINNET_CHAIN_ID};
use seedscan::pricing::DEFAULT_COINGECKO_URL;

/// Environment variable holding the Etherscan API key
pub const ETHERSCAN_API_KEY: &str = "ETHERSCAN_API_KEY";
/// Environment variable holding an optional CoinGecko demo API key
pub const COINGECKO_API_KEY: &str = "COINGECKO_API_KEY";

#[derive(Parser, Debug, Clone)]
#[command(name = "seedscan")]
#[command(about = "Check the BTC and ETH balances of a list of BIP-39 seed phrases")]
#[command(version)]
pub struct Cli {
    /// File with one seed phrase per line
    #[arg(short, long, default_value = "seeds.txt")]
    pub input: PathBuf,

    /// Report file, written only when a seed holds funds
    #[arg(short, long, default_value = "results.txt")]
    pub output: PathBuf,

    /// Seeds checked per second
    #[arg(long, default_value_t = 1.0)]
    pub seeds_per_second: f64,

    /// Esplora API base URL (defaults to $ESPLORA_API_URL or Blockstream)
    #[arg(long)]
    pub esplora_url: Option<String>,

    /// Etherscan API base URL (defaults to $ETHERSCAN_API_URL or Etherscan v2)
    #[arg(long)]
    pub etherscan_url: Option<String>,

    /// Chain id passed to Etherscan
    #[arg(long, default_value_t = MAINNET_CHAIN_ID)]
    pub etherscan_chain_id: u64,

    /// CoinGecko API base URL (defaults to $COINGECKO_API_URL or the public API)
    #[arg(long)]
    pub coingecko_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub seeds_per_second: f64,
    pub esplora: ProviderConfig,
    pub etherscan: ProviderConfig,
    pub etherscan_chain_id: u64,
    pub coingecko: ProviderConfig,
}

impl Config {
    /// Resolve the command line against the process environment
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Resolve the command line against `env`
    pub fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |name: &str| env(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if !cli.seeds_per_second.is_finite() || cli.seeds_per_second <= 0.0 {
            bail!("--seeds-per-second must be a positive number, got {}", cli.seeds_per_second);
        }

        let Some(etherscan_key) = env(ETHERSCAN_API_KEY) else {
            bail!("{} is not set; export it or add it to .env", ETHERSCAN_API_KEY);
        };

        let url = |flag: Option<String>, var: &str, default: &str| {
            flag.or_else(|| env(var)).unwrap_or_else(|| default.to_string())
        };

        let esplora = ProviderConfig::new(url(cli.esplora_url, "ESPLORA_API_URL", DEFAULT_ESPLORA_URL))
            .with_timeout(cli.timeout_secs);

        let etherscan = ProviderConfig::new(url(cli.etherscan_url, "ETHERSCAN_API_URL", DEFAULT_ETHERSCAN_URL))
            .with_api_key(etherscan_key)
            .with_timeout(cli.timeout_secs);

        let mut coingecko = ProviderConfig::new(url(cli.coingecko_url, "COINGECKO_API_URL", DEFAULT_COINGECKO_URL))
            .with_timeout(cli.timeout_secs);
        if let Some(key) = env(COINGECKO_API_KEY) {
            coingecko = coingecko.with_api_key(key);
        }

        Ok(Self {
            input: cli.input,
            output: cli.output,
            seeds_per_second: cli.seeds_per_second,
            esplora,
            etherscan,
            etherscan_chain_id: cli.etherscan_chain_id,
            coingecko,
        })
    }
}
