//! Seedscan CLI
//!
//! Reads seed phrases from a file, checks the BTC and ETH balances of their
//! standard addresses and writes a report of the funded ones.

mod config;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seedscan::explorer::{EsploraProvider, EtherscanProvider};
use seedscan::pricing::CoinGeckoProvider;
use seedscan::report::load_seeds;
use seedscan::scan::TokenBucket;
use seedscan::Scanner;

use crate::config::{Cli, Config};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_cli(cli)?;

    let seeds = match load_seeds(&config.input) {
        Ok(seeds) => seeds,
        Err(e) => {
            error!(error = %e, input = %config.input.display(), "Error reading seed file");
            return Ok(());
        }
    };
    info!(count = seeds.len(), input = %config.input.display(), "Loaded seeds");

    let mut scanner = Scanner::new(
        Box::new(CoinGeckoProvider::new(config.coingecko.clone())?),
        Box::new(EsploraProvider::new(config.esplora.clone())?),
        Box::new(EtherscanProvider::new(config.etherscan.clone(), config.etherscan_chain_id)?),
    )?
    .with_pacer(Box::new(TokenBucket::new(config.seeds_per_second, 1.0)));

    let report = match scanner.run(&seeds).await {
        Ok(report) => report,
        Err(e) => {
            // The scanner has already reported the cause; nothing is written.
            error!(error = %e, "Scan aborted, no results written");
            return Ok(());
        }
    };

    match report.write_to(&config.output) {
        Ok(true) => info!(records = report.records.len(), output = %config.output.display(), "Results saved"),
        Ok(false) => info!("No funded seeds found, nothing written"),
        Err(e) => error!(error = %e, output = %config.output.display(), "Error writing results"),
    }

    Ok(())
}
