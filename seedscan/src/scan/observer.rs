//! Scan progress reporting

use tracing::{debug, error, info, warn};

use crate::crypto::keys::KeyType;
use crate::error::Error;
use crate::pricing::ExchangeRates;
use crate::report::ResultRecord;
use super::scanner::ScanSummary;

/// Something that happened while scanning
///
/// Seeds are identified by their 1-based position among the loaded phrases so
/// that the phrases themselves never reach the log.
#[derive(Debug)]
pub enum ScanEvent<'a> {
    /// Spot rates were fetched
    RatesFetched(&'a ExchangeRates),
    /// Spot rates could not be fetched; the scan stops
    RatesUnavailable(&'a Error),
    /// A phrase failed mnemonic validation and was skipped
    SeedInvalid { index: usize, error: &'a Error },
    /// An address could not be derived; the chain counts as absent
    DerivationFailed { index: usize, key_type: KeyType, error: &'a Error },
    /// No address could be derived for any chain; the seed was skipped
    SeedSkipped { index: usize },
    /// A balance was fetched
    BalanceFetched { index: usize, key_type: KeyType, address: &'a str, balance: u128 },
    /// A balance could not be fetched; the chain counts as absent
    BalanceUnavailable { index: usize, key_type: KeyType, address: &'a str, error: &'a Error },
    /// A seed was fully checked
    SeedChecked { index: usize, total_usd: f64 },
    /// A seed holds funds and was added to the report
    RecordEmitted { index: usize, record: &'a ResultRecord },
    /// The scan completed
    Finished(&'a ScanSummary),
}

/// Receives scan events
pub trait ScanObserver: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: &ScanEvent<'_>);
}

/// Observer that writes events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn on_event(&self, event: &ScanEvent<'_>) {
        match event {
            ScanEvent::RatesFetched(rates) => {
                info!(btc_usd = rates.btc_usd, eth_usd = rates.eth_usd, "Fetched exchange rates");
            }
            ScanEvent::RatesUnavailable(error) => {
                error!(%error, "Error fetching exchange rates, aborting scan");
            }
            ScanEvent::SeedInvalid { index, error } => {
                warn!(seed = index, %error, "Invalid seed phrase");
            }
            ScanEvent::DerivationFailed { index, key_type, error } => {
                error!(seed = index, chain = %key_type, %error, "Error deriving address");
            }
            ScanEvent::SeedSkipped { index } => {
                warn!(seed = index, "No address could be derived, skipping seed");
            }
            ScanEvent::BalanceFetched { index, key_type, address, balance } => {
                debug!(seed = index, chain = %key_type, address, balance = %balance, "Fetched balance");
            }
            ScanEvent::BalanceUnavailable { index, key_type, address, error } => {
                error!(seed = index, chain = %key_type, address, %error, "Error fetching balance");
            }
            ScanEvent::SeedChecked { index, total_usd } => {
                info!(seed = index, "Total USD balance: ${:.2}", total_usd);
            }
            ScanEvent::RecordEmitted { index, record } => {
                info!(seed = index, total_usd = record.total_usd(), "Seed holds funds");
            }
            ScanEvent::Finished(summary) => {
                info!(
                    seeds = summary.seeds,
                    invalid = summary.invalid,
                    skipped = summary.skipped,
                    checked = summary.checked,
                    records = summary.records,
                    "Scan finished"
                );
            }
        }
    }
}
