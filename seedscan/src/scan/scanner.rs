//! The scanner

use std::path::Path;
use std::sync::Arc;

use crate::account::{derive_seed_address, DerivedAddress};
use crate::crypto::keys::KeyType;
use crate::crypto::mnemonic::mnemonic_to_seed;
use crate::error::{Error, Result};
use crate::explorer::BalanceProvider;
use crate::pricing::{ExchangeRates, RateProvider};
use crate::report::{write_records, ChainHolding, ResultRecord};
use super::observer::{ScanEvent, ScanObserver, TracingObserver};
use super::pacing::{Pacer, TokenBucket};

/// Counts describing one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Seed phrases handed to the scanner
    pub seeds: usize,
    /// Phrases rejected by mnemonic validation
    pub invalid: usize,
    /// Valid phrases for which no address could be derived
    pub skipped: usize,
    /// Phrases whose balances were looked up
    pub checked: usize,
    /// Records emitted
    pub records: usize,
}

/// Outcome of a scan: records in input order plus counts
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Seeds holding funds, in input order
    pub records: Vec<ResultRecord>,
    /// Scan counts
    pub summary: ScanSummary,
}

impl Report {
    /// Write the records to `path` if there are any; returns whether it wrote
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<bool> {
        write_records(path, &self.records)
    }
}

/// Drives seed phrases through derivation, balance lookup and valuation
pub struct Scanner {
    rate_provider: Box<dyn RateProvider>,
    bitcoin: Box<dyn BalanceProvider>,
    ethereum: Box<dyn BalanceProvider>,
    pacer: Box<dyn Pacer>,
    observer: Arc<dyn ScanObserver>,
}

impl Scanner {
    /// Create a scanner pacing one seed per second and logging through `tracing`
    pub fn new(
        rate_provider: Box<dyn RateProvider>,
        bitcoin: Box<dyn BalanceProvider>,
        ethereum: Box<dyn BalanceProvider>,
    ) -> Result<Self> {
        for (expected, provider) in [(KeyType::Bitcoin, &bitcoin), (KeyType::Ethereum, &ethereum)] {
            if provider.key_type() != expected {
                return Err(Error::Config(format!(
                    "{} balance provider answers for {}",
                    expected,
                    provider.key_type()
                )));
            }
        }

        Ok(Self {
            rate_provider,
            bitcoin,
            ethereum,
            pacer: Box::new(TokenBucket::default()),
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the pacing policy
    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Replace the event observer
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn balance_provider(&self, key_type: KeyType) -> &dyn BalanceProvider {
        match key_type {
            KeyType::Bitcoin => self.bitcoin.as_ref(),
            KeyType::Ethereum => self.ethereum.as_ref(),
        }
    }

    /// Scan `seeds` in order
    ///
    /// Rates are fetched once up front; if that fails no seed is processed
    /// and the error is returned. Every other failure is confined to the
    /// chain or seed it concerns.
    pub async fn run(&mut self, seeds: &[String]) -> Result<Report> {
        let rates = match self.rate_provider.fetch_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                self.observer.on_event(&ScanEvent::RatesUnavailable(&e));
                return Err(e);
            }
        };
        self.observer.on_event(&ScanEvent::RatesFetched(&rates));

        let mut report = Report::default();
        report.summary.seeds = seeds.len();

        for (position, seed) in seeds.iter().enumerate() {
            let index = position + 1;

            // Validation and the BIP-39 stretch share one parse
            let seed_bytes = match mnemonic_to_seed(seed, None) {
                Ok(seed_bytes) => seed_bytes,
                Err(error) => {
                    self.observer.on_event(&ScanEvent::SeedInvalid { index, error: &error });
                    report.summary.invalid += 1;
                    continue;
                }
            };

            let btc_address = self.derive(index, &seed_bytes, KeyType::Bitcoin);
            let eth_address = self.derive(index, &seed_bytes, KeyType::Ethereum);

            if btc_address.is_none() && eth_address.is_none() {
                self.observer.on_event(&ScanEvent::SeedSkipped { index });
                report.summary.skipped += 1;
                continue;
            }

            self.pacer.pace().await;

            let bitcoin = self.holding(index, KeyType::Bitcoin, btc_address, &rates).await;
            let ethereum = self.holding(index, KeyType::Ethereum, eth_address, &rates).await;
            report.summary.checked += 1;

            self.observer.on_event(&ScanEvent::SeedChecked { index, total_usd: bitcoin.usd + ethereum.usd });

            if let Some(record) = ResultRecord::from_holdings(seed, bitcoin, ethereum) {
                self.observer.on_event(&ScanEvent::RecordEmitted { index, record: &record });
                report.records.push(record);
            }
        }

        report.summary.records = report.records.len();
        self.observer.on_event(&ScanEvent::Finished(&report.summary));

        Ok(report)
    }

    fn derive(&self, index: usize, seed: &[u8], key_type: KeyType) -> Option<DerivedAddress> {
        match derive_seed_address(seed, key_type) {
            Ok(address) => Some(address),
            Err(error) => {
                self.observer.on_event(&ScanEvent::DerivationFailed { index, key_type, error: &error });
                None
            }
        }
    }

    async fn holding(
        &self,
        index: usize,
        key_type: KeyType,
        address: Option<DerivedAddress>,
        rates: &ExchangeRates,
    ) -> ChainHolding {
        let balance = match &address {
            Some(derived) => {
                match self.balance_provider(key_type).fetch_balance(derived.as_str()).await {
                    Ok(balance) => {
                        self.observer.on_event(&ScanEvent::BalanceFetched {
                            index,
                            key_type,
                            address: derived.as_str(),
                            balance,
                        });
                        Some(balance)
                    }
                    Err(error) => {
                        self.observer.on_event(&ScanEvent::BalanceUnavailable {
                            index,
                            key_type,
                            address: derived.as_str(),
                            error: &error,
                        });
                        None
                    }
                }
            }
            None => None,
        };

        ChainHolding::new(key_type, address, balance, rates)
    }
}
