//! Seedscan Core - seed phrase balance scanning
//!
//! This library derives the standard Bitcoin and Ethereum addresses of BIP-39
//! seed phrases, looks up their balances on public block explorers, values
//! them in USD and reports the seeds that hold funds.

pub mod error;
pub mod crypto;
pub mod account;
pub mod explorer;
pub mod pricing;
pub mod report;
pub mod scan;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use crypto::keys::KeyType;
pub use scan::{Report, ScanSummary, Scanner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
