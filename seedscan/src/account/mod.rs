//! Account address derivation
//!
//! This module turns a seed phrase into the addresses the scanner queries,
//! one per supported chain, using each chain's standard derivation path.

mod address;

pub use address::*;
