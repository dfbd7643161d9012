//! Cryptographic primitives and operations
//!
//! This module provides mnemonic validation and the BIP-32 key derivation
//! used to turn a seed phrase into chain addresses.

pub mod mnemonic;
pub mod keys;

pub use mnemonic::*;
pub use keys::*;
