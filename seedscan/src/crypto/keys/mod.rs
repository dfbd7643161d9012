//! Key derivation and management
//!
//! This module provides functionality for deriving keys and rendering
//! addresses for the supported blockchains.

pub mod ethereum;
pub mod bitcoin;
mod derivation;

pub use derivation::*;
