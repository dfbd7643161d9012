//! Block explorer balance lookups
//!
//! This module provides the providers that query third-party explorers for
//! the confirmed balance of an address, in the chain's base unit.

pub mod provider;
mod bitcoin;
mod ethereum;

pub use provider::*;
pub use bitcoin::*;
pub use ethereum::*;
