//! Seed scanning pipeline
//!
//! This module drives each seed phrase through validation, address
//! derivation, balance lookup and USD conversion, collecting a report of the
//! seeds that hold funds.

mod pacing;
mod observer;
mod scanner;

pub use pacing::*;
pub use observer::*;
pub use scanner::*;
