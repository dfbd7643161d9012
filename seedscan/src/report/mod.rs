//! Scan results and their plain-text report
//!
//! This module provides USD conversion, the per-seed result record, and the
//! flat files the scanner reads seeds from and writes reports to.

mod record;
mod files;

pub use record::*;
pub use files::*;
