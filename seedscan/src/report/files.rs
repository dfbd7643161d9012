//! Seed input and report output files

use std::fs;
use std::path::Path;

use crate::error::Result;
use super::record::ResultRecord;

/// Split seed file contents into phrases, one per non-blank line
pub fn parse_seeds(contents: &str) -> Vec<String> {
    contents.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read every seed phrase from a file
pub fn load_seeds(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_seeds(&contents))
}

/// Render records as blocks separated by blank lines
pub fn render_records(records: &[ResultRecord]) -> String {
    records.iter()
        .map(|record| format!("{}\n", record))
        .collect()
}

/// Write records to `path`, skipping the write entirely when there are none
///
/// Returns whether the file was written.
pub fn write_records(path: impl AsRef<Path>, records: &[ResultRecord]) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    fs::write(path, render_records(records))?;
    Ok(true)
}
