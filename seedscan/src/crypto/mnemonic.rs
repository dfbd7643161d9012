//! Mnemonic phrase validation and seed generation

use bip39::{Language, Mnemonic};
use crate::error::{Error, Result};

/// Parse a phrase against the English BIP-39 wordlist
fn parse_english(phrase: &str) -> Result<Mnemonic> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(Error::Mnemonic("empty phrase".to_string()));
    }

    Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| Error::Mnemonic(e.to_string()))
}

/// Validate a mnemonic phrase, returning the reason it was rejected
pub fn validate_mnemonic(phrase: &str) -> Result<()> {
    parse_english(phrase).map(|_| ())
}

/// Check whether a phrase is a valid English BIP-39 mnemonic
pub fn is_valid_mnemonic(phrase: &str) -> bool {
    validate_mnemonic(phrase).is_ok()
}

/// Generate a seed from a mnemonic phrase and optional passphrase
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Result<[u8; 64]> {
    let mnemonic = parse_english(phrase)?;

    Ok(mnemonic.to_seed_normalized(passphrase.unwrap_or("")))
}
