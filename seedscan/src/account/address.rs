//! Address derivation from seed phrases

use crate::crypto::keys::{self, KeyType, PublicKey};
use crate::crypto::mnemonic::mnemonic_to_seed;
use crate::error::Result;

/// An address derived from a seed phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    /// The address string in the blockchain's native format
    pub address: String,
    /// The chain this address belongs to
    pub key_type: KeyType,
    /// The derivation path used to generate this address
    pub path: String,
}

impl DerivedAddress {
    /// Create a new address
    pub fn new(address: String, key_type: KeyType, path: String) -> Self {
        Self {
            address,
            key_type,
            path,
        }
    }

    /// Get the address string
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Get the key type
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Get the derivation path
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Render a public key as an address for its chain
pub fn public_key_address(public_key: &PublicKey, path: &str) -> Result<DerivedAddress> {
    let address = match public_key.key_type() {
        KeyType::Bitcoin => keys::bitcoin::public_key_to_address(public_key, keys::bitcoin::Network::Bitcoin)?,
        KeyType::Ethereum => keys::ethereum::public_key_to_address(public_key)?,
    };

    Ok(DerivedAddress::new(address, public_key.key_type(), path.to_string()))
}

/// Derive the standard address of `key_type` from a BIP-39 seed
///
/// The key is taken from the chain's BIP-44 path.
pub fn derive_seed_address(seed: &[u8], key_type: KeyType) -> Result<DerivedAddress> {
    let path = key_type.derivation_path();
    let public_key = keys::derive_public_key(seed, key_type, path)?;

    public_key_address(&public_key, path)
}

/// Derive the standard address of `key_type` for a seed phrase
///
/// The BIP-39 seed is computed with an empty passphrase.
pub fn derive_address(phrase: &str, key_type: KeyType) -> Result<DerivedAddress> {
    let seed = mnemonic_to_seed(phrase, None)?;

    derive_seed_address(&seed, key_type)
}

/// Derive the legacy P2PKH Bitcoin address at `m/44'/0'/0'/0/0`
pub fn derive_btc_address(phrase: &str) -> Result<DerivedAddress> {
    derive_address(phrase, KeyType::Bitcoin)
}

/// Derive the checksummed Ethereum address at `m/44'/60'/0'/0/0`
pub fn derive_eth_address(phrase: &str) -> Result<DerivedAddress> {
    derive_address(phrase, KeyType::Ethereum)
}
