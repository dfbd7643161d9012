//! Common BIP-32 key derivation functionality

use std::fmt;

use hmac::{Hmac, Mac};
use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use sha2::Sha512;

use crate::error::{Error, Result};

/// Offset added to an index to mark it hardened
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Supported key types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Bitcoin
    Bitcoin,
    /// Ethereum
    Ethereum,
}

impl KeyType {
    /// Every supported chain, in report order
    pub const ALL: [KeyType; 2] = [KeyType::Bitcoin, KeyType::Ethereum];

    /// Ticker symbol
    pub fn ticker(&self) -> &'static str {
        match self {
            Self::Bitcoin => "BTC",
            Self::Ethereum => "ETH",
        }
    }

    /// Human readable chain name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bitcoin => "Bitcoin",
            Self::Ethereum => "Ethereum",
        }
    }

    /// Name of the smallest indivisible unit
    pub fn base_unit(&self) -> &'static str {
        match self {
            Self::Bitcoin => "satoshis",
            Self::Ethereum => "wei",
        }
    }

    /// Number of base units in one whole coin
    pub fn unit_divisor(&self) -> f64 {
        match self {
            Self::Bitcoin => 1e8,
            Self::Ethereum => 1e18,
        }
    }

    /// Standard BIP-44 path of the first receiving address
    pub fn derivation_path(&self) -> &'static str {
        match self {
            Self::Bitcoin => super::bitcoin::BITCOIN_DERIVATION_PATH,
            Self::Ethereum => super::ethereum::ETHEREUM_DERIVATION_PATH,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

/// A public key for a specific blockchain
#[derive(Debug, Clone)]
pub struct PublicKey {
    /// The raw public key bytes
    bytes: Vec<u8>,
    /// The type of key
    key_type: KeyType,
}

impl PublicKey {
    /// Create a new public key from bytes
    pub fn new(bytes: Vec<u8>, key_type: KeyType) -> Self {
        Self { bytes, key_type }
    }

    /// Get the raw public key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the key type
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }
}

/// Derive the public key at `path` for a specific blockchain
///
/// Bitcoin keys are SEC1 compressed, Ethereum keys uncompressed.
pub fn derive_public_key(seed: &[u8], key_type: KeyType, path: &str) -> Result<PublicKey> {
    match key_type {
        KeyType::Bitcoin => super::bitcoin::derive_bitcoin_public_key(seed, path),
        KeyType::Ethereum => super::ethereum::derive_ethereum_public_key(seed, path),
    }
}

/// Derive the secp256k1 secret key at `path` below the master key of `seed`
pub(crate) fn derive_secret_key(seed: &[u8], path: &str) -> Result<SecretKey> {
    let path_components = parse_derivation_path(path)?;

    let (mut secret_key, mut chain_code) = derive_master_key(seed)?;

    for component in path_components {
        (secret_key, chain_code) = derive_child_key(secret_key, chain_code, component)?;
    }

    SecretKey::from_slice(&secret_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid secret key: {}", e)))
}

/// Parse a BIP-32 derivation path
pub fn parse_derivation_path(path: &str) -> Result<Vec<u32>> {
    if path != "m" && !path.starts_with("m/") {
        return Err(Error::KeyDerivation(format!("Invalid derivation path: {}", path)));
    }

    let components = path.trim_start_matches('m').trim_start_matches('/').split('/');
    let mut result = Vec::new();

    for component in components {
        if component.is_empty() {
            continue;
        }

        let (digits, hardened) = match component.strip_suffix('\'').or_else(|| component.strip_suffix('h')) {
            Some(digits) => (digits, true),
            None => (component, false),
        };

        let index = digits.parse::<u32>()
            .ok()
            .filter(|index| *index < HARDENED_OFFSET)
            .ok_or_else(|| Error::KeyDerivation(format!("Invalid derivation path component: {}", component)))?;

        result.push(if hardened { index + HARDENED_OFFSET } else { index });
    }

    Ok(result)
}

/// Derive the master key from a seed
fn derive_master_key(seed: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = Hmac::<Sha512>::new_from_slice(b"Bitcoin seed")
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(seed);
    let result = hmac.finalize().into_bytes();

    let mut secret_key = [0u8; 32];
    let mut chain_code = [0u8; 32];

    secret_key.copy_from_slice(&result[0..32]);
    chain_code.copy_from_slice(&result[32..64]);

    // The master key must itself be a valid scalar
    SecretKey::from_slice(&secret_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid master key: {}", e)))?;

    Ok((secret_key, chain_code))
}

/// Derive a child key from a parent key
fn derive_child_key(parent_key: [u8; 32], parent_chain_code: [u8; 32], index: u32) -> Result<([u8; 32], [u8; 32])> {
    let secp = Secp256k1::new();
    let parent_secret_key = SecretKey::from_slice(&parent_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid parent key: {}", e)))?;

    let mut data = Vec::with_capacity(37);

    if index >= HARDENED_OFFSET {
        data.push(0);
        data.extend_from_slice(&parent_key);
    } else {
        let parent_public_key = Secp256k1PublicKey::from_secret_key(&secp, &parent_secret_key);
        data.extend_from_slice(&parent_public_key.serialize());
    }

    data.extend_from_slice(&index.to_be_bytes());

    let mut hmac = Hmac::<Sha512>::new_from_slice(&parent_chain_code)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(&data);
    let result = hmac.finalize().into_bytes();

    let mut child_chain_code = [0u8; 32];
    child_chain_code.copy_from_slice(&result[32..64]);

    // child = IL + parent (mod n)
    let tweak = SecretKey::from_slice(&result[0..32])
        .map_err(|e| Error::KeyDerivation(format!("Invalid child key: {}", e)))?;

    let child_secret_key = tweak.add_tweak(&parent_secret_key.into())
        .map_err(|e| Error::KeyDerivation(format!("Key addition error: {}", e)))?;

    Ok((child_secret_key.secret_bytes(), child_chain_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_derivation_path() {
        assert_eq!(
            parse_derivation_path("m/44'/0'/0'/0/0").unwrap(),
            vec![44 + HARDENED_OFFSET, HARDENED_OFFSET, HARDENED_OFFSET, 0, 0]
        );
        assert_eq!(parse_derivation_path("m/44h/60h").unwrap(), vec![44 + HARDENED_OFFSET, 60 + HARDENED_OFFSET]);
        assert!(parse_derivation_path("m").unwrap().is_empty());
    }

    #[test]
    fn test_parse_derivation_path_rejects_garbage() {
        assert!(parse_derivation_path("44'/0'").is_err());
        assert!(parse_derivation_path("m/abc").is_err());
        assert!(parse_derivation_path("m/2147483648").is_err());
        assert!(parse_derivation_path("mx/0").is_err());
    }

    #[test]
    fn test_bip32_vector_1_master_and_child() {
        // BIP-32 test vector 1
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();

        let master = derive_secret_key(&seed, "m").unwrap();
        assert_eq!(
            hex::encode(master.secret_bytes()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );

        let child = derive_secret_key(&seed, "m/0'").unwrap();
        assert_eq!(
            hex::encode(child.secret_bytes()),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
    }
}
