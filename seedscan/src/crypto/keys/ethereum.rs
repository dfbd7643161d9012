//! Ethereum key derivation

use ethers_core::types::Address;
use ethers_core::utils::{keccak256, to_checksum};
use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1};

use crate::error::{Error, Result};
use super::derivation::{derive_secret_key, KeyType, PublicKey};

/// BIP-44 path of the first Ethereum account
pub const ETHEREUM_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// Derive the uncompressed Ethereum public key at `path`
pub fn derive_ethereum_public_key(seed: &[u8], path: &str) -> Result<PublicKey> {
    let secret_key = derive_secret_key(seed, path)?;

    let secp = Secp256k1::new();
    let public_key = Secp256k1PublicKey::from_secret_key(&secp, &secret_key);

    Ok(PublicKey::new(public_key.serialize_uncompressed().to_vec(), KeyType::Ethereum))
}

/// Get the EIP-55 checksummed Ethereum address from a public key
pub fn public_key_to_address(public_key: &PublicKey) -> Result<String> {
    if public_key.key_type() != KeyType::Ethereum {
        return Err(Error::KeyDerivation("Not an Ethereum public key".to_string()));
    }

    let public_key = public_key.as_bytes();

    // Uncompressed SEC1 encoding: 0x04 || X || Y
    if public_key.len() != 65 || public_key[0] != 0x04 {
        return Err(Error::KeyDerivation("Invalid Ethereum public key encoding".to_string()));
    }

    let key_hash = keccak256(&public_key[1..]);
    let address = Address::from_slice(&key_hash[12..]);

    Ok(to_checksum(&address, None))
}
