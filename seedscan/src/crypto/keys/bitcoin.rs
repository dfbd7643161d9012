//! Bitcoin key derivation

use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1};
pub use bitcoin::Network;

use crate::error::{Error, Result};
use super::derivation::{derive_secret_key, KeyType, PublicKey};

/// BIP-44 path of the first external address of the first legacy account
pub const BITCOIN_DERIVATION_PATH: &str = "m/44'/0'/0'/0/0";

/// Derive the compressed Bitcoin public key at `path`
pub fn derive_bitcoin_public_key(seed: &[u8], path: &str) -> Result<PublicKey> {
    let secret_key = derive_secret_key(seed, path)?;

    let secp = Secp256k1::new();
    let public_key = Secp256k1PublicKey::from_secret_key(&secp, &secret_key);

    Ok(PublicKey::new(public_key.serialize().to_vec(), KeyType::Bitcoin))
}

/// Get the P2PKH Bitcoin address of a compressed public key
pub fn public_key_to_address(public_key: &PublicKey, network: Network) -> Result<String> {
    if public_key.key_type() != KeyType::Bitcoin {
        return Err(Error::KeyDerivation("Not a Bitcoin public key".to_string()));
    }

    let public_key = public_key.as_bytes();

    if public_key.len() != 33 {
        return Err(Error::KeyDerivation("Invalid Bitcoin public key length".to_string()));
    }

    let public_key = bitcoin::PublicKey::from_slice(public_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid Bitcoin public key: {}", e)))?;

    Ok(bitcoin::Address::p2pkh(&public_key, network).to_string())
}
