// src/crypto/key_codec.rs
//! Key generation and `did:key` public-key encoding.
//!
//! Supports the two signature schemes of the system:
//! - Ed25519 (via `ed25519-dalek`)
//! - secp256k1 ECDSA (via `k256`)
//!
//! Public keys are framed per the
//! [did:key method](https://w3c-ccg.github.io/did-method-key/): a 2-byte
//! multicodec prefix is prepended to the raw key bytes, the result is
//! base58btc-encoded, and the multibase selector `'z'` is prefixed.
//! Encoding is deterministic; the same key bytes always produce the same
//! string, so third parties can recompute a DID from a public key.

use crate::errors::IdentityError;
use ed25519_dalek::SigningKey as Ed25519SigningKey;
use k256::ecdsa::SigningKey as Secp256k1SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Multibase selector for base58btc.
const MULTIBASE_BASE58BTC: char = 'z';

/// Multicodec prefix for Ed25519 public keys (0xed varint-encoded).
const ED25519_MULTICODEC_PREFIX: [u8; 2] = [0xED, 0x01];

/// Multicodec prefix for secp256k1 public keys (0xe7 varint-encoded).
const SECP256K1_MULTICODEC_PREFIX: [u8; 2] = [0xE7, 0x01];

/// The closed set of signature schemes the engine dispatches over.
///
/// Exactly two schemes exist and no plugin extensibility is required,
/// so dispatch is a tagged enum rather than trait objects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    Ed25519,
    Secp256k1,
}

impl KeyScheme {
    /// Parses a scheme tag as it appears in API requests and storage.
    ///
    /// # Errors
    /// Returns [`IdentityError::UnsupportedKeyType`] for any other tag.
    pub fn parse(tag: &str) -> Result<Self, IdentityError> {
        match tag {
            "ed25519" => Ok(KeyScheme::Ed25519),
            "secp256k1" => Ok(KeyScheme::Secp256k1),
            other => Err(IdentityError::UnsupportedKeyType(other.to_string())),
        }
    }

    /// The lowercase tag used in API payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyScheme::Ed25519 => "ed25519",
            KeyScheme::Secp256k1 => "secp256k1",
        }
    }

    /// Two-byte multicodec prefix for public keys of this scheme.
    pub fn multicodec_prefix(&self) -> [u8; 2] {
        match self {
            KeyScheme::Ed25519 => ED25519_MULTICODEC_PREFIX,
            KeyScheme::Secp256k1 => SECP256K1_MULTICODEC_PREFIX,
        }
    }

    /// Verification-method type string for DID documents.
    pub fn verification_method_type(&self) -> &'static str {
        match self {
            KeyScheme::Ed25519 => "Ed25519VerificationKey2020",
            KeyScheme::Secp256k1 => "EcdsaSecp256k1VerificationKey2019",
        }
    }

    /// Proof-suite type string for credential proofs.
    pub fn proof_type(&self) -> &'static str {
        match self {
            KeyScheme::Ed25519 => "Ed25519Signature2020",
            KeyScheme::Secp256k1 => "EcdsaSecp256k1Signature2019",
        }
    }
}

/// A freshly generated key pair, immutable after creation.
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Signature scheme of both keys
    pub scheme: KeyScheme,

    /// Raw public key bytes (32 for Ed25519, 33 compressed SEC1 for secp256k1)
    pub public_key: Vec<u8>,

    /// Raw private key bytes (32-byte seed / scalar), held in clear
    pub private_key: Vec<u8>,
}

/// Generates a key pair for the given scheme from the OS entropy source.
///
/// Ed25519 keys are derived from a 32-byte seed; secp256k1 private keys
/// are 32-byte scalars resampled until they fall inside the group order.
///
/// # Errors
/// [`IdentityError::KeyGeneration`] only when the entropy source itself
/// fails.
pub fn generate_key_pair(scheme: KeyScheme) -> Result<KeyPair, IdentityError> {
    match scheme {
        KeyScheme::Ed25519 => {
            let seed = random_seed()?;
            let signing_key = Ed25519SigningKey::from_bytes(&seed);
            Ok(KeyPair {
                scheme,
                public_key: signing_key.verifying_key().to_bytes().to_vec(),
                private_key: seed.to_vec(),
            })
        }
        KeyScheme::Secp256k1 => {
            // Rejection-sample until the scalar is non-zero and below the
            // group order. A retry is astronomically unlikely.
            loop {
                let seed = random_seed()?;
                if let Ok(signing_key) = Secp256k1SigningKey::from_slice(&seed) {
                    let public_key = signing_key
                        .verifying_key()
                        .to_encoded_point(true)
                        .as_bytes()
                        .to_vec();
                    return Ok(KeyPair {
                        scheme,
                        public_key,
                        private_key: seed.to_vec(),
                    });
                }
            }
        }
    }
}

fn random_seed() -> Result<[u8; 32], IdentityError> {
    let mut seed = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut seed)
        .map_err(|e| IdentityError::KeyGeneration(format!("entropy source failed: {}", e)))?;
    Ok(seed)
}

/// Encodes a public key into its `did:key` multibase representation.
///
/// Deterministic and pure: `'z'` + base58btc(multicodec-prefix ++ key).
pub fn encode_public_key(scheme: KeyScheme, public_key: &[u8]) -> String {
    let prefix = scheme.multicodec_prefix();
    let mut framed = Vec::with_capacity(prefix.len() + public_key.len());
    framed.extend_from_slice(&prefix);
    framed.extend_from_slice(public_key);
    format!("{}{}", MULTIBASE_BASE58BTC, bs58::encode(framed).into_string())
}

/// Decodes a multibase public-key string back into its scheme and raw bytes.
///
/// Inverse of [`encode_public_key`]: validates the `'z'` selector, the
/// base58btc body, and the multicodec prefix.
///
/// # Errors
/// - [`IdentityError::Verification`] for a bad selector or base58 body
/// - [`IdentityError::UnsupportedKeyType`] for an unknown multicodec prefix
pub fn decode_public_key(encoded: &str) -> Result<(KeyScheme, Vec<u8>), IdentityError> {
    let body = encoded
        .strip_prefix(MULTIBASE_BASE58BTC)
        .ok_or_else(|| {
            IdentityError::Verification(format!(
                "multibase key must start with '{}'",
                MULTIBASE_BASE58BTC
            ))
        })?;

    let decoded = bs58::decode(body)
        .into_vec()
        .map_err(|e| IdentityError::Verification(format!("invalid base58btc key: {}", e)))?;
    if decoded.len() < 3 {
        return Err(IdentityError::Verification(
            "multicodec key payload too short".to_string(),
        ));
    }

    let (prefix, key) = decoded.split_at(2);
    let scheme = if prefix == ED25519_MULTICODEC_PREFIX {
        KeyScheme::Ed25519
    } else if prefix == SECP256K1_MULTICODEC_PREFIX {
        KeyScheme::Secp256k1
    } else {
        return Err(IdentityError::UnsupportedKeyType(format!(
            "multicodec prefix 0x{:02x}{:02x}",
            prefix[0], prefix[1]
        )));
    };
    Ok((scheme, key.to_vec()))
}
