// src/crypto/signature.rs
//! Scheme-dispatched signing and verification.
//!
//! Ed25519 signatures are deterministic per RFC 8032. secp256k1 uses
//! ECDSA with deterministic nonces (RFC 6979) through the `k256`
//! `Signer`/`Verifier` impls, which hash the message internally with
//! SHA-256; both the sign and verify paths go through those impls, so
//! the digest choice is pinned on both ends. secp256k1 signatures are
//! serialized in the fixed-length 64-byte compact encoding (R || S),
//! never DER, because the proof carries a flat base64 blob with no
//! length framing.

use crate::crypto::key_codec::KeyScheme;
use crate::errors::IdentityError;
use k256::ecdsa;
use k256::ecdsa::signature::{Signer, Verifier};

/// Multibase-flavored selector on proof values. The payload behind it is
/// base64, not base58btc; issued credentials depend on this asymmetry.
const PROOF_VALUE_PREFIX: char = 'z';

/// Signs `message` with the scheme's primitive.
///
/// The message is the canonicalizer output and is passed through as-is;
/// no caller-side hashing is expected or performed.
///
/// # Errors
/// [`IdentityError::KeyGeneration`] when the supplied private key bytes
/// are not valid key material for the scheme.
pub fn sign(
    scheme: KeyScheme,
    message: &[u8],
    private_key: &[u8],
) -> Result<Vec<u8>, IdentityError> {
    match scheme {
        KeyScheme::Ed25519 => {
            let seed: [u8; 32] = private_key.try_into().map_err(|_| {
                IdentityError::KeyGeneration("ed25519 private key must be 32 bytes".to_string())
            })?;
            let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
            Ok(signing_key.sign(message).to_bytes().to_vec())
        }
        KeyScheme::Secp256k1 => {
            let signing_key = ecdsa::SigningKey::from_slice(private_key).map_err(|e| {
                IdentityError::KeyGeneration(format!("invalid secp256k1 private key: {}", e))
            })?;
            let signature: ecdsa::Signature = signing_key.sign(message);
            Ok(signature.to_bytes().to_vec())
        }
    }
}

/// Verifies `signature` over `message` against `public_key`.
///
/// Never errors: malformed signatures or keys are treated as a failed
/// verification, not a fault to propagate.
pub fn verify(scheme: KeyScheme, signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    match scheme {
        KeyScheme::Ed25519 => {
            let key_bytes: [u8; 32] = match public_key.try_into() {
                Ok(bytes) => bytes,
                Err(_) => return false,
            };
            let verifying_key = match ed25519_dalek::VerifyingKey::from_bytes(&key_bytes) {
                Ok(key) => key,
                Err(_) => return false,
            };
            let signature = match ed25519_dalek::Signature::from_slice(signature) {
                Ok(sig) => sig,
                Err(_) => return false,
            };
            verifying_key.verify(message, &signature).is_ok()
        }
        KeyScheme::Secp256k1 => {
            let verifying_key = match ecdsa::VerifyingKey::from_sec1_bytes(public_key) {
                Ok(key) => key,
                Err(_) => return false,
            };
            let signature = match ecdsa::Signature::from_slice(signature) {
                Ok(sig) => sig,
                Err(_) => return false,
            };
            verifying_key.verify(message, &signature).is_ok()
        }
    }
}

/// Encodes raw signature bytes into a credential `proofValue`.
pub fn encode_proof_value(signature: &[u8]) -> String {
    format!("{}{}", PROOF_VALUE_PREFIX, base64::encode(signature))
}

/// Decodes a `proofValue` back into raw signature bytes.
///
/// # Errors
/// [`IdentityError::Verification`] for a missing selector or invalid
/// base64 payload.
pub fn decode_proof_value(proof_value: &str) -> Result<Vec<u8>, IdentityError> {
    let body = proof_value.strip_prefix(PROOF_VALUE_PREFIX).ok_or_else(|| {
        IdentityError::Verification(format!(
            "proofValue must start with '{}'",
            PROOF_VALUE_PREFIX
        ))
    })?;
    base64::decode(body)
        .map_err(|e| IdentityError::Verification(format!("invalid base64 proofValue: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_codec::generate_key_pair;

    #[test]
    fn test_sign_verify_round_trip() {
        for scheme in [KeyScheme::Ed25519, KeyScheme::Secp256k1] {
            let pair = generate_key_pair(scheme).unwrap();
            let message = b"credential canonical bytes";
            let signature = sign(scheme, message, &pair.private_key).unwrap();
            assert_eq!(signature.len(), 64, "{} compact length", scheme.as_str());
            assert!(verify(scheme, &signature, message, &pair.public_key));
        }
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        for scheme in [KeyScheme::Ed25519, KeyScheme::Secp256k1] {
            let signer = generate_key_pair(scheme).unwrap();
            let other = generate_key_pair(scheme).unwrap();
            let signature = sign(scheme, b"msg", &signer.private_key).unwrap();
            assert!(!verify(scheme, &signature, b"msg", &other.public_key));
        }
    }

    #[test]
    fn test_verify_rejects_tampered_message() {
        let pair = generate_key_pair(KeyScheme::Ed25519).unwrap();
        let signature = sign(KeyScheme::Ed25519, b"original", &pair.private_key).unwrap();
        assert!(!verify(
            KeyScheme::Ed25519,
            &signature,
            b"tampered",
            &pair.public_key
        ));
    }

    #[test]
    fn test_verify_never_panics_on_garbage() {
        for scheme in [KeyScheme::Ed25519, KeyScheme::Secp256k1] {
            let pair = generate_key_pair(scheme).unwrap();
            assert!(!verify(scheme, &[], b"msg", &pair.public_key));
            assert!(!verify(scheme, &[0u8; 64], b"msg", &pair.public_key));
            assert!(!verify(scheme, &[1u8; 7], b"msg", &[2u8; 9]));
        }
    }

    #[test]
    fn test_ed25519_signatures_are_deterministic() {
        let pair = generate_key_pair(KeyScheme::Ed25519).unwrap();
        let a = sign(KeyScheme::Ed25519, b"same message", &pair.private_key).unwrap();
        let b = sign(KeyScheme::Ed25519, b"same message", &pair.private_key).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_proof_value_encoding() {
        let signature = vec![7u8; 64];
        let encoded = encode_proof_value(&signature);
        assert!(encoded.starts_with('z'));
        assert_eq!(decode_proof_value(&encoded).unwrap(), signature);

        assert!(decode_proof_value("missing-selector").is_err());
        assert!(decode_proof_value("z@@@").is_err());
    }

    #[test]
    fn test_sign_rejects_bad_private_key() {
        assert!(sign(KeyScheme::Ed25519, b"m", &[1u8; 5]).is_err());
        assert!(sign(KeyScheme::Secp256k1, b"m", &[0u8; 32]).is_err()); // zero scalar
    }
}
