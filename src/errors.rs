// src/errors.rs
//! Error taxonomy for the DID / verifiable-credential engine.
//!
//! Issuance-path errors are fatal to the request that raised them: no
//! partial credential is ever persisted or returned. Verification-path
//! errors are never fatal; the verifier folds them into the `errors`
//! list of a normal result, because a credential that fails to verify
//! is an expected outcome, not a process fault.

use thiserror::Error;

/// All error conditions the identity core can report.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// A key-scheme tag that is neither `ed25519` nor `secp256k1`.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// The entropy source failed, or supplied key material is unusable.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// No issuer key material was supplied and none is stored.
    #[error("no issuer DID with key material is available")]
    NoIssuerAvailable,

    /// A required top-level credential field is absent.
    #[error("malformed credential: missing {0}")]
    MalformedCredential(String),

    /// The credential carries no proof, or an empty `proofValue`.
    #[error("credential proof is missing or has an empty proofValue")]
    MissingProof,

    /// The declared proof type does not match the issuer's key scheme.
    #[error("proof type mismatch: expected {expected}, found {found}")]
    SchemeMismatch { expected: String, found: String },

    /// The signature did not verify against the canonical message.
    #[error("signature verification failed")]
    InvalidSignature,

    /// Catch-all for decode/parse faults encountered while verifying.
    #[error("verification error: {0}")]
    Verification(String),
}
