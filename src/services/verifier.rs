// src/services/verifier.rs
//! Credential verification service for the DID system.
//!
//! Verification runs a fixed sequence of checks and accumulates every
//! problem it finds into one report, rather than stopping at the first:
//! structural shape, proof presence, proof-type/key-scheme consistency,
//! and finally the signature over the recomputed canonical bytes. A
//! failing credential is an expected outcome, so nothing in this module
//! returns an error to the caller; decode and parse faults are folded
//! into the report as reasons.

use crate::crypto::key_codec::KeyScheme;
use crate::crypto::signature;
use crate::errors::IdentityError;
use crate::models::credential::VerifiableCredential;
use crate::utils::canonical::canonical_credential_bytes;
use serde::Serialize;
use serde_json::Value;

/// Top-level fields every credential must carry.
const REQUIRED_FIELDS: [&str; 4] = ["@context", "type", "issuer", "credentialSubject"];

/// Outcome of verifying one credential.
///
/// `issuer`, `subject`, and `issuance_date` are extracted best-effort
/// from the input even when verification fails, to aid diagnostics.
#[derive(Serialize, Debug, Clone)]
pub struct VerificationReport {
    /// True only when every check passed
    pub verified: bool,

    /// The credential's declared issuer DID, if present
    pub issuer: Option<String>,

    /// The subject DID from `credentialSubject.id`, if present
    pub subject: Option<String>,

    /// The declared issuance timestamp, if present
    pub issuance_date: Option<String>,

    /// Human-readable reasons for every failed check
    pub errors: Vec<String>,
}

/// Service for verifying issued credentials against an issuer's stored
/// public key.
pub struct CredentialVerifier;

impl CredentialVerifier {
    /// Verifies `credential` against `public_key` under `scheme`.
    ///
    /// The credential arrives as raw JSON so that structural problems
    /// can be reported field-by-field instead of failing typed
    /// deserialization wholesale.
    ///
    /// # Check order
    /// 1. Required top-level fields present
    /// 2. Proof present with a non-empty `proofValue`
    /// 3. Declared `proof.type` matches the scheme's proof type; a
    ///    mismatch fails closed without attempting a signature check
    /// 4. Signature over the recomputed canonical bytes
    pub fn verify(
        credential: &Value,
        public_key: &[u8],
        scheme: KeyScheme,
    ) -> VerificationReport {
        let mut errors: Vec<String> = Vec::new();

        let mut structurally_sound = true;
        for field in REQUIRED_FIELDS {
            if credential.get(field).is_none() {
                errors.push(IdentityError::MalformedCredential(field.to_string()).to_string());
                structurally_sound = false;
            }
        }

        let proof_value = credential
            .get("proof")
            .and_then(|proof| proof.get("proofValue"))
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty());
        let declared_proof_type = credential
            .get("proof")
            .and_then(|proof| proof.get("type"))
            .and_then(Value::as_str);

        match proof_value {
            None => errors.push(IdentityError::MissingProof.to_string()),
            Some(proof_value) => {
                let expected = scheme.proof_type();
                match declared_proof_type {
                    Some(declared) if declared == expected => {
                        if structurally_sound {
                            if let Err(e) =
                                Self::check_signature(credential, proof_value, public_key, scheme)
                            {
                                errors.push(e.to_string());
                            }
                        }
                    }
                    declared => {
                        // Fail closed: never fall back to another scheme.
                        errors.push(
                            IdentityError::SchemeMismatch {
                                expected: expected.to_string(),
                                found: declared.unwrap_or("(absent)").to_string(),
                            }
                            .to_string(),
                        );
                    }
                }
            }
        }

        let report = VerificationReport {
            verified: errors.is_empty(),
            issuer: Self::string_at(credential, &["issuer"]),
            subject: Self::string_at(credential, &["credentialSubject", "id"]),
            issuance_date: Self::string_at(credential, &["issuanceDate"]),
            errors,
        };
        log::info!(
            "verified credential from {:?}: verified={} ({} error(s))",
            report.issuer,
            report.verified,
            report.errors.len()
        );
        report
    }

    /// Recomputes the canonical message and checks the signature.
    fn check_signature(
        credential: &Value,
        proof_value: &str,
        public_key: &[u8],
        scheme: KeyScheme,
    ) -> Result<(), IdentityError> {
        let typed: VerifiableCredential = serde_json::from_value(credential.clone())
            .map_err(|e| IdentityError::Verification(format!("unparseable credential: {}", e)))?;
        let message = canonical_credential_bytes(&typed)
            .map_err(|e| IdentityError::Verification(format!("canonicalization failed: {}", e)))?;
        let signature_bytes = signature::decode_proof_value(proof_value)?;

        if signature::verify(scheme, &signature_bytes, &message, public_key) {
            Ok(())
        } else {
            Err(IdentityError::InvalidSignature)
        }
    }

    fn string_at(credential: &Value, path: &[&str]) -> Option<String> {
        let mut current = credential;
        for segment in path {
            current = current.get(segment)?;
        }
        current.as_str().map(str::to_string)
    }
}
