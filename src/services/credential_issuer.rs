// src/services/credential_issuer.rs
//! Credential Issuer Service
//!
//! Builds and signs W3C-style Verifiable Credentials. Issuance walks a
//! fixed pipeline: build the unsigned credential shell, canonicalize it,
//! sign the canonical bytes with the issuer's key, attach the proof
//! block. The pipeline is synchronous and side-effect-free; persisting
//! the result is the caller's concern, and no partial credential ever
//! escapes a failed issuance.

use crate::crypto::signature;
use crate::errors::IdentityError;
use crate::models::credential::{
    Proof, VerifiableCredential, CREDENTIALS_CONTEXT, VERIFIABLE_CREDENTIAL_TYPE,
};
use crate::models::did::DidRecord;
use crate::utils::canonical::canonical_credential_bytes;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Purpose string attached to every issued proof.
const PROOF_PURPOSE_ASSERTION: &str = "assertionMethod";

/// Service for issuing signed Verifiable Credentials.
///
/// Issuer key material is an explicit parameter rather than an ambient
/// global: the caller decides which stored DID signs.
pub struct CredentialIssuer;

impl CredentialIssuer {
    /// Issues a credential over `claims` to `subject_did`, signed by
    /// `issuer`.
    ///
    /// # Arguments
    /// * `subject_did` - DID the claims are about
    /// * `credential_type` - Appended to the base `VerifiableCredential` type
    /// * `claims` - Arbitrary key/value pairs, accepted as-is
    /// * `issuer` - Stored DID record supplying key material and scheme
    ///
    /// # Errors
    /// - [`IdentityError::KeyGeneration`] when the issuer's stored private
    ///   key is not valid material for its scheme
    /// - [`IdentityError::Verification`] when the claims cannot be
    ///   serialized (non-finite floats)
    pub fn issue(
        subject_did: &str,
        credential_type: &str,
        claims: Map<String, Value>,
        issuer: &DidRecord,
    ) -> Result<VerifiableCredential, IdentityError> {
        let issuance_date = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut credential_subject = claims;
        credential_subject.insert("id".to_string(), Value::String(subject_did.to_string()));

        let mut credential = VerifiableCredential {
            context: vec![CREDENTIALS_CONTEXT.to_string()],
            id: format!("urn:uuid:{}", Uuid::new_v4()),
            credential_type: vec![
                VERIFIABLE_CREDENTIAL_TYPE.to_string(),
                credential_type.to_string(),
            ],
            issuer: issuer.did.clone(),
            issuance_date: issuance_date.clone(),
            credential_subject,
            proof: None,
        };

        let message = canonical_credential_bytes(&credential)
            .map_err(|e| IdentityError::Verification(format!("canonicalization failed: {}", e)))?;
        let signature_bytes = signature::sign(issuer.scheme, &message, &issuer.private_key)?;

        credential.proof = Some(Proof {
            proof_type: issuer.scheme.proof_type().to_string(),
            created: issuance_date,
            verification_method: Self::verification_method_id(&issuer.did),
            proof_purpose: PROOF_PURPOSE_ASSERTION.to_string(),
            proof_value: signature::encode_proof_value(&signature_bytes),
        });

        log::info!(
            "issued {} credential {} from {}",
            issuer.scheme.as_str(),
            credential.id,
            issuer.did
        );
        Ok(credential)
    }

    /// Composite verification-method id, `issuerDid#<multibase-suffix>`.
    ///
    /// The key-id segment is taken from the issuer DID string itself,
    /// not re-derived from the public key.
    fn verification_method_id(issuer_did: &str) -> String {
        let suffix = issuer_did.rsplit(':').next().unwrap_or(issuer_did);
        format!("{}#{}", issuer_did, suffix)
    }
}
