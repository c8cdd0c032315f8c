// src/utils/canonical.rs
//! Canonical credential serialization.
//!
//! Produces the exact byte sequence a credential proof signs and
//! verifies: the credential minus its `proof` block, serialized as
//! compact JSON. Determinism comes from two fixed choices rather than
//! incidental serializer behavior:
//!
//! - Top-level field order is the declaration order of
//!   [`VerifiableCredential`]: `@context`, `id`, `type`, `issuer`,
//!   `issuanceDate`, `credentialSubject`.
//! - Nested objects (the caller-supplied claims) use `serde_json`'s
//!   default BTreeMap-backed `Map`, so their keys serialize in sorted
//!   order. The crate must not enable serde_json's `preserve_order`
//!   feature.
//!
//! Any whitespace, ordering, or number-formatting drift between
//! issuance and verification breaks the signature, so both paths call
//! this one function.

use crate::models::credential::VerifiableCredential;

/// Serializes the proof-stripped credential into its canonical bytes.
///
/// # Errors
/// Surfaces `serde_json` failures, which for this data model can only
/// arise from non-finite floats inside caller-supplied claims.
pub fn canonical_credential_bytes(
    credential: &VerifiableCredential,
) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&credential.without_proof())
}
