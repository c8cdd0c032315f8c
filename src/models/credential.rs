// src/models/credential.rs
//! Verifiable Credential data model implementation.
//!
//! Defines the structure for W3C-style Verifiable Credentials (VCs)
//! following the [VC Data Model](https://www.w3.org/TR/vc-data-model/),
//! signed over a canonical JSON serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-LD context every issued credential carries.
pub const CREDENTIALS_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Base type present in every credential's `type` array.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// The cryptographic proof block attached to an issued credential.
///
/// `proof_value` is `'z'` followed by the base64 encoding of the raw
/// signature bytes. Note the asymmetry with key encoding (which is
/// base58btc behind the same `'z'` selector); already-issued credentials
/// depend on it, so it must be preserved bit-for-bit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Proof {
    /// Proof suite, e.g. "Ed25519Signature2020"
    #[serde(rename = "type")]
    pub proof_type: String,

    /// Creation timestamp, equal to the credential's issuance date
    pub created: String,

    /// Composite verification-method id, `issuerDid#<multibase-suffix>`
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// Always "assertionMethod" for issued credentials
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: String,

    /// 'z' + base64(signature bytes)
    #[serde(rename = "proofValue")]
    pub proof_value: String,
}

/// A Verifiable Credential according to W3C standards.
///
/// The signature in `proof.proof_value` covers the canonical JSON bytes
/// of every field except `proof` itself. Field declaration order below
/// is the canonical serialization order and is load-bearing: reordering
/// these fields breaks verification of previously issued credentials.
///
/// Immutable once issued; verification never mutates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerifiableCredential {
    /// JSON-LD contexts, first entry is [`CREDENTIALS_CONTEXT`]
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Unique URN identifier for the credential
    /// Example: "urn:uuid:123e4567-e89b-12d3-a456-426614174000"
    pub id: String,

    /// Type array, ["VerifiableCredential", <requested type>]
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// DID of the credential issuer
    pub issuer: String,

    /// RFC3339 UTC issuance timestamp
    #[serde(rename = "issuanceDate")]
    pub issuance_date: String,

    /// Subject object: an `id` entry holding the subject DID plus
    /// arbitrary caller-supplied claims
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Map<String, Value>,

    /// Signature envelope; absent on the unsigned shell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiableCredential {
    /// Returns a copy of the credential with the proof block stripped,
    /// i.e. exactly the object the signature covers.
    pub fn without_proof(&self) -> VerifiableCredential {
        VerifiableCredential {
            proof: None,
            ..self.clone()
        }
    }

    /// Subject DID, when the subject object carries an `id` entry.
    pub fn subject_did(&self) -> Option<&str> {
        self.credential_subject.get("id").and_then(Value::as_str)
    }
}
