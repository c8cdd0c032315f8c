// src/models/did.rs
//! Decentralized Identifier (DID) data model implementation.
//!
//! Defines the core structures for W3C-compliant `did:key` documents
//! following the [DID Core Specification](https://www.w3.org/TR/did-core/).

use crate::crypto::key_codec::KeyScheme;
use serde::{Deserialize, Serialize};

/// A single verification method inside a DID document.
///
/// For `did:key` there is exactly one of these per document, carrying
/// the public key that the identifier itself encodes.
///
/// # Fields
/// - `id`: Composite identifier `did#<multibase>`
/// - `method_type`: Signature-suite type string (e.g. `Ed25519VerificationKey2020`)
/// - `controller`: The DID that controls this key (always the document's own DID here)
/// - `public_key_multibase`: Multibase/multicodec encoding of the public key
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerificationMethod {
    /// Composite id, e.g. "did:key:z6Mk...#z6Mk..."
    pub id: String,

    /// Verification-method type string
    /// Example: "Ed25519VerificationKey2020"
    #[serde(rename = "type")]
    pub method_type: String,

    /// DID of the controlling identity
    pub controller: String,

    /// Multibase-encoded public key ('z' + base58btc(multicodec ++ key))
    #[serde(rename = "publicKeyMultibase")]
    pub public_key_multibase: String,
}

/// A DID document for the `did:key` method.
///
/// All four verification relationships reference the single verification
/// method by its composite id: with no key rotation or multi-key support,
/// the sole key intentionally holds every capability.
///
/// # Serialization
/// Field names follow the DID Core JSON representation and are part of
/// the external contract; do not rename them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DidDocument {
    /// The complete DID string identifier
    /// Example: "did:key:z6MkhaXgBZDvotDUGRy7K9L7M2yvCpREH5..."
    pub id: String,

    /// The document's single verification method
    #[serde(rename = "verificationMethod")]
    pub verification_method: Vec<VerificationMethod>,

    /// Verification-method ids usable for authentication
    pub authentication: Vec<String>,

    /// Verification-method ids usable for assertions (credential proofs)
    #[serde(rename = "assertionMethod")]
    pub assertion_method: Vec<String>,

    /// Verification-method ids usable for capability invocation
    #[serde(rename = "capabilityInvocation")]
    pub capability_invocation: Vec<String>,

    /// Verification-method ids usable for capability delegation
    #[serde(rename = "capabilityDelegation")]
    pub capability_delegation: Vec<String>,
}

/// A registered DID together with its key material, as held by storage.
///
/// # Security Considerations
/// The private key is held in the clear, mirroring the behavior of the
/// original wallet storage. Production deployments need a real key
/// custody layer before this record shape can be persisted anywhere
/// durable.
#[derive(Debug, Clone)]
pub struct DidRecord {
    /// The DID string this record is keyed by
    pub did: String,

    /// Signature scheme of the key pair
    pub scheme: KeyScheme,

    /// Raw public key bytes (32 for Ed25519, 33 compressed SEC1 for secp256k1)
    pub public_key: Vec<u8>,

    /// Raw private key bytes, stored in clear
    pub private_key: Vec<u8>,

    /// The DID document derived from the public key
    pub document: DidDocument,
}
