// src/services/did_builder.rs
//! DID string and DID document derivation.
//!
//! Pure, deterministic derivation of a `did:key` identifier and its
//! document from a key pair. The same key bytes always yield the same
//! DID; distinct keys never collide (the DID embeds the key itself).

use crate::crypto::key_codec::{encode_public_key, KeyPair};
use crate::models::did::{DidDocument, VerificationMethod};

/// The `did:key` method prefix.
pub const DID_KEY_PREFIX: &str = "did:key:";

/// Derives DIDs and DID documents from key material.
pub struct DidDocumentBuilder;

impl DidDocumentBuilder {
    /// Builds the DID string and document for a key pair.
    ///
    /// The verification-method id is the composite `did#<multibase>`,
    /// and all four relationship arrays reference that single id: with
    /// no key rotation or multi-key support, the sole key deliberately
    /// holds every capability.
    pub fn build(key_pair: &KeyPair) -> (String, DidDocument) {
        let multibase = encode_public_key(key_pair.scheme, &key_pair.public_key);
        let did = format!("{}{}", DID_KEY_PREFIX, multibase);
        let method_id = format!("{}#{}", did, multibase);

        let document = DidDocument {
            id: did.clone(),
            verification_method: vec![VerificationMethod {
                id: method_id.clone(),
                method_type: key_pair.scheme.verification_method_type().to_string(),
                controller: did.clone(),
                public_key_multibase: multibase,
            }],
            authentication: vec![method_id.clone()],
            assertion_method: vec![method_id.clone()],
            capability_invocation: vec![method_id.clone()],
            capability_delegation: vec![method_id],
        };
        (did, document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_codec::{decode_public_key, generate_key_pair, KeyScheme};

    #[test]
    fn test_did_shape_and_determinism() {
        let pair = generate_key_pair(KeyScheme::Ed25519).unwrap();
        let (did_a, doc_a) = DidDocumentBuilder::build(&pair);
        let (did_b, doc_b) = DidDocumentBuilder::build(&pair);

        assert!(did_a.starts_with("did:key:z"));
        assert_eq!(did_a, did_b);
        assert_eq!(doc_a, doc_b);
        assert_eq!(doc_a.id, did_a);
    }

    #[test]
    fn test_document_references_single_method() {
        let pair = generate_key_pair(KeyScheme::Secp256k1).unwrap();
        let (did, document) = DidDocumentBuilder::build(&pair);

        assert_eq!(document.verification_method.len(), 1);
        let method = &document.verification_method[0];
        assert_eq!(method.controller, did);
        assert_eq!(method.method_type, "EcdsaSecp256k1VerificationKey2019");
        assert_eq!(
            method.id,
            format!("{}#{}", did, method.public_key_multibase)
        );

        for relation in [
            &document.authentication,
            &document.assertion_method,
            &document.capability_invocation,
            &document.capability_delegation,
        ] {
            assert_eq!(relation, &vec![method.id.clone()]);
        }
    }

    #[test]
    fn test_did_embeds_recoverable_public_key() {
        let pair = generate_key_pair(KeyScheme::Ed25519).unwrap();
        let (did, _) = DidDocumentBuilder::build(&pair);
        let multibase = did.strip_prefix(DID_KEY_PREFIX).unwrap();
        let (scheme, key) = decode_public_key(multibase).unwrap();
        assert_eq!(scheme, KeyScheme::Ed25519);
        assert_eq!(key, pair.public_key);
    }

    #[test]
    fn test_method_type_per_scheme() {
        let ed = generate_key_pair(KeyScheme::Ed25519).unwrap();
        let (_, doc) = DidDocumentBuilder::build(&ed);
        assert_eq!(
            doc.verification_method[0].method_type,
            "Ed25519VerificationKey2020"
        );
    }
}
