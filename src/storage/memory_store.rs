// src/storage/memory_store.rs
//! Storage abstraction for DIDs and issued credentials.
//!
//! The core services are storage-agnostic: they receive an
//! [`IdentityStore`] and require nothing beyond read-after-write
//! consistency per key. [`InMemoryStore`] is the shipped single-process
//! implementation, a hashmap behind a mutex; a durable backend can slot
//! in behind the same trait.

use crate::models::credential::VerifiableCredential;
use crate::models::did::DidRecord;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value storage contract for DID records and credentials.
///
/// Implementations must be `Send + Sync`; the API layer shares one
/// instance across request handlers.
pub trait IdentityStore: Send + Sync {
    /// Persists a DID record, overwriting any record with the same DID.
    fn put_did(&self, record: DidRecord);

    /// Looks up a DID record by its DID string.
    fn lookup_did(&self, did: &str) -> Option<DidRecord>;

    /// Returns an arbitrary stored DID record to act as issuer when the
    /// caller does not pin one explicitly.
    fn lookup_any_issuer(&self) -> Option<DidRecord>;

    /// All registered DID strings.
    fn list_dids(&self) -> Vec<String>;

    /// Persists an issued credential, keyed by its `id`.
    fn put_credential(&self, credential: VerifiableCredential);

    /// Looks up a credential by its `urn:uuid` id.
    fn lookup_credential(&self, id: &str) -> Option<VerifiableCredential>;

    /// Number of stored credentials.
    fn count_credentials(&self) -> usize;
}

/// In-memory store for DIDs and Verifiable Credentials.
///
/// # Note
/// Private key material is held in clear, exactly as the records carry
/// it. Production use needs a key custody redesign before swapping in a
/// durable implementation.
pub struct InMemoryStore {
    /// DID records keyed by DID string
    dids: Mutex<HashMap<String, DidRecord>>,

    /// Credentials keyed by their `urn:uuid` id
    credentials: Mutex<HashMap<String, VerifiableCredential>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        InMemoryStore {
            dids: Mutex::new(HashMap::new()),
            credentials: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for InMemoryStore {
    fn put_did(&self, record: DidRecord) {
        let mut dids = self.dids.lock().unwrap();
        dids.insert(record.did.clone(), record);
    }

    fn lookup_did(&self, did: &str) -> Option<DidRecord> {
        let dids = self.dids.lock().unwrap();
        dids.get(did).cloned()
    }

    fn lookup_any_issuer(&self) -> Option<DidRecord> {
        let dids = self.dids.lock().unwrap();
        dids.values().next().cloned()
    }

    fn list_dids(&self) -> Vec<String> {
        let dids = self.dids.lock().unwrap();
        dids.keys().cloned().collect()
    }

    fn put_credential(&self, credential: VerifiableCredential) {
        let mut credentials = self.credentials.lock().unwrap();
        credentials.insert(credential.id.clone(), credential);
    }

    fn lookup_credential(&self, id: &str) -> Option<VerifiableCredential> {
        let credentials = self.credentials.lock().unwrap();
        credentials.get(id).cloned()
    }

    fn count_credentials(&self) -> usize {
        let credentials = self.credentials.lock().unwrap();
        credentials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_codec::{generate_key_pair, KeyScheme};
    use crate::services::did_builder::DidDocumentBuilder;
    use serde_json::Map;

    fn test_record() -> DidRecord {
        let pair = generate_key_pair(KeyScheme::Ed25519).unwrap();
        let (did, document) = DidDocumentBuilder::build(&pair);
        DidRecord {
            did,
            scheme: pair.scheme,
            public_key: pair.public_key,
            private_key: pair.private_key,
            document,
        }
    }

    fn test_credential(id: &str) -> VerifiableCredential {
        VerifiableCredential {
            context: vec!["https://www.w3.org/2018/credentials/v1".to_string()],
            id: id.to_string(),
            credential_type: vec!["VerifiableCredential".to_string()],
            issuer: "did:key:z6MkIssuer".to_string(),
            issuance_date: "2026-01-01T00:00:00Z".to_string(),
            credential_subject: Map::new(),
            proof: None,
        }
    }

    #[test]
    fn test_did_round_trip() {
        let store = InMemoryStore::new();
        let record = test_record();
        let did = record.did.clone();

        assert!(store.lookup_did(&did).is_none());
        store.put_did(record);
        assert_eq!(store.lookup_did(&did).unwrap().did, did);
        assert_eq!(store.list_dids(), vec![did]);
    }

    #[test]
    fn test_any_issuer_pick() {
        let store = InMemoryStore::new();
        assert!(store.lookup_any_issuer().is_none());
        store.put_did(test_record());
        assert!(store.lookup_any_issuer().is_some());
    }

    #[test]
    fn test_credential_round_trip() {
        let store = InMemoryStore::new();
        let credential_id = "urn:uuid:stored-credential";

        store.put_credential(test_credential(credential_id));
        assert_eq!(store.count_credentials(), 1);
        assert_eq!(
            store.lookup_credential(credential_id).unwrap().id,
            credential_id
        );
        assert!(store.lookup_credential("urn:uuid:absent").is_none());

        // Overwrite with same id keeps the count stable
        store.put_credential(test_credential(credential_id));
        assert_eq!(store.count_credentials(), 1);
    }
}
