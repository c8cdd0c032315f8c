// src/services/api_server.rs
//! API Server for the Decentralized Identity System
//!
//! This module provides the REST API interface for interacting with the
//! DID system: registration and resolution of `did:key` identifiers,
//! issuance of signed Verifiable Credentials, verification of received
//! credentials, and credential retrieval.
//!
//! The API is built using Axum and includes endpoints for:
//! - DID registration, resolution, and listing
//! - Verifiable credential issuance and verification
//! - Credential retrieval by id
//!
//! Handlers are thin: each one resolves its inputs against the shared
//! [`IdentityStore`] and delegates to the synchronous core services.

use crate::crypto::key_codec::{encode_public_key, generate_key_pair, KeyScheme};
use crate::errors::IdentityError;
use crate::models::did::{DidDocument, DidRecord};
use crate::services::credential_issuer::CredentialIssuer;
use crate::services::did_builder::DidDocumentBuilder;
use crate::services::verifier::{CredentialVerifier, VerificationReport};
use crate::storage::memory_store::IdentityStore;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;

// API request and response structures

/// Request payload for registering a new DID
#[derive(Serialize, Deserialize)]
struct RegisterDidRequest {
    /// Scheme tag: "ed25519" or "secp256k1"
    scheme: String,
}

/// Response for DID registration
#[derive(Serialize, Deserialize)]
struct RegisterDidResponse {
    did: String,
    /// Multibase encoding of the new public key
    public_key: String,
    did_document: DidDocument,
}

/// Request payload for issuing a verifiable credential
#[derive(Serialize, Deserialize)]
struct IssueCredentialRequest {
    subject_did: String,
    credential_type: String,
    /// Arbitrary claims, passed through unvalidated
    #[serde(default)]
    claims: Map<String, Value>,
    /// Issuer DID to sign with; any stored DID is used when absent
    #[serde(default)]
    issuer_did: Option<String>,
}

/// Request payload for verifying a credential
#[derive(Serialize, Deserialize)]
struct VerifyCredentialRequest {
    /// The credential as received, raw JSON
    credential: Value,
    /// Issuer DID whose stored key verifies the proof; defaults to the
    /// credential's own `issuer` field
    #[serde(default)]
    issuer_did: Option<String>,
}

/// Response listing all registered DIDs
#[derive(Serialize, Deserialize)]
struct ListDidsResponse {
    dids: Vec<String>,
}

/// API server state containing all service dependencies
pub struct ApiServer {
    /// Shared DID/credential store, injected so the core stays
    /// storage-agnostic
    store: Arc<dyn IdentityStore>,
}

impl Clone for ApiServer {
    fn clone(&self) -> Self {
        ApiServer {
            store: self.store.clone(),
        }
    }
}

impl ApiServer {
    /// Creates a new instance of the API server
    ///
    /// # Arguments
    /// * `store` - Backing store for DID records and issued credentials
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        ApiServer { store }
    }

    /// Builds the router with all API routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/register-did", post(Self::register_did_handler))
            .route("/resolve-did/:did", get(Self::resolve_did_handler))
            .route("/list-dids", get(Self::list_dids_handler))
            .route("/issue-credential", post(Self::issue_credential_handler))
            .route("/verify-credential", post(Self::verify_credential_handler))
            .route("/get-credential/:id", get(Self::get_credential_handler))
            .with_state(Arc::new(self.clone()))
    }

    /// Starts the API server and begins listening for requests
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    pub async fn run(&self, addr: SocketAddr) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Maps a service error onto an HTTP status and JSON error body.
    fn error_response(status: StatusCode, error: &IdentityError) -> Response {
        (status, Json(json!({ "error": error.to_string() }))).into_response()
    }

    // =====================
    // DID Handlers
    // =====================

    /// Registers a new `did:key` identity
    ///
    /// # Endpoint
    /// POST /register-did
    ///
    /// # Responses
    /// - 200 OK: Returns the DID, public key, and DID document
    /// - 400 Bad Request: Unknown scheme tag
    /// - 500 Internal Server Error: Entropy source failure
    async fn register_did_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<RegisterDidRequest>,
    ) -> Response {
        let scheme = match KeyScheme::parse(&payload.scheme) {
            Ok(scheme) => scheme,
            Err(e) => return Self::error_response(StatusCode::BAD_REQUEST, &e),
        };
        let key_pair = match generate_key_pair(scheme) {
            Ok(pair) => pair,
            Err(e) => return Self::error_response(StatusCode::INTERNAL_SERVER_ERROR, &e),
        };

        let (did, document) = DidDocumentBuilder::build(&key_pair);
        let public_key_multibase = encode_public_key(scheme, &key_pair.public_key);
        log::info!("registered {} DID {}", scheme.as_str(), did);

        state.store.put_did(DidRecord {
            did: did.clone(),
            scheme,
            public_key: key_pair.public_key,
            private_key: key_pair.private_key,
            document: document.clone(),
        });

        (
            StatusCode::OK,
            Json(RegisterDidResponse {
                did,
                public_key: public_key_multibase,
                did_document: document,
            }),
        )
            .into_response()
    }

    /// Resolves a registered DID to its document
    ///
    /// # Endpoint
    /// GET /resolve-did/:did
    ///
    /// # Responses
    /// - 200 OK: Returns the DID document
    /// - 404 Not Found: DID is not registered
    async fn resolve_did_handler(
        Path(did): Path<String>,
        State(state): State<Arc<ApiServer>>,
    ) -> Response {
        match state.store.lookup_did(&did) {
            Some(record) => (StatusCode::OK, Json(record.document)).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("DID not registered: {}", did) })),
            )
                .into_response(),
        }
    }

    /// Lists all registered DIDs
    ///
    /// # Endpoint
    /// GET /list-dids
    async fn list_dids_handler(State(state): State<Arc<ApiServer>>) -> Response {
        (
            StatusCode::OK,
            Json(ListDidsResponse {
                dids: state.store.list_dids(),
            }),
        )
            .into_response()
    }

    // =====================
    // Credential Handlers
    // =====================

    /// Issues a new verifiable credential
    ///
    /// # Endpoint
    /// POST /issue-credential
    ///
    /// # Request Body
    /// Subject DID, credential type, claims, and optionally the issuer
    /// DID to sign with
    ///
    /// # Responses
    /// - 200 OK: Returns the signed credential
    /// - 404 Not Found: No issuer key material available
    /// - 500 Internal Server Error: Signing failed
    async fn issue_credential_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<IssueCredentialRequest>,
    ) -> Response {
        let issuer = match &payload.issuer_did {
            Some(did) => state.store.lookup_did(did),
            None => state.store.lookup_any_issuer(),
        };
        let issuer = match issuer {
            Some(record) => record,
            None => {
                return Self::error_response(
                    StatusCode::NOT_FOUND,
                    &IdentityError::NoIssuerAvailable,
                )
            }
        };

        match CredentialIssuer::issue(
            &payload.subject_did,
            &payload.credential_type,
            payload.claims,
            &issuer,
        ) {
            Ok(credential) => {
                state.store.put_credential(credential.clone());
                (StatusCode::OK, Json(credential)).into_response()
            }
            Err(e) => Self::error_response(StatusCode::INTERNAL_SERVER_ERROR, &e),
        }
    }

    /// Verifies a credential against its issuer's stored public key
    ///
    /// # Endpoint
    /// POST /verify-credential
    ///
    /// # Responses
    /// Always 200 OK with a verification report: a credential that fails
    /// to verify is a normal outcome, not an HTTP error. An unknown
    /// issuer is reported inside the `errors` list.
    async fn verify_credential_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<VerifyCredentialRequest>,
    ) -> Response {
        let issuer_did = payload
            .issuer_did
            .or_else(|| {
                payload
                    .credential
                    .get("issuer")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });

        let report = match issuer_did.and_then(|did| state.store.lookup_did(&did)) {
            Some(record) => {
                CredentialVerifier::verify(&payload.credential, &record.public_key, record.scheme)
            }
            None => VerificationReport {
                verified: false,
                issuer: payload
                    .credential
                    .get("issuer")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                subject: payload
                    .credential
                    .get("credentialSubject")
                    .and_then(|subject| subject.get("id"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                issuance_date: payload
                    .credential
                    .get("issuanceDate")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                errors: vec![IdentityError::Verification(
                    "issuer DID is not registered".to_string(),
                )
                .to_string()],
            },
        };
        (StatusCode::OK, Json(report)).into_response()
    }

    /// Retrieves a stored credential by id
    ///
    /// # Endpoint
    /// GET /get-credential/:id
    ///
    /// # Responses
    /// - 200 OK: Returns the credential
    /// - 404 Not Found: No credential with that id
    async fn get_credential_handler(
        State(state): State<Arc<ApiServer>>,
        Path(id): Path<String>,
    ) -> Response {
        match state.store.lookup_credential(&id) {
            Some(credential) => (StatusCode::OK, Json(credential)).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("credential not found: {}", id) })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::InMemoryStore;

    fn server() -> (Arc<ApiServer>, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let server = Arc::new(ApiServer::new(store.clone()));
        (server, store)
    }

    #[tokio::test]
    async fn test_register_issue_verify_flow() {
        let (server, store) = server();

        // register an issuer DID
        let response = ApiServer::register_did_handler(
            State(server.clone()),
            Json(RegisterDidRequest {
                scheme: "ed25519".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let issuer_did = store.list_dids().pop().unwrap();
        assert!(issuer_did.starts_with("did:key:z6Mk"));

        // issue a credential to a literal subject DID
        let mut claims = Map::new();
        claims.insert("name".to_string(), json!("Ada"));
        let response = ApiServer::issue_credential_handler(
            State(server.clone()),
            Json(IssueCredentialRequest {
                subject_did: "did:key:z6MkhZSubjectExample".to_string(),
                credential_type: "IdentityCredential".to_string(),
                claims,
                issuer_did: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.count_credentials(), 1);

        // the response body is the signed credential; verify it against
        // the stored issuer key
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let wire: Value = serde_json::from_slice(&body).unwrap();
        let credential_id = wire["id"].as_str().unwrap();
        assert!(store.lookup_credential(credential_id).is_some());
        let record = store.lookup_did(&issuer_did).unwrap();
        let report = CredentialVerifier::verify(&wire, &record.public_key, record.scheme);
        assert!(report.verified, "errors: {:?}", report.errors);
        assert_eq!(report.issuer.as_deref(), Some(issuer_did.as_str()));
        assert_eq!(
            report.subject.as_deref(),
            Some("did:key:z6MkhZSubjectExample")
        );
    }

    #[tokio::test]
    async fn test_issue_without_any_issuer_is_404() {
        let (server, _) = server();
        let response = ApiServer::issue_credential_handler(
            State(server),
            Json(IssueCredentialRequest {
                subject_did: "did:key:z6MkhZSubjectExample".to_string(),
                credential_type: "IdentityCredential".to_string(),
                claims: Map::new(),
                issuer_did: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_scheme() {
        let (server, _) = server();
        let response = ApiServer::register_did_handler(
            State(server),
            Json(RegisterDidRequest {
                scheme: "rsa".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_with_unregistered_issuer_reports_error() {
        let (server, _) = server();
        let response = ApiServer::verify_credential_handler(
            State(server),
            Json(VerifyCredentialRequest {
                credential: json!({
                    "issuer": "did:key:z6MkUnknown",
                    "credentialSubject": { "id": "did:key:z6MkSubject" }
                }),
                issuer_did: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_resolve_unknown_did_is_404() {
        let (server, _) = server();
        let response = ApiServer::resolve_did_handler(
            Path("did:key:z6MkUnknown".to_string()),
            State(server),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
