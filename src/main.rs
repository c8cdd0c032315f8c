// src/main.rs

//! # Decentralized Identity System - Main Entry Point
//!
//! Initializes the in-memory identity store and starts the API server.
//!
//! ## Architecture Overview
//! 1. **Crypto Layer**: `did:key` codec and scheme-dispatched signatures
//! 2. **Services Layer**: DID document building, credential issuance,
//!    verification, and the API endpoints
//! 3. **Storage Layer**: in-memory DID/credential store behind the
//!    `IdentityStore` trait
//!
//! ## Environment Variables
//! - `BIND_ADDR`: (Optional) Socket address to listen on
//!   (default: 127.0.0.1:3000)

use crate::services::api_server::ApiServer;
use crate::storage::memory_store::InMemoryStore;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;

// Module declarations (organized by functional domain)
mod crypto;        // Key codec and signature engine
mod errors;        // Error taxonomy
mod models;        // Data structures
mod services;      // Business logic and API
mod storage;       // DID/credential storage layer
mod utils;         // Canonical serialization helpers

/// Main application entry point
///
/// # Initialization Sequence
/// 1. Load environment configuration
/// 2. Initialize the identity store
/// 3. Start the API server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;

    let store = Arc::new(InMemoryStore::new());
    let api_server = ApiServer::new(store);

    log::info!("API server running at http://{}", addr);
    log::info!("Available endpoints:");
    log::info!("- POST /register-did");
    log::info!("- GET  /resolve-did/:did");
    log::info!("- GET  /list-dids");
    log::info!("- POST /issue-credential");
    log::info!("- POST /verify-credential");
    log::info!("- GET  /get-credential/:id");

    api_server.run(addr).await
}
