// src/services/mod.rs
//! Business logic and API surface.

pub mod api_server;
pub mod credential_issuer;
pub mod did_builder;
pub mod verifier;
