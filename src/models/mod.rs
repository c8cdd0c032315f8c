// src/models/mod.rs
//! Data structures shared across the DID system.

pub mod credential;
pub mod did;
