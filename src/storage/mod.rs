// src/storage/mod.rs
//! Storage layer: the identity store contract and its in-memory backend.

pub mod memory_store;
