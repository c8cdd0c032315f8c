// src/crypto/mod.rs
//! Cryptography layer: key generation/encoding and signature dispatch.

pub mod key_codec;
pub mod signature;
