// src/utils/mod.rs
//! Helper functions shared by the services layer.

pub mod canonical;
