//! Utility functions and helpers
//!
//! Digest and clock helpers shared by the hasher, the proof-of-work puzzle
//! and block construction.

pub mod crypto;

pub use crypto::{current_timestamp, sha256_digest, sha256_hex};
