//! Test network utilities
//!
//! Helpers for building ledgers, canned chains and stub peers in tests.

pub mod test_utils;

pub use test_utils::*;
