//! Canonical block digests
//!
//! A block is rendered as compact JSON with every object's keys in ascending
//! order, then hashed with SHA-256. Keys are emitted already sorted so the
//! output does not depend on how `serde_json` orders its maps.

use crate::core::{Block, Transaction};
use crate::utils::sha256_hex;
use serde_json::{json, Value};

/// Lowercase hex SHA-256 of the block's canonical serialization.
pub fn hash_block(block: &Block) -> String {
    sha256_hex(canonical_bytes(block).as_slice())
}

/// Compact, key-sorted JSON for `block`.
pub fn canonical_bytes(block: &Block) -> Vec<u8> {
    canonical_value(block).to_string().into_bytes()
}

fn canonical_value(block: &Block) -> Value {
    let transactions: Vec<Value> = block
        .get_transactions()
        .iter()
        .map(canonical_transaction)
        .collect();

    json!({
        "index": block.get_index(),
        "previous_hash": block.get_previous_hash(),
        "proof": block.get_proof(),
        "timestamp": block.get_timestamp(),
        "transactions": transactions,
    })
}

fn canonical_transaction(tx: &Transaction) -> Value {
    json!({
        "amount": tx.get_amount(),
        "recipient": tx.get_recipient(),
        "sender": tx.get_sender(),
    })
}
