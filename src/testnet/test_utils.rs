//! Test utilities for ledger testing

use crate::core::{Block, ChainFetcher, Ledger, ProofEncoding, ProofOfWork, DEFAULT_GENESIS_PROOF};
use crate::error::{LedgerError, Result};
use std::collections::HashMap;

/// Easy puzzle so mining in tests takes a few hundred hashes.
pub const TEST_DIFFICULTY: usize = 2;

pub fn test_pow() -> ProofOfWork {
    ProofOfWork::new(TEST_DIFFICULTY, ProofEncoding::Concatenated)
}

pub fn test_ledger() -> Ledger {
    Ledger::new(test_pow(), DEFAULT_GENESIS_PROOF).unwrap()
}

/// A valid chain of `length` blocks (genesis included).
pub fn build_chain(length: usize) -> Vec<Block> {
    build_chain_for("test-miner", length)
}

/// A valid chain of `length` blocks whose rewards go to `miner`, so chains
/// built for different miners never compare equal.
pub fn build_chain_for(miner: &str, length: usize) -> Vec<Block> {
    let ledger = test_ledger();
    for _ in 1..length {
        ledger.mine(miner).unwrap();
    }
    ledger.chain().unwrap()
}

/// Fetcher answering from a fixed table; unknown peers are unreachable.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Result<Vec<Block>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, peer: &str, chain: Vec<Block>) -> Self {
        self.responses.insert(peer.to_string(), Ok(chain));
        self
    }

    pub fn with_failure(mut self, peer: &str) -> Self {
        self.responses.insert(
            peer.to_string(),
            Err(LedgerError::peer_unreachable(peer, "connection refused")),
        );
        self
    }
}

impl ChainFetcher for StubFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>> {
        self.responses
            .get(peer)
            .cloned()
            .unwrap_or_else(|| Err(LedgerError::peer_unreachable(peer, "unknown peer")))
    }
}
