use crate::core::{Block, ProofOfWork};
use std::fmt;

/// Why a candidate chain was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainFault {
    /// The chain has no genesis block.
    Empty,
    /// `previous_hash` of the block at `position` does not match its predecessor.
    BrokenLink { position: usize },
    /// The proof of the block at `position` does not solve the puzzle.
    InvalidProof { position: usize },
}

impl fmt::Display for ChainFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainFault::Empty => write!(f, "chain is empty"),
            ChainFault::BrokenLink { position } => {
                write!(f, "block at position {position} does not link to its predecessor")
            }
            ChainFault::InvalidProof { position } => {
                write!(f, "block at position {position} carries an invalid proof")
            }
        }
    }
}

/// Read-only structural and proof-of-work check of a candidate chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainValidator {
    pow: ProofOfWork,
}

impl ChainValidator {
    pub fn new(pow: ProofOfWork) -> ChainValidator {
        ChainValidator { pow }
    }

    pub fn is_valid(&self, chain: &[Block]) -> bool {
        self.validate(chain).is_ok()
    }

    /// Walk adjacent pairs from the genesis block forward and report the
    /// first fault found.
    pub fn validate(&self, chain: &[Block]) -> Result<(), ChainFault> {
        if chain.is_empty() {
            return Err(ChainFault::Empty);
        }

        for (position, pair) in chain.windows(2).enumerate() {
            let (prev, cur) = (&pair[0], &pair[1]);
            if cur.get_previous_hash() != prev.hash() {
                return Err(ChainFault::BrokenLink {
                    position: position + 1,
                });
            }
            if !self.pow.verify(prev.get_proof(), cur.get_proof()) {
                return Err(ChainFault::InvalidProof {
                    position: position + 1,
                });
            }
        }

        Ok(())
    }
}
