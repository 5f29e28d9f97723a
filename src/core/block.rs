use crate::core::{hasher, Transaction};
use crate::error::Result;
use crate::utils::current_timestamp;
use serde::{Deserialize, Serialize};

/// `previous_hash` carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Proof stored in the genesis block unless configured otherwise.
pub const DEFAULT_GENESIS_PROOF: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: i64,
    transactions: Vec<Transaction>,
    proof: u64,
    previous_hash: String,
}

impl Block {
    /// Build the block that would sit at `index`, stamped with the current time.
    pub fn new_block(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Result<Block> {
        Ok(Block {
            index,
            timestamp: current_timestamp()?,
            transactions,
            proof,
            previous_hash,
        })
    }

    pub fn generate_genesis_block(proof: u64) -> Result<Block> {
        Block::new_block(1, vec![], proof, GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Assemble a block from explicit field values.
    pub fn from_parts(
        index: u64,
        timestamp: i64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Block {
        Block {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
        }
    }

    pub fn hash(&self) -> String {
        hasher::hash_block(self)
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_proof(&self) -> u64 {
        self.proof
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_block() {
        let genesis = Block::generate_genesis_block(DEFAULT_GENESIS_PROOF).unwrap();
        assert_eq!(genesis.get_index(), 1);
        assert_eq!(genesis.get_proof(), 100);
        assert_eq!(genesis.get_previous_hash(), "1");
        assert!(genesis.get_transactions().is_empty());
    }

    #[test]
    fn test_block_round_trips_through_json() {
        let block = Block::from_parts(
            2,
            1_609_396_010_814,
            vec![Transaction::new_reward("miner")],
            35293,
            "abc".to_string(),
        );
        let json = serde_json::to_string(&block).unwrap();
        let decoded: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, decoded);
    }
}
