//! Core ledger functionality
//!
//! Blocks and transactions, canonical hashing, the proof-of-work puzzle, the
//! chain store, chain validation and longest-chain conflict resolution.

pub mod block;
pub mod consensus;
pub mod hasher;
pub mod ledger;
pub mod proof_of_work;
pub mod transaction;
pub mod validator;

pub use block::{Block, DEFAULT_GENESIS_PROOF, GENESIS_PREVIOUS_HASH};
pub use consensus::{ChainFetcher, ConsensusResolver, Resolution};
pub use hasher::hash_block;
pub use ledger::{ChainSnapshot, Ledger};
pub use proof_of_work::{ProofEncoding, ProofOfWork, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
pub use transaction::{Transaction, MINING_REWARD, REWARD_SENDER};
pub use validator::{ChainFault, ChainValidator};
