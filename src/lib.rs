//! # Ledger Node - A Minimal Proof-of-Work Ledger
//!
//! A single-process node that keeps an append-only chain of blocks, queues
//! pending transactions, mines blocks by brute-forcing a proof-of-work puzzle
//! and reconciles with peer nodes by adopting the longest valid chain.
//!
//! ## How the Code Is Organized
//! - `core/`: blocks, transactions, hashing, the puzzle, the chain store,
//!   chain validation and consensus
//! - `network/`: peer registry, wire protocol, TCP server and client
//! - `node.rs`: the operations exposed to clients, with input validation
//! - `config/`: layered node configuration
//! - `cli/`: command-line interface
//! - `utils/`: digest and clock helpers
//!
//! ## Where to Start
//! 1. `core/ledger.rs` for how blocks are forged and how the lock is held
//! 2. `core/consensus.rs` for the longest-chain rule
//! 3. `network/server.rs` for how requests reach the node

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod network;
pub mod node;
pub mod utils;

#[cfg(test)]
pub mod testnet;

pub use cli::{Command, Opt};
pub use config::Config;
pub use core::{
    Block, ChainFault, ChainFetcher, ChainSnapshot, ChainValidator, ConsensusResolver, Ledger,
    ProofEncoding, ProofOfWork, Resolution, Transaction,
};
pub use error::{LedgerError, Result};
pub use network::{
    normalize_address, send_request, PeerRegistry, Request, Response, Server, TcpChainFetcher,
    TransactionRequest,
};
pub use node::LedgerNode;
pub use utils::{current_timestamp, sha256_digest, sha256_hex};
