//! Peer-to-peer networking functionality
//!
//! The peer registry, the JSON request/response protocol, the TCP server
//! fronting a node, and the client used both by the CLI and to fetch peer
//! chains during consensus.

pub mod client;
pub mod message;
pub mod peers;
pub mod server;

pub use client::{send_request, TcpChainFetcher};
pub use message::{Request, Response, TransactionRequest};
pub use peers::{normalize_address, PeerRegistry};
pub use server::Server;
