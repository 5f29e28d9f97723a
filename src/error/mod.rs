//! Error handling for the ledger node
//!
//! Request-level failures (`Validation`) are surfaced to callers as a
//! rejection. Peer failures (`PeerUnreachable`) are absorbed by consensus
//! resolution and only ever logged.

use std::fmt;

/// Result type alias for ledger node operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error types for ledger node operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Missing or malformed request input
    Validation(String),
    /// A peer could not be reached or returned something unusable
    PeerUnreachable { peer: String, reason: String },
    /// Network communication errors
    Network(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
    /// Configuration errors
    Config(String),
    /// A shared-state lock was poisoned
    Lock(String),
    /// System clock errors
    Time(String),
}

impl LedgerError {
    pub fn peer_unreachable(peer: &str, reason: impl fmt::Display) -> Self {
        LedgerError::PeerUnreachable {
            peer: peer.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Validation(msg) => write!(f, "Validation error: {msg}"),
            LedgerError::PeerUnreachable { peer, reason } => {
                write!(f, "Peer {peer} unreachable: {reason}")
            }
            LedgerError::Network(msg) => write!(f, "Network error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Lock(msg) => write!(f, "Lock error: {msg}"),
            LedgerError::Time(msg) => write!(f, "System time error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}
