//! Configuration management
//!
//! Listen address, node identity, puzzle settings and startup peers.

pub mod settings;

pub use settings::{generate_node_id, Config, DEFAULT_NODE_ADDR};
