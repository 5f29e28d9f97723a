use crate::core::{ProofEncoding, ProofOfWork, DEFAULT_DIFFICULTY, DEFAULT_GENESIS_PROOF, MAX_DIFFICULTY};
use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_NODE_ADDR: &str = "127.0.0.1:5000";

const DEFAULT_PEER_TIMEOUT_MS: u64 = 5000;

const NODE_ADDRESS_KEY: &str = "NODE_ADDRESS";
const NODE_ID_KEY: &str = "NODE_ID";
const DIFFICULTY_KEY: &str = "POW_DIFFICULTY";
const ENCODING_KEY: &str = "POW_ENCODING";
const PEER_TIMEOUT_KEY: &str = "PEER_TIMEOUT_MS";

/// Node settings. Built from defaults, then an optional TOML file, then
/// environment variables; the CLI applies its flags last.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the node listens on.
    pub node_addr: String,
    /// Identifier credited with mining rewards.
    pub node_id: String,
    /// Leading zero hex digits required by the puzzle.
    pub difficulty: usize,
    pub proof_encoding: ProofEncoding,
    pub genesis_proof: u64,
    pub peer_timeout_ms: u64,
    /// Peers registered at startup.
    pub peers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_addr: DEFAULT_NODE_ADDR.to_string(),
            node_id: generate_node_id(),
            difficulty: DEFAULT_DIFFICULTY,
            proof_encoding: ProofEncoding::default(),
            genesis_proof: DEFAULT_GENESIS_PROOF,
            peer_timeout_ms: DEFAULT_PEER_TIMEOUT_MS,
            peers: vec![],
        }
    }
}

/// Globally unique node identifier: a v4 UUID without dashes.
pub fn generate_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Config {
    /// Defaults, overlaid with `path` if given, overlaid with the environment.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env_from(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| {
            LedgerError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Apply overrides looked up through `lookup` (normally `std::env::var`).
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(NODE_ADDRESS_KEY) {
            self.node_addr = addr;
        }
        if let Some(node_id) = lookup(NODE_ID_KEY) {
            self.node_id = node_id;
        }
        if let Some(difficulty) = lookup(DIFFICULTY_KEY) {
            self.difficulty = difficulty.parse().map_err(|e| {
                LedgerError::Config(format!("{DIFFICULTY_KEY}={difficulty} is not a number: {e}"))
            })?;
        }
        if let Some(encoding) = lookup(ENCODING_KEY) {
            self.proof_encoding = encoding.parse()?;
        }
        if let Some(timeout) = lookup(PEER_TIMEOUT_KEY) {
            self.peer_timeout_ms = timeout.parse().map_err(|e| {
                LedgerError::Config(format!("{PEER_TIMEOUT_KEY}={timeout} is not a number: {e}"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.difficulty == 0 || self.difficulty > MAX_DIFFICULTY {
            return Err(LedgerError::Config(format!(
                "difficulty must be between 1 and {MAX_DIFFICULTY}, got {}",
                self.difficulty
            )));
        }
        if self.node_id.trim().is_empty() {
            return Err(LedgerError::Config("node_id must not be empty".to_string()));
        }
        if self.node_addr.trim().is_empty() {
            return Err(LedgerError::Config("node_addr must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn proof_of_work(&self) -> ProofOfWork {
        ProofOfWork::new(self.difficulty, self.proof_encoding)
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_millis(self.peer_timeout_ms)
    }
}
