use crate::error::LedgerError;
use crate::utils::sha256_hex;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leading zero hex digits required when nothing else is configured.
pub const DEFAULT_DIFFICULTY: usize = 4;

/// A SHA-256 hex digest has 64 characters; more zeros can never match.
pub const MAX_DIFFICULTY: usize = 64;

/// How `last_proof` and `proof` are joined before hashing.
///
/// `Concatenated` writes the two decimals back to back, which is what deployed
/// chains were mined with, but it lets `(1, 23)` and `(12, 3)` collide.
/// `Separated` puts a `:` between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofEncoding {
    #[default]
    Concatenated,
    Separated,
}

impl FromStr for ProofEncoding {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concatenated" => Ok(ProofEncoding::Concatenated),
            "separated" => Ok(ProofEncoding::Separated),
            _ => Err(LedgerError::Config(format!(
                "Invalid proof encoding: {s}. Valid options: concatenated, separated"
            ))),
        }
    }
}

impl fmt::Display for ProofEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofEncoding::Concatenated => write!(f, "concatenated"),
            ProofEncoding::Separated => write!(f, "separated"),
        }
    }
}

/// The mining puzzle: find `proof` such that the digest of
/// `(last_proof, proof)` starts with `difficulty` zero hex digits.
///
/// [`ProofOfWork::verify`] is the only place the puzzle is checked; solving
/// and chain validation both go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
    encoding: ProofEncoding,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        ProofOfWork::new(DEFAULT_DIFFICULTY, ProofEncoding::default())
    }
}

impl ProofOfWork {
    pub fn new(difficulty: usize, encoding: ProofEncoding) -> ProofOfWork {
        ProofOfWork {
            difficulty: difficulty.min(MAX_DIFFICULTY),
            encoding,
        }
    }

    pub fn get_difficulty(&self) -> usize {
        self.difficulty
    }

    fn prepare_data(&self, last_proof: u64, proof: u64) -> Vec<u8> {
        match self.encoding {
            ProofEncoding::Concatenated => format!("{last_proof}{proof}").into_bytes(),
            ProofEncoding::Separated => format!("{last_proof}:{proof}").into_bytes(),
        }
    }

    pub fn digest(&self, last_proof: u64, proof: u64) -> String {
        sha256_hex(self.prepare_data(last_proof, proof).as_slice())
    }

    pub fn verify(&self, last_proof: u64, proof: u64) -> bool {
        self.digest(last_proof, proof)
            .bytes()
            .take(self.difficulty)
            .filter(|b| *b == b'0')
            .count()
            == self.difficulty
    }

    /// Smallest non-negative proof accepted after `last_proof`.
    ///
    /// Unbounded: keeps counting until a solution turns up.
    pub fn solve(&self, last_proof: u64) -> u64 {
        let mut proof = 0;
        while !self.verify(last_proof, proof) {
            proof += 1;
        }
        debug!(
            "Solved proof {proof} after last proof {last_proof} (difficulty {})",
            self.difficulty
        );
        proof
    }
}
