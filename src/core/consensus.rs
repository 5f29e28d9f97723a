//! Longest-valid-chain conflict resolution
//!
//! Peer chains are fetched concurrently, one thread per peer. Unreachable
//! peers and invalid chains are logged and skipped. Among the rest, the
//! longest chain that beats the local one wins; on equal lengths the first
//! peer seen keeps the lead.

use crate::core::{Block, ChainValidator, Ledger};
use crate::error::{LedgerError, Result};
use log::{debug, info, warn};
use std::thread;

/// Retrieves a peer's full chain. Any failure means the peer is skipped.
pub trait ChainFetcher: Send + Sync {
    fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>>;
}

/// Outcome of a resolution round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

pub struct ConsensusResolver {
    validator: ChainValidator,
}

impl ConsensusResolver {
    pub fn new(validator: ChainValidator) -> ConsensusResolver {
        ConsensusResolver { validator }
    }

    /// Compare `local` against every peer's chain without touching any state.
    ///
    /// Returns `(true, winner)` when a longer valid chain was found and
    /// `(false, local)` otherwise.
    pub fn resolve_chain(
        &self,
        local: &[Block],
        peers: &[String],
        fetcher: &dyn ChainFetcher,
    ) -> (bool, Vec<Block>) {
        match self.longest_valid(local.len(), fetch_all(peers, fetcher)) {
            Some(chain) => (true, chain),
            None => (false, local.to_vec()),
        }
    }

    /// Run a resolution round against `ledger`, replacing its chain if a peer
    /// holds a longer valid one.
    ///
    /// The final length check and the swap happen under the ledger's lock, so
    /// blocks mined locally while peers were being queried are not lost to a
    /// chain that is no longer longer.
    pub fn resolve(
        &self,
        ledger: &Ledger,
        peers: &[String],
        fetcher: &dyn ChainFetcher,
    ) -> Result<Resolution> {
        let local = ledger.chain()?;
        let (found, candidate) = self.resolve_chain(&local, peers, fetcher);

        if !found {
            return Ok(Resolution {
                replaced: false,
                chain: local,
            });
        }

        let (replaced, chain) = ledger.adopt_if_longer(candidate)?;
        if !replaced {
            info!("Local chain grew past the winning peer chain during resolution");
        }
        Ok(Resolution { replaced, chain })
    }

    fn longest_valid(
        &self,
        local_len: usize,
        fetched: Vec<(String, Result<Vec<Block>>)>,
    ) -> Option<Vec<Block>> {
        let mut best: Option<Vec<Block>> = None;
        let mut max_len = local_len;

        for (peer, outcome) in fetched {
            let chain = match outcome {
                Ok(chain) => chain,
                Err(e) => {
                    warn!("Skipping peer {peer}: {e}");
                    continue;
                }
            };

            if chain.len() <= max_len {
                debug!(
                    "Peer {peer} chain of length {} does not beat {max_len}",
                    chain.len()
                );
                continue;
            }

            match self.validator.validate(&chain) {
                Ok(()) => {
                    max_len = chain.len();
                    best = Some(chain);
                }
                Err(fault) => warn!("Rejecting chain from peer {peer}: {fault}"),
            }
        }

        best
    }
}

fn fetch_all(peers: &[String], fetcher: &dyn ChainFetcher) -> Vec<(String, Result<Vec<Block>>)> {
    thread::scope(|scope| {
        let handles: Vec<_> = peers
            .iter()
            .map(|peer| (peer, scope.spawn(move || fetcher.fetch_chain(peer))))
            .collect();

        handles
            .into_iter()
            .map(|(peer, handle)| {
                let outcome = handle.join().unwrap_or_else(|_| {
                    Err(LedgerError::peer_unreachable(peer, "fetch thread panicked"))
                });
                (peer.clone(), outcome)
            })
            .collect()
    })
}
