// The ledger owns the chain and the pool of transactions waiting for the next
// block. Both live behind one RwLock so a transaction either lands in the block
// being forged or stays in the pool for the next one, never both and never
// neither. Proof-of-work search runs with the lock released.

use crate::core::{Block, ProofOfWork, Transaction};
use crate::error::{LedgerError, Result};
use crate::utils::current_timestamp;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A consistent copy of the chain together with its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainSnapshot {
    pub fn new(chain: Vec<Block>) -> ChainSnapshot {
        let length = chain.len();
        ChainSnapshot { chain, length }
    }
}

struct LedgerState {
    chain: Vec<Block>,
    pending_transactions: Vec<Transaction>,
}

impl LedgerState {
    fn last_block(&self) -> Result<&Block> {
        self.chain
            .last()
            .ok_or_else(|| LedgerError::Validation("ledger chain is empty".to_string()))
    }

    fn next_index(&self) -> u64 {
        self.chain.len() as u64 + 1
    }

    /// Append a block holding every pending transaction (plus `reward`, last)
    /// and leave the pool empty. On error nothing has been touched.
    fn forge(
        &mut self,
        proof: u64,
        previous_hash: String,
        reward: Option<Transaction>,
    ) -> Result<Block> {
        let timestamp = current_timestamp()?;

        let mut transactions = std::mem::take(&mut self.pending_transactions);
        transactions.extend(reward);

        let block = Block::from_parts(
            self.next_index(),
            timestamp,
            transactions,
            proof,
            previous_hash,
        );
        self.chain.push(block.clone());
        Ok(block)
    }
}

pub struct Ledger {
    state: RwLock<LedgerState>,
    pow: ProofOfWork,
}

impl Ledger {
    /// Create a ledger holding only a genesis block with `genesis_proof`.
    pub fn new(pow: ProofOfWork, genesis_proof: u64) -> Result<Ledger> {
        let genesis = Block::generate_genesis_block(genesis_proof)?;
        Ok(Ledger {
            state: RwLock::new(LedgerState {
                chain: vec![genesis],
                pending_transactions: vec![],
            }),
            pow,
        })
    }

    pub fn get_pow(&self) -> ProofOfWork {
        self.pow
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Lock(format!("Failed to acquire ledger lock: {e}")))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|e| LedgerError::Lock(format!("Failed to acquire ledger lock: {e}")))
    }

    /// Queue a transaction for the next block and return that block's index.
    pub fn new_transaction(&self, sender: &str, recipient: &str, amount: u64) -> Result<u64> {
        let mut state = self.write_state()?;
        state
            .pending_transactions
            .push(Transaction::new(sender, recipient, amount));
        Ok(state.next_index())
    }

    /// Solve the puzzle on top of the current tip and forge the next block,
    /// paying the reward to `reward_recipient`.
    ///
    /// If the tip changes while solving (another block was forged or the chain
    /// was replaced) the proof is thrown away and solving starts over from the
    /// new tip.
    pub fn mine(&self, reward_recipient: &str) -> Result<Block> {
        loop {
            let last_block = self.last_block()?;
            let proof = self.pow.solve(last_block.get_proof());
            if let Some(block) = self.forge_on(&last_block, proof, reward_recipient)? {
                return Ok(block);
            }
        }
    }

    /// Forge the rewarded block for `proof` if `last_block` is still the tip.
    /// Returns `None`, leaving the ledger untouched, when the tip has moved.
    fn forge_on(
        &self,
        last_block: &Block,
        proof: u64,
        reward_recipient: &str,
    ) -> Result<Option<Block>> {
        let mut state = self.write_state()?;
        if state.last_block()? != last_block {
            warn!(
                "Chain tip moved while solving on top of block {}, starting over",
                last_block.get_index()
            );
            return Ok(None);
        }

        let block = state.forge(
            proof,
            last_block.hash(),
            Some(Transaction::new_reward(reward_recipient)),
        )?;
        info!(
            "Forged block {} with {} transaction(s), proof {}",
            block.get_index(),
            block.get_transactions().len(),
            block.get_proof()
        );
        Ok(Some(block))
    }

    /// Append a block made of the current pool. The pool is empty afterwards.
    pub fn new_block(&self, proof: u64, previous_hash: &str) -> Result<Block> {
        let mut state = self.write_state()?;
        state.forge(proof, previous_hash.to_string(), None)
    }

    pub fn last_block(&self) -> Result<Block> {
        let state = self.read_state()?;
        let block = state.last_block()?.clone();
        Ok(block)
    }

    pub fn chain(&self) -> Result<Vec<Block>> {
        Ok(self.read_state()?.chain.clone())
    }

    pub fn snapshot(&self) -> Result<ChainSnapshot> {
        Ok(ChainSnapshot::new(self.chain()?))
    }

    pub fn length(&self) -> Result<usize> {
        Ok(self.read_state()?.chain.len())
    }

    pub fn pending_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.read_state()?.pending_transactions.clone())
    }

    /// Swap in `candidate` wholesale. The pending pool is kept.
    pub fn replace_chain(&self, candidate: Vec<Block>) -> Result<()> {
        if candidate.is_empty() {
            return Err(LedgerError::Validation(
                "Replacement chain must contain a genesis block".to_string(),
            ));
        }
        let mut state = self.write_state()?;
        state.chain = candidate;
        Ok(())
    }

    /// Swap in `candidate` only if it is still longer than the local chain.
    ///
    /// Returns whether the swap happened together with the chain left in
    /// place, both decided under the same lock.
    pub fn adopt_if_longer(&self, candidate: Vec<Block>) -> Result<(bool, Vec<Block>)> {
        let mut state = self.write_state()?;
        if candidate.len() <= state.chain.len() {
            return Ok((false, state.chain.clone()));
        }
        info!(
            "Replacing chain of length {} with chain of length {}",
            state.chain.len(),
            candidate.len()
        );
        state.chain = candidate;
        Ok((true, state.chain.clone()))
    }
}
