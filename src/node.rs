//! The operations a node offers to its front end
//!
//! `LedgerNode` wires the ledger, the peer registry and consensus together
//! and validates request input before it reaches them. It is created once at
//! startup and shared by reference with every connection handler.

use crate::config::Config;
use crate::core::{
    Block, ChainFetcher, ChainSnapshot, ChainValidator, ConsensusResolver, Ledger, Resolution,
};
use crate::error::{LedgerError, Result};
use crate::network::message::TransactionRequest;
use crate::network::PeerRegistry;
use log::info;

pub struct LedgerNode {
    node_id: String,
    ledger: Ledger,
    peers: PeerRegistry,
    resolver: ConsensusResolver,
    fetcher: Box<dyn ChainFetcher>,
}

impl LedgerNode {
    /// Build a node from `config`, registering its startup peers.
    pub fn new(config: &Config, fetcher: Box<dyn ChainFetcher>) -> Result<LedgerNode> {
        let pow = config.proof_of_work();
        let node = LedgerNode {
            node_id: config.node_id.clone(),
            ledger: Ledger::new(pow, config.genesis_proof)?,
            peers: PeerRegistry::new(),
            resolver: ConsensusResolver::new(ChainValidator::new(pow)),
            fetcher,
        };
        node.peers.register_all(&config.peers)?;
        Ok(node)
    }

    pub fn node_id(&self) -> &str {
        self.node_id.as_str()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    /// Forge the next block, crediting this node with the reward.
    pub fn mine(&self) -> Result<Block> {
        self.ledger.mine(&self.node_id)
    }

    /// Queue a transaction; every field must be present.
    pub fn submit_transaction(&self, request: TransactionRequest) -> Result<u64> {
        match request {
            TransactionRequest {
                sender: Some(sender),
                recipient: Some(recipient),
                amount: Some(amount),
            } => self.ledger.new_transaction(&sender, &recipient, amount),
            TransactionRequest {
                sender,
                recipient,
                amount,
            } => {
                let missing: Vec<&str> = [
                    ("sender", sender.is_none()),
                    ("recipient", recipient.is_none()),
                    ("amount", amount.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(LedgerError::Validation(format!(
                    "Missing values: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    pub fn get_chain(&self) -> Result<ChainSnapshot> {
        self.ledger.snapshot()
    }

    /// Register a non-empty list of peers and return the full registry.
    pub fn register_peers(&self, addresses: Option<Vec<String>>) -> Result<Vec<String>> {
        let addresses = addresses
            .filter(|list| !list.is_empty())
            .ok_or_else(|| {
                LedgerError::Validation("Please supply a valid list of nodes".to_string())
            })?;
        self.peers.register_all(&addresses)?;
        self.peers.list()
    }

    pub fn resolve_consensus(&self) -> Result<Resolution> {
        let peers = self.peers.list()?;
        let resolution = self
            .resolver
            .resolve(&self.ledger, &peers, self.fetcher.as_ref())?;
        if resolution.replaced {
            info!(
                "Chain replaced by peer chain of length {}",
                resolution.chain.len()
            );
        }
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testnet::{build_chain_for, StubFetcher, TEST_DIFFICULTY};

    fn test_node(fetcher: StubFetcher, peers: &[&str]) -> LedgerNode {
        let config = Config {
            node_id: "node-under-test".to_string(),
            difficulty: TEST_DIFFICULTY,
            peers: peers.iter().map(|p| p.to_string()).collect(),
            ..Config::default()
        };
        LedgerNode::new(&config, Box::new(fetcher)).unwrap()
    }

    #[test]
    fn test_submit_then_mine() {
        let node = test_node(StubFetcher::new(), &[]);
        let index = node
            .submit_transaction(TransactionRequest::new("A", "B", 5))
            .unwrap();
        assert_eq!(index, 2);

        let block = node.mine().unwrap();
        assert_eq!(block.get_transactions().len(), 2);
        assert_eq!(block.get_transactions()[1].get_recipient(), "node-under-test");
        assert!(node.ledger().pending_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_submit_reports_missing_fields() {
        let node = test_node(StubFetcher::new(), &[]);
        let err = node
            .submit_transaction(TransactionRequest {
                sender: Some("A".to_string()),
                recipient: None,
                amount: None,
            })
            .unwrap_err();

        assert_eq!(
            err,
            LedgerError::Validation("Missing values: recipient, amount".to_string())
        );
        assert!(node.ledger().pending_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_register_requires_non_empty_list() {
        let node = test_node(StubFetcher::new(), &[]);
        assert!(matches!(
            node.register_peers(None),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            node.register_peers(Some(vec![])),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_register_returns_all_peers() {
        let node = test_node(StubFetcher::new(), &["10.0.0.1:5000"]);
        let peers = node
            .register_peers(Some(vec![
                "http://10.0.0.2:5000/".to_string(),
                "10.0.0.1:5000".to_string(),
            ]))
            .unwrap();
        assert_eq!(peers, vec!["10.0.0.1:5000", "10.0.0.2:5000"]);
    }

    #[test]
    fn test_get_chain_snapshot() {
        let node = test_node(StubFetcher::new(), &[]);
        node.mine().unwrap();
        let snapshot = node.get_chain().unwrap();
        assert_eq!(snapshot.length, 2);
    }

    #[test]
    fn test_resolve_consensus_uses_registered_peers() {
        let longer = build_chain_for("peer", 4);
        let fetcher = StubFetcher::new()
            .with_chain("10.0.0.1:5000", longer.clone())
            .with_failure("10.0.0.2:5000");
        let node = test_node(fetcher, &["10.0.0.1:5000", "10.0.0.2:5000"]);

        let resolution = node.resolve_consensus().unwrap();

        assert!(resolution.replaced);
        assert_eq!(node.get_chain().unwrap().chain, longer);
    }
}
