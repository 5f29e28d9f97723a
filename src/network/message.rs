//! Wire messages exchanged between nodes and clients
//!
//! Each connection carries exactly one JSON [`Request`] followed by one JSON
//! [`Response`].

use crate::core::{Block, ChainSnapshot};
use serde::{Deserialize, Serialize};

/// Payload for queuing a transaction. Fields are optional on the wire so a
/// missing one can be reported instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub amount: Option<u64>,
}

impl TransactionRequest {
    pub fn new(sender: &str, recipient: &str, amount: u64) -> Self {
        TransactionRequest {
            sender: Some(sender.to_string()),
            recipient: Some(recipient.to_string()),
            amount: Some(amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Mine,
    NewTransaction(TransactionRequest),
    Chain,
    RegisterNodes {
        #[serde(default)]
        nodes: Option<Vec<String>>,
    },
    Resolve,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Mined {
        message: String,
        block: Block,
    },
    TransactionAccepted {
        message: String,
        index: u64,
    },
    Chain(ChainSnapshot),
    NodesRegistered {
        message: String,
        total_nodes: Vec<String>,
    },
    Resolved {
        message: String,
        replaced: bool,
        chain: Vec<Block>,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_value(Request::NewTransaction(TransactionRequest::new(
            "A", "B", 5,
        )))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "new_transaction", "sender": "A", "recipient": "B", "amount": 5})
        );
    }

    #[test]
    fn test_missing_transaction_fields_parse_as_none() {
        let request: Request =
            serde_json::from_str(r#"{"type":"new_transaction","sender":"A"}"#).unwrap();
        assert_eq!(
            request,
            Request::NewTransaction(TransactionRequest {
                sender: Some("A".to_string()),
                recipient: None,
                amount: None,
            })
        );
    }

    #[test]
    fn test_register_without_nodes_parses() {
        let request: Request = serde_json::from_str(r#"{"type":"register_nodes"}"#).unwrap();
        assert_eq!(request, Request::RegisterNodes { nodes: None });
    }

    #[test]
    fn test_chain_response_carries_length() {
        let json = serde_json::to_value(Response::Chain(ChainSnapshot::new(vec![]))).unwrap();
        assert_eq!(json, serde_json::json!({"type": "chain", "chain": [], "length": 0}));
    }

    #[test]
    fn test_amount_must_be_whole_and_non_negative() {
        for amount in ["2.5", "-1"] {
            let json = format!(r#"{{"type":"new_transaction","sender":"A","recipient":"B","amount":{amount}}}"#);
            assert!(serde_json::from_str::<Request>(&json).is_err(), "accepted {amount}");
        }
    }
}
