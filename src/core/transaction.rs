use serde::{Deserialize, Serialize};

/// Sender used for the coin minted by whoever forges a block.
pub const REWARD_SENDER: &str = "0";

/// Amount minted for forging a block.
pub const MINING_REWARD: u64 = 1;

/// A transfer waiting in, or recorded by, a block.
///
/// Transactions carry no identity beyond their content; two transfers with the
/// same fields are indistinguishable. Nothing here checks balances or
/// signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    sender: String,
    recipient: String,
    amount: u64,
}

impl Transaction {
    pub fn new(sender: &str, recipient: &str, amount: u64) -> Transaction {
        Transaction {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        }
    }

    /// The transaction paying the miner of the next block.
    pub fn new_reward(recipient: &str) -> Transaction {
        Transaction::new(REWARD_SENDER, recipient, MINING_REWARD)
    }

    pub fn get_sender(&self) -> &str {
        self.sender.as_str()
    }

    pub fn get_recipient(&self) -> &str {
        self.recipient.as_str()
    }

    pub fn get_amount(&self) -> u64 {
        self.amount
    }

    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}
