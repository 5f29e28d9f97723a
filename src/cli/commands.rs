use crate::config::DEFAULT_NODE_ADDR;
use crate::core::ProofEncoding;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ledger-node")]
pub struct Opt {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_NODE_ADDR,
        help = "Address of the node to talk to"
    )]
    pub node: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "startnode", about = "Start a ledger node")]
    StartNode {
        #[arg(long, help = "TOML configuration file")]
        config: Option<PathBuf>,
        #[arg(long, help = "Address to listen on")]
        addr: Option<String>,
        #[arg(long, help = "Leading zero hex digits required by the puzzle")]
        difficulty: Option<usize>,
        #[arg(
            long,
            help = "How proofs are joined before hashing (concatenated, separated)"
        )]
        encoding: Option<ProofEncoding>,
        #[arg(long = "peer", help = "Peer to register at startup (repeatable)")]
        peers: Vec<String>,
    },
    #[command(name = "mine", about = "Forge the next block on the node")]
    Mine,
    #[command(name = "send", about = "Queue a transaction on the node")]
    Send {
        #[arg(help = "Sender identifier")]
        sender: String,
        #[arg(help = "Recipient identifier")]
        recipient: String,
        #[arg(help = "Amount to transfer")]
        amount: u64,
    },
    #[command(name = "printchain", about = "Print the node's full chain")]
    Printchain,
    #[command(name = "register", about = "Register peers with the node")]
    Register {
        #[arg(required = true, help = "Peer addresses, e.g. http://10.0.0.2:5000")]
        addresses: Vec<String>,
    },
    #[command(name = "resolve", about = "Run consensus against the node's peers")]
    Resolve,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_startnode() {
        let opt = Opt::try_parse_from([
            "ledger-node",
            "startnode",
            "--addr",
            "0.0.0.0:5001",
            "--difficulty",
            "3",
            "--encoding",
            "separated",
            "--peer",
            "10.0.0.2:5000",
            "--peer",
            "10.0.0.3:5000",
        ])
        .unwrap();

        match opt.command {
            Command::StartNode {
                addr,
                difficulty,
                encoding,
                peers,
                config,
            } => {
                assert_eq!(addr.as_deref(), Some("0.0.0.0:5001"));
                assert_eq!(difficulty, Some(3));
                assert_eq!(encoding, Some(ProofEncoding::Separated));
                assert_eq!(peers.len(), 2);
                assert!(config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_send_with_node() {
        let opt = Opt::try_parse_from([
            "ledger-node",
            "send",
            "A",
            "B",
            "5",
            "--node",
            "127.0.0.1:5001",
        ])
        .unwrap();
        assert_eq!(opt.node, "127.0.0.1:5001");
        assert!(matches!(opt.command, Command::Send { amount: 5, .. }));
    }

    #[test]
    fn test_register_requires_addresses() {
        assert!(Opt::try_parse_from(["ledger-node", "register"]).is_err());
    }

    #[test]
    fn test_default_node() {
        let opt = Opt::try_parse_from(["ledger-node", "printchain"]).unwrap();
        assert_eq!(opt.node, DEFAULT_NODE_ADDR);
    }
}
