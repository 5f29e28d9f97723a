use clap::Parser;
use ledger_node::{
    send_request, Command, Config, LedgerNode, Opt, Request, Response, Server, TcpChainFetcher,
    TransactionRequest,
};
use log::{error, info, LevelFilter};
use std::process;
use std::sync::Arc;
use std::time::Duration;

// Seconds to wait for answers to requests that do not mine.
const CLIENT_TIMEOUT: u64 = 30;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let request = match opt.command {
        Command::StartNode {
            config,
            addr,
            difficulty,
            encoding,
            peers,
        } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(addr) = addr {
                config.node_addr = addr;
            }
            if let Some(difficulty) = difficulty {
                config.difficulty = difficulty;
            }
            if let Some(encoding) = encoding {
                config.proof_encoding = encoding;
            }
            config.peers.extend(peers);
            config.validate()?;
            return start_node(config);
        }
        Command::Mine => Request::Mine,
        Command::Send {
            sender,
            recipient,
            amount,
        } => Request::NewTransaction(TransactionRequest::new(&sender, &recipient, amount)),
        Command::Printchain => Request::Chain,
        Command::Register { addresses } => Request::RegisterNodes {
            nodes: Some(addresses),
        },
        Command::Resolve => Request::Resolve,
    };

    // Mining has no upper bound on duration, so wait for it indefinitely.
    let timeout = match request {
        Request::Mine => None,
        _ => Some(Duration::from_secs(CLIENT_TIMEOUT)),
    };

    let response = send_request(&opt.node, &request, timeout)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Response::Error { message } = response {
        return Err(message.into());
    }
    Ok(())
}

fn start_node(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = TcpChainFetcher::new(config.peer_timeout());
    let node = Arc::new(LedgerNode::new(&config, Box::new(fetcher))?);
    info!(
        "Starting node {} (difficulty {}, {} proof encoding)",
        node.node_id(),
        node.ledger().get_pow().get_difficulty(),
        config.proof_encoding
    );
    let server = Server::bind(node, &config.node_addr)?;
    server.run()?;
    Ok(())
}
