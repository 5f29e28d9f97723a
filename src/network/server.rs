use crate::error::{LedgerError, Result};
use crate::network::message::{Request, Response};
use crate::node::LedgerNode;
use log::{debug, error, info};
use serde_json::Deserializer;
use std::io::{BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Seconds a client gets to deliver its request.
const REQUEST_READ_TIMEOUT: u64 = 60;

/// TCP front end: one JSON request in, one JSON response out per connection.
pub struct Server {
    node: Arc<LedgerNode>,
    listener: TcpListener,
}

impl Server {
    pub fn bind(node: Arc<LedgerNode>, addr: &str) -> Result<Server> {
        let listener = TcpListener::bind(addr)
            .map_err(|e| LedgerError::Network(format!("Failed to bind to {addr}: {e}")))?;
        Ok(Server { node, listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, one handler thread each.
    pub fn run(self) -> Result<()> {
        info!(
            "Node {} listening on {}",
            self.node.node_id(),
            self.local_addr()?
        );

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    error!("Failed to accept connection: {e}");
                    continue;
                }
            };
            let node = Arc::clone(&self.node);
            thread::spawn(move || {
                let peer_addr = stream
                    .peer_addr()
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                if let Err(e) = Self::handle_connection(&node, stream) {
                    error!("Error handling connection from {peer_addr}: {e}");
                }
            });
        }
        Ok(())
    }

    fn handle_connection(node: &LedgerNode, stream: TcpStream) -> Result<()> {
        stream
            .set_read_timeout(Some(Duration::from_secs(REQUEST_READ_TIMEOUT)))
            .map_err(|e| LedgerError::Network(format!("Failed to set read timeout: {e}")))?;

        let reader = BufReader::new(&stream);
        let request = Deserializer::from_reader(reader).into_iter::<Request>().next();

        let response = match request {
            Some(Ok(request)) => {
                debug!("Received request: {request:?}");
                Self::dispatch(node, request)
            }
            Some(Err(e)) => Response::Error {
                message: format!("Malformed request: {e}"),
            },
            None => {
                return Err(LedgerError::Network(
                    "connection closed before a request arrived".to_string(),
                ))
            }
        };

        let body = serde_json::to_vec(&response)?;
        let mut writer = &stream;
        writer
            .write_all(&body)
            .and_then(|_| writer.flush())
            .map_err(|e| LedgerError::Network(format!("Failed to send response: {e}")))?;
        let _ = stream.shutdown(Shutdown::Both);
        Ok(())
    }

    /// Run a request against the node and turn the outcome into a response.
    pub fn dispatch(node: &LedgerNode, request: Request) -> Response {
        Self::execute(node, request).unwrap_or_else(|e| Response::Error {
            message: e.to_string(),
        })
    }

    fn execute(node: &LedgerNode, request: Request) -> Result<Response> {
        let response = match request {
            Request::Mine => Response::Mined {
                message: "New block forged".to_string(),
                block: node.mine()?,
            },
            Request::NewTransaction(tx) => {
                let index = node.submit_transaction(tx)?;
                Response::TransactionAccepted {
                    message: format!("Transaction will be added to Block {index}"),
                    index,
                }
            }
            Request::Chain => Response::Chain(node.get_chain()?),
            Request::RegisterNodes { nodes } => Response::NodesRegistered {
                message: "New nodes have been added".to_string(),
                total_nodes: node.register_peers(nodes)?,
            },
            Request::Resolve => {
                let resolution = node.resolve_consensus()?;
                let message = if resolution.replaced {
                    "Our chain was replaced"
                } else {
                    "Our chain is authoritative"
                };
                Response::Resolved {
                    message: message.to_string(),
                    replaced: resolution.replaced,
                    chain: resolution.chain,
                }
            }
        };
        Ok(response)
    }
}
