use crate::core::{Block, ChainFetcher};
use crate::error::{LedgerError, Result};
use crate::network::message::{Request, Response};
use log::debug;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Milliseconds allowed for establishing a connection when no timeout is given.
pub const TCP_CONNECT_TIMEOUT: u64 = 5000;

/// Largest response body accepted from a node.
pub const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

fn resolve_addr(addr: &str) -> Result<SocketAddr> {
    addr.to_socket_addrs()
        .map_err(|e| LedgerError::Network(format!("Invalid address {addr}: {e}")))?
        .next()
        .ok_or_else(|| LedgerError::Network(format!("Address {addr} resolved to nothing")))
}

/// Send one request to the node at `addr` and wait for its response.
///
/// `timeout` bounds the connect, the write and the whole response read
/// together with the response size. `None` connects and writes with
/// [`TCP_CONNECT_TIMEOUT`] and waits for the answer indefinitely, which is
/// what mining needs.
pub fn send_request(addr: &str, request: &Request, timeout: Option<Duration>) -> Result<Response> {
    let socket_addr = resolve_addr(addr)?;
    debug!("Sending request to {socket_addr}: {request:?}");

    let io_timeout = timeout.unwrap_or(Duration::from_millis(TCP_CONNECT_TIMEOUT));
    let deadline = timeout.map(|t| Instant::now() + t);

    let mut stream = TcpStream::connect_timeout(&socket_addr, io_timeout)
        .map_err(|e| LedgerError::Network(format!("Failed to connect to {addr}: {e}")))?;
    stream
        .set_write_timeout(Some(io_timeout))
        .map_err(|e| LedgerError::Network(format!("Failed to set write timeout: {e}")))?;

    let body = serde_json::to_vec(request)?;
    stream
        .write_all(&body)
        .and_then(|_| stream.flush())
        .map_err(|e| LedgerError::Network(format!("Failed to send request: {e}")))?;
    stream
        .shutdown(Shutdown::Write)
        .map_err(|e| LedgerError::Network(format!("Failed to finish request: {e}")))?;

    let body = read_response(&stream, deadline)
        .map_err(|e| LedgerError::Network(format!("Failed to read response from {addr}: {e}")))?;
    Ok(serde_json::from_slice(&body)?)
}

/// Read until the peer closes its side, failing once `deadline` passes or the
/// body grows past [`MAX_RESPONSE_BYTES`].
fn read_response(stream: &TcpStream, deadline: Option<Instant>) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut limited = Read::take(stream, MAX_RESPONSE_BYTES + 1);

    loop {
        let remaining = match deadline {
            Some(deadline) => Some(
                deadline
                    .checked_duration_since(Instant::now())
                    .filter(|left| !left.is_zero())
                    .ok_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::TimedOut, "response deadline passed")
                    })?,
            ),
            None => None,
        };
        stream.set_read_timeout(remaining)?;

        let read = limited.read(&mut chunk)?;
        if read == 0 {
            return Ok(body);
        }
        body.extend_from_slice(&chunk[..read]);
        if body.len() as u64 > MAX_RESPONSE_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("response exceeds {MAX_RESPONSE_BYTES} bytes"),
            ));
        }
    }
}

/// Fetches a peer's chain with a `chain` request over TCP.
pub struct TcpChainFetcher {
    timeout: Duration,
}

impl TcpChainFetcher {
    pub fn new(timeout: Duration) -> TcpChainFetcher {
        TcpChainFetcher { timeout }
    }
}

impl ChainFetcher for TcpChainFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>> {
        let response = send_request(peer, &Request::Chain, Some(self.timeout))
            .map_err(|e| LedgerError::peer_unreachable(peer, e))?;

        match response {
            Response::Chain(snapshot) if snapshot.length == snapshot.chain.len() => {
                Ok(snapshot.chain)
            }
            Response::Chain(snapshot) => Err(LedgerError::peer_unreachable(
                peer,
                format!(
                    "reported length {} for a chain of {} blocks",
                    snapshot.length,
                    snapshot.chain.len()
                ),
            )),
            other => Err(LedgerError::peer_unreachable(
                peer,
                format!("unexpected response {other:?}"),
            )),
        }
    }
}
