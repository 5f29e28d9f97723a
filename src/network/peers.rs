use crate::error::{LedgerError, Result};
use log::info;
use std::collections::BTreeSet;
use std::sync::RwLock;
use url::Url;

/// Reduce a peer address to `host:port`, dropping scheme, credentials, path
/// and query. Addresses without a scheme are read as `http://`.
pub fn normalize_address(address: &str) -> Result<String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation("Peer address is empty".to_string()));
    }

    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{trimmed}"))
    }
    .map_err(|e| LedgerError::Validation(format!("Invalid peer address {trimmed}: {e}")))?;

    let host = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| LedgerError::Validation(format!("Peer address {trimmed} has no host")))?;
    let port = parsed
        .port_or_known_default()
        .ok_or_else(|| LedgerError::Validation(format!("Peer address {trimmed} has no port")))?;

    Ok(format!("{host}:{port}"))
}

/// The set of peers consulted during consensus. Entries are only ever added.
#[derive(Default)]
pub struct PeerRegistry {
    inner: RwLock<BTreeSet<String>>,
}

impl PeerRegistry {
    pub fn new() -> PeerRegistry {
        Self::default()
    }

    /// Normalize and add `address`; registering a known peer again is a no-op.
    pub fn register(&self, address: &str) -> Result<String> {
        let normalized = normalize_address(address)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|e| LedgerError::Lock(format!("Failed to acquire peer lock: {e}")))?;
        if inner.insert(normalized.clone()) {
            info!("Registered peer {normalized}");
        }
        Ok(normalized)
    }

    /// Register every address, or none of them if any fails to normalize.
    pub fn register_all(&self, addresses: &[String]) -> Result<Vec<String>> {
        let normalized = addresses
            .iter()
            .map(|address| normalize_address(address))
            .collect::<Result<Vec<_>>>()?;
        for address in &normalized {
            self.register(address)?;
        }
        Ok(normalized)
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| LedgerError::Lock(format!("Failed to acquire peer lock: {e}")))?;
        Ok(inner.iter().cloned().collect())
    }
}
