use crate::value_objects::ChainId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of a status check. A failed check carries an `error` message instead of a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub reachable: bool,
    pub version: Option<String>,
    pub connected: Option<bool>,
    pub database_connected: Option<bool>,
    pub chain_id: Option<ChainId>,
    pub block_number: Option<u64>,
    pub gas_price_gwei: Option<f64>,
    pub error: Option<String>,
}

impl SourceStatus {
    /// A check that failed with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            reachable: false,
            version: None,
            connected: None,
            database_connected: None,
            chain_id: None,
            block_number: None,
            gas_price_gwei: None,
            error: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.reachable && self.error.is_none()
    }
}

/// Connectivity of the backend and the chain it relays to. Last value wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub backend_reachable: bool,
    pub chain_backend_connected: bool,
    pub database_connected: bool,
    pub supported_chain_ids: BTreeSet<ChainId>,
}

impl NetworkStatus {
    /// Derives network status from the two status checks and the supported chain set.
    pub fn derive(
        api: &SourceStatus,
        chain_backend: &SourceStatus,
        supported_chain_ids: impl IntoIterator<Item = ChainId>,
    ) -> Self {
        Self {
            backend_reachable: api.is_ok(),
            chain_backend_connected: chain_backend.is_ok()
                && chain_backend.connected.unwrap_or(true),
            database_connected: api.is_ok() && api.database_connected.unwrap_or(false),
            supported_chain_ids: supported_chain_ids.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn supports(&self, chain_id: &ChainId) -> bool {
        self.supported_chain_ids.contains(chain_id)
    }
}
