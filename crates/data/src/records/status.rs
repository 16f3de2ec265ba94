//! Status checks, supported chain lists and wallet balance records.

use omniyield_domain::entities::{NativeBalance, SourceStatus};
use omniyield_domain::value_objects::ChainId;
use serde::{Deserialize, Serialize};

/// Body of `GET /` on the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiStatusRecord {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, alias = "database")]
    pub database_connected: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<ApiStatusRecord> for SourceStatus {
    fn from(record: ApiStatusRecord) -> Self {
        Self {
            reachable: true,
            version: record.version,
            connected: None,
            database_connected: record.database_connected,
            chain_id: None,
            block_number: None,
            gas_price_gwei: None,
            error: record.error,
        }
    }
}

/// Body of `/zetachain/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainStatusRecord {
    #[serde(default)]
    pub connected: Option<bool>,
    #[serde(default)]
    pub chain_id: Option<ChainId>,
    #[serde(default, alias = "latest_block")]
    pub block_number: Option<u64>,
    #[serde(default, alias = "gas_price")]
    pub gas_price_gwei: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<ChainStatusRecord> for SourceStatus {
    fn from(record: ChainStatusRecord) -> Self {
        Self {
            reachable: true,
            version: None,
            connected: record.connected,
            database_connected: None,
            chain_id: record.chain_id,
            block_number: record.block_number,
            gas_price_gwei: record.gas_price_gwei,
            error: record.error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedChainEntry {
    #[serde(alias = "chain_id")]
    pub id: ChainId,
}

/// Body of `/zetachain/supported-chains`. The backend has answered with a bare
/// id list, a list of objects, and a wrapped list; all three are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportedChainsRecord {
    Ids(Vec<ChainId>),
    Entries(Vec<SupportedChainEntry>),
    Wrapped { supported_chains: Vec<ChainId> },
}

impl SupportedChainsRecord {
    /// Flattens to a list of non-empty chain ids.
    pub fn into_ids(self) -> Vec<ChainId> {
        let ids = match self {
            Self::Ids(ids) | Self::Wrapped { supported_chains: ids } => ids,
            Self::Entries(entries) => entries.into_iter().map(|e| e.id).collect(),
        };
        ids.into_iter().filter(|id| !id.is_empty()).collect()
    }
}

/// Body of `/zetachain/balance/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRecord {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(alias = "balance_zeta")]
    pub balance: f64,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub balance_usd: Option<f64>,
}

impl BalanceRecord {
    /// Converts into a [`NativeBalance`], using `default_symbol` when the
    /// backend omits one. Returns `None` for negative or non-finite amounts.
    pub fn into_native(self, default_symbol: &str) -> Option<NativeBalance> {
        if !self.balance.is_finite() || self.balance < 0.0 {
            return None;
        }
        Some(NativeBalance {
            amount: self.balance,
            symbol: self.symbol.unwrap_or_else(|| default_symbol.to_string()),
        })
    }
}
