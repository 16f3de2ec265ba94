use crate::enums::RiskLevel;
use crate::value_objects::ChainId;
use serde::{Deserialize, Serialize};

/// A yield-bearing pool offered by a protocol on a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub chain_id: ChainId,
    pub protocol_id: String,
    pub name: String,
    pub symbol: String,
    pub token0: String,
    pub token1: String,

    pub apy: f64,
    pub apy_7d: Option<f64>,
    pub apy_30d: Option<f64>,
    pub tvl_usd: f64,
    pub daily_volume_usd: f64,

    /// Risk score in `[0, 10]`.
    pub risk_score: f64,
    pub il_risk: RiskLevel,
    pub auto_compound: bool,
    pub reward_tokens: Vec<String>,
}
