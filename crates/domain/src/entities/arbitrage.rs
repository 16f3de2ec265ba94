use crate::value_objects::ChainId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-bounded price discrepancy for one token across two chains.
///
/// `expires_at` may already be in the past; consumers treat such entries as
/// expired rather than invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub id: String,
    pub token_symbol: String,
    pub source_chain: ChainId,
    pub dest_chain: ChainId,
    pub source_price: f64,
    pub dest_price: f64,
    pub gross_profit_usd: f64,
    pub gas_cost_usd: f64,
    pub net_profit_usd: f64,
    pub profit_percentage: f64,
    pub expires_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
