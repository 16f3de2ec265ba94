//! Arbitrage opportunity records.

use super::{finite, non_negative};
use crate::error::SourceError;
use chrono::{DateTime, Utc};
use omniyield_domain::entities::ArbitrageOpportunity;
use omniyield_domain::value_objects::{ChainId, timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Entry of `/arbitrage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageRecord {
    pub id: String,
    pub token_symbol: String,
    pub source_chain: ChainId,
    pub dest_chain: ChainId,
    pub source_price: f64,
    pub dest_price: f64,
    #[serde(default)]
    pub profit_percentage: f64,
    #[serde(alias = "gross_profit_usd")]
    pub profit_usd: f64,
    #[serde(default)]
    pub gas_cost_usd: f64,
    #[serde(default)]
    pub net_profit_usd: Option<f64>,
    #[serde(with = "timestamp")]
    pub expires_at: DateTime<Utc>,
}

impl ArbitrageRecord {
    /// Converts into an [`ArbitrageOpportunity`], recomputing the net profit as
    /// gross profit minus gas. Past expiry times are kept.
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRecord`] for negative prices or gas cost, or
    /// when both chains are the same.
    pub fn into_domain(self) -> Result<ArbitrageOpportunity, SourceError> {
        const KIND: &str = "arbitrage";
        let id = self.id.as_str();
        if self.source_chain == self.dest_chain {
            return Err(SourceError::invalid(KIND, id, "source and destination chain are equal"));
        }

        let source_price = non_negative(KIND, id, "source_price", self.source_price)?;
        let dest_price = non_negative(KIND, id, "dest_price", self.dest_price)?;
        let gas_cost_usd = non_negative(KIND, id, "gas_cost_usd", self.gas_cost_usd)?;
        let gross_profit_usd = finite(KIND, id, "profit_usd", self.profit_usd)?;
        let profit_percentage = finite(KIND, id, "profit_percentage", self.profit_percentage)?;

        let net_profit_usd = gross_profit_usd - gas_cost_usd;
        if let Some(reported) = self.net_profit_usd {
            if (reported - net_profit_usd).abs() > 0.01 {
                debug!(
                    opportunity = id,
                    reported = reported,
                    computed = net_profit_usd,
                    "Net profit disagrees with gross minus gas"
                );
            }
        }

        Ok(ArbitrageOpportunity {
            id: self.id,
            token_symbol: self.token_symbol,
            source_chain: self.source_chain,
            dest_chain: self.dest_chain,
            source_price,
            dest_price,
            gross_profit_usd,
            gas_cost_usd,
            net_profit_usd,
            profit_percentage,
            expires_at: self.expires_at,
        })
    }
}
