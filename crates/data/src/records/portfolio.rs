//! Position, analytics and yield history records.

use super::{finite, non_negative};
use crate::error::SourceError;
use chrono::{DateTime, Utc};
use omniyield_domain::entities::{AnalyticsSummary, Position, YieldPoint};
use omniyield_domain::value_objects::{ChainId, timestamp};
use serde::{Deserialize, Serialize};

/// Position entry from `/portfolio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: String,
    #[serde(default, alias = "owner")]
    pub user_address: Option<String>,
    pub chain_id: ChainId,
    #[serde(default)]
    pub pool_id: Option<String>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub token0: String,
    #[serde(default)]
    pub token1: String,
    pub deposited_amount_usd: f64,
    pub current_value_usd: f64,
    #[serde(default)]
    pub rewards_earned_usd: f64,
    #[serde(default)]
    pub apy_earned: f64,
    #[serde(with = "timestamp")]
    pub last_compound: DateTime<Utc>,
}

impl PositionRecord {
    /// Validates and converts into a [`Position`].
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRecord`] when either USD amount is negative.
    pub fn into_domain(self) -> Result<Position, SourceError> {
        const KIND: &str = "position";
        let id = self.id.as_str();
        let deposited_amount_usd =
            non_negative(KIND, id, "deposited_amount_usd", self.deposited_amount_usd)?;
        let current_value_usd = non_negative(KIND, id, "current_value_usd", self.current_value_usd)?;
        let rewards_earned_usd = finite(KIND, id, "rewards_earned_usd", self.rewards_earned_usd)?;
        let apy_earned = finite(KIND, id, "apy_earned", self.apy_earned)?;

        let symbol = if self.symbol.is_empty() && !self.token0.is_empty() {
            format!("{}/{}", self.token0, self.token1)
        } else {
            self.symbol
        };

        Ok(Position {
            id: self.id,
            owner: self.user_address,
            chain_id: self.chain_id,
            pool_id: self.pool_id,
            symbol,
            token0: self.token0,
            token1: self.token1,
            deposited_amount_usd,
            current_value_usd,
            rewards_earned_usd,
            apy_earned,
            last_compound: self.last_compound,
        })
    }
}

/// Body of `/analytics/overview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    #[serde(alias = "total_value_locked_usd")]
    pub total_value_locked: f64,
    #[serde(default)]
    pub total_deposited: f64,
    #[serde(default)]
    pub total_rewards_earned: f64,
    #[serde(default)]
    pub total_profit_loss: f64,
    #[serde(default)]
    pub average_apy: f64,
    #[serde(default)]
    pub active_positions: u32,
    #[serde(default)]
    pub chains_count: u32,
    #[serde(default, with = "timestamp::option")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<AnalyticsRecord> for AnalyticsSummary {
    fn from(record: AnalyticsRecord) -> Self {
        Self {
            total_value_locked_usd: record.total_value_locked,
            total_deposited_usd: record.total_deposited,
            total_rewards_earned_usd: record.total_rewards_earned,
            total_profit_loss_usd: record.total_profit_loss,
            average_apy: record.average_apy,
            active_positions: record.active_positions,
            chains_count: record.chains_count,
            last_updated: record.last_updated,
        }
    }
}

/// Entry of `/analytics/yield-history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldPointRecord {
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub total_value: f64,
    #[serde(default)]
    pub daily_yield: f64,
}

impl YieldPointRecord {
    /// Converts into a [`YieldPoint`].
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRecord`] for a negative total value.
    pub fn into_domain(self) -> Result<YieldPoint, SourceError> {
        let id = self.date.to_rfc3339();
        Ok(YieldPoint {
            total_value_usd: non_negative("yield_point", &id, "total_value", self.total_value)?,
            daily_yield_usd: finite("yield_point", &id, "daily_yield", self.daily_yield)?,
            date: self.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_from_backend_shape() {
        let record: PositionRecord = serde_json::from_value(json!({
            "id": "6f1c",
            "user_address": "0x00000000000000000000000000000000000000aa",
            "chain_id": "bsc",
            "pool_id": "pool_3",
            "deposited_amount_usd": 1000.0,
            "current_value_usd": 1200.0,
            "rewards_earned_usd": 200.0,
            "last_compound": "2024-03-01T10:00:00.000000",
            "apy_earned": 12.5
        }))
        .unwrap();
        let position = record.into_domain().unwrap();

        assert_eq!(position.chain_id, ChainId::from("bsc"));
        assert_eq!(position.pool_id.as_deref(), Some("pool_3"));
        assert_eq!(position.profit_loss_usd(), 200.0);
        assert!(position.is_owned_by("0x00000000000000000000000000000000000000AA"));
    }

    #[test]
    fn test_position_rejects_negative_value() {
        let record: PositionRecord = serde_json::from_value(json!({
            "id": "bad",
            "chain_id": "bsc",
            "deposited_amount_usd": 1000.0,
            "current_value_usd": -5.0,
            "last_compound": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert!(record.into_domain().is_err());
    }

    #[test]
    fn test_analytics_conversion() {
        let record: AnalyticsRecord = serde_json::from_value(json!({
            "total_value_locked": 125000.5,
            "total_deposited": 110000.0,
            "total_rewards_earned": 15000.5,
            "total_profit_loss": 15000.5,
            "average_apy": 14.2,
            "active_positions": 8,
            "chains_count": 4,
            "last_updated": "2024-03-01T10:00:00"
        }))
        .unwrap();
        let summary = AnalyticsSummary::from(record);

        assert_eq!(summary.total_value_locked_usd, 125000.5);
        assert_eq!(summary.chains_count, 4);
        assert!(summary.last_updated.is_some());
    }
}
