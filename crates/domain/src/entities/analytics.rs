use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Portfolio-wide summary computed by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_value_locked_usd: f64,
    pub total_deposited_usd: f64,
    pub total_rewards_earned_usd: f64,
    pub total_profit_loss_usd: f64,
    pub average_apy: f64,
    pub active_positions: u32,
    pub chains_count: u32,
    pub last_updated: Option<DateTime<Utc>>,
}

/// One day of portfolio value history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    pub date: DateTime<Utc>,
    pub total_value_usd: f64,
    pub daily_yield_usd: f64,
}
