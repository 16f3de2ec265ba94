use crate::value_objects::ChainId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's stake in a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub owner: Option<String>,
    pub chain_id: ChainId,
    pub pool_id: Option<String>,
    pub symbol: String,
    pub token0: String,
    pub token1: String,

    pub deposited_amount_usd: f64,
    pub current_value_usd: f64,
    /// Signed; negative when rewards were clawed back.
    pub rewards_earned_usd: f64,
    pub apy_earned: f64,

    pub last_compound: DateTime<Utc>,
}

impl Position {
    #[must_use]
    pub fn profit_loss_usd(&self) -> f64 {
        self.current_value_usd - self.deposited_amount_usd
    }

    /// Whether this position belongs to `address` (case-insensitive).
    #[must_use]
    pub fn is_owned_by(&self, address: &str) -> bool {
        self.owner
            .as_deref()
            .is_some_and(|owner| owner.eq_ignore_ascii_case(address.trim()))
    }
}
