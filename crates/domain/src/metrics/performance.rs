use crate::entities::Position;
use crate::error::MetricsError;
use std::collections::HashSet;

/// Percentage gain of a position: `(current / deposited - 1) * 100`.
///
/// # Errors
/// Returns [`MetricsError::DivisionUndefined`] when nothing was deposited.
/// Callers substitute 0% or omit the metric.
pub fn position_performance_pct(position: &Position) -> Result<f64, MetricsError> {
    if position.deposited_amount_usd == 0.0 {
        return Err(MetricsError::DivisionUndefined {
            metric: "position performance",
        });
    }
    Ok((position.current_value_usd / position.deposited_amount_usd - 1.0) * 100.0)
}

/// Positions owned by the connected wallet.
pub fn positions_owned_by<'a>(positions: &'a [Position], address: &str) -> Vec<&'a Position> {
    positions.iter().filter(|p| p.is_owned_by(address)).collect()
}

/// Aggregate figures over a set of positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioTotals {
    pub positions: usize,
    pub deposited_usd: f64,
    pub current_value_usd: f64,
    pub rewards_earned_usd: f64,
    pub profit_loss_usd: f64,
    pub average_apy: f64,
    pub chains_count: usize,
}

impl PortfolioTotals {
    /// Overall performance percentage, undefined for an empty deposit base.
    ///
    /// # Errors
    /// Returns [`MetricsError::DivisionUndefined`] when nothing was deposited.
    pub fn performance_pct(&self) -> Result<f64, MetricsError> {
        if self.deposited_usd == 0.0 {
            return Err(MetricsError::DivisionUndefined {
                metric: "portfolio performance",
            });
        }
        Ok((self.current_value_usd / self.deposited_usd - 1.0) * 100.0)
    }
}

/// Sums a set of positions. The average APY of an empty set is zero.
pub fn portfolio_totals<'a>(positions: impl IntoIterator<Item = &'a Position>) -> PortfolioTotals {
    let mut totals = PortfolioTotals::default();
    let mut chains = HashSet::new();
    let mut apy_sum = 0.0;

    for position in positions {
        totals.positions += 1;
        totals.deposited_usd += position.deposited_amount_usd;
        totals.current_value_usd += position.current_value_usd;
        totals.rewards_earned_usd += position.rewards_earned_usd;
        apy_sum += position.apy_earned;
        chains.insert(position.chain_id.clone());
    }

    totals.profit_loss_usd = totals.current_value_usd - totals.deposited_usd;
    totals.chains_count = chains.len();
    if totals.positions > 0 {
        totals.average_apy = apy_sum / totals.positions as f64;
    }
    totals
}
