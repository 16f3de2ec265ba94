//! Derived metrics.
//!
//! Pure functions over snapshot data and the wallet connection. None of them
//! perform I/O or mutate their inputs.

pub mod expiry;
pub mod format;
pub mod performance;
pub mod pools;
pub mod risk;

pub use expiry::{ExpiryStatus, expiry_status, minutes_until_expiry, minutes_until_expiry_at};
pub use format::{AddressStyle, format_address, format_usd_compact};
pub use performance::{
    PortfolioTotals, portfolio_totals, position_performance_pct, positions_owned_by,
};
pub use pools::{filter_pools_by_chain, filter_pools_by_protocol, sort_pools, top_pools};
pub use risk::{HIGH_RISK_THRESHOLD, LOW_RISK_THRESHOLD, risk_bucket};
