//! Cross-chain transfer tracking.
//!
//! Transfers are validated locally, submitted once, and kept in a bounded
//! newest-first history. Status changes are only observed through an explicit
//! [`CrossChainTxTracker::refresh_status`] call.

mod tracker;

pub use tracker::*;
