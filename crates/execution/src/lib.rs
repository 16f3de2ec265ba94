//! Wallet connectivity and cross-chain transfer tracking.
//!
//! This crate provides:
//! - Connector discovery and priority-based selection
//! - The connection state machine driven by wallet provider events
//! - Best-effort native balance refresh for the connected account
//! - Submission and status tracking of cross-chain transfers

/// Prelude module for convenient imports.
pub mod prelude;

/// Error types.
pub mod error;
/// Cross-chain transfer tracking.
pub mod transfer;
/// Wallet connection management.
pub mod wallet;
