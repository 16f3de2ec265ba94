//! Domain model for the OmniYield dashboard.
//!
//! This crate holds everything that does not perform I/O:
//! - Entities returned by the backend (chains, pools, positions, arbitrage)
//! - Wallet connection and cross-chain transfer records
//! - Chain, protocol and token logo registries
//! - Derived metrics computed over a snapshot

/// Entity types.
pub mod entities;
/// Enumerations shared across entities.
pub mod enums;
/// Domain errors.
pub mod error;
/// Pure functions deriving dashboard metrics.
pub mod metrics;
/// Read-only lookup tables.
pub mod registry;
/// Small value types used by entities.
pub mod value_objects;

pub use error::{MetricsError, RegistryError};
