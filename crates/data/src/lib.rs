//! Backend boundary and snapshot aggregation.
//!
//! This crate provides:
//! - Wire records mirroring the backend JSON and their ingestion into domain types
//! - Source traits for dashboard reads, balance queries and transfer submission
//! - An HTTP backend client implementing those traits
//! - The data aggregator that publishes consistent snapshots

/// Snapshot aggregation.
pub mod aggregator;
/// Backend configuration.
pub mod config;
/// Error types.
pub mod error;
/// HTTP backend client.
pub mod http;
/// Wire records and ingestion.
pub mod records;
/// Source traits.
pub mod sources;

pub use aggregator::{AggregatorConfig, DataAggregator, PublishPolicy, Snapshot, SourceKind};
pub use config::BackendConfig;
pub use error::SourceError;
pub use http::HttpBackend;
pub use records::{StrategyPreferences, StrategyRecommendation};
pub use sources::{BalanceSource, CrossChainGateway, DashboardSource, StrategyAdvisor};
