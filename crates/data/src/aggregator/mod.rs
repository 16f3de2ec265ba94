//! Concurrent, failure-tolerant snapshot aggregation.

mod service;
mod snapshot;

pub use service::DataAggregator;
pub use snapshot::Snapshot;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One independent read in the refresh batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    ApiStatus,
    ChainStatus,
    Analytics,
    Pools,
    Positions,
    Arbitrage,
    Chains,
    Protocols,
    YieldHistory,
    ZetachainPools,
    SupportedChains,
}

impl SourceKind {
    /// Every read issued by a refresh, in display order.
    pub const ALL: [SourceKind; 11] = [
        Self::ApiStatus,
        Self::ChainStatus,
        Self::Analytics,
        Self::Pools,
        Self::Positions,
        Self::Arbitrage,
        Self::Chains,
        Self::Protocols,
        Self::YieldHistory,
        Self::ZetachainPools,
        Self::SupportedChains,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiStatus => "api_status",
            Self::ChainStatus => "chain_status",
            Self::Analytics => "analytics",
            Self::Pools => "pools",
            Self::Positions => "positions",
            Self::Arbitrage => "arbitrage",
            Self::Chains => "chains",
            Self::Protocols => "protocols",
            Self::YieldHistory => "yield_history",
            Self::ZetachainPools => "zetachain_pools",
            Self::SupportedChains => "supported_chains",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of two overlapping refreshes ends up published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishPolicy {
    /// A refresh publishes only if no refresh issued after it has already
    /// published. The last call made wins regardless of completion order.
    #[default]
    LatestIssued,
    /// Every completed refresh publishes. The last call to finish wins.
    LatestResolved,
}

/// Aggregator configuration.
#[derive(Debug, Clone, Default)]
pub struct AggregatorConfig {
    pub publish_policy: PublishPolicy,
}

impl AggregatorConfig {
    #[must_use]
    pub fn with_policy(mut self, policy: PublishPolicy) -> Self {
        self.publish_policy = policy;
        self
    }
}
