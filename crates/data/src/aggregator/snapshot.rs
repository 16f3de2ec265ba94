use super::SourceKind;
use chrono::{DateTime, Utc};
use omniyield_domain::entities::{
    AnalyticsSummary, ArbitrageOpportunity, Chain, NetworkStatus, Pool, Position, Protocol,
    SourceStatus, YieldPoint,
};
use omniyield_domain::registry::{ChainRegistry, ProtocolRegistry};
use std::collections::BTreeSet;

/// Immutable result of one refresh.
///
/// Every slot holds either the fetched value or that source's default; the
/// sources that fell back to a default are listed in `unavailable`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Call-order ticket of the refresh that produced this snapshot.
    pub sequence: u64,
    /// Publication counter. Zero for snapshots that were never published.
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
    pub api_status: SourceStatus,
    pub chain_status: SourceStatus,
    pub analytics: Option<AnalyticsSummary>,
    pub pools: Vec<Pool>,
    pub positions: Vec<Position>,
    pub arbitrage: Vec<ArbitrageOpportunity>,
    pub chains: Vec<Chain>,
    pub protocols: Vec<Protocol>,
    pub yield_history: Vec<YieldPoint>,
    pub zetachain_pools: Vec<Pool>,
    pub network: NetworkStatus,
    pub chain_registry: ChainRegistry,
    pub protocol_registry: ProtocolRegistry,
    pub unavailable: BTreeSet<SourceKind>,
}

impl Snapshot {
    /// Placeholder published before the first refresh completes.
    pub fn empty(chain_registry: ChainRegistry) -> Self {
        let status = SourceStatus::unavailable("not refreshed yet");
        let network = NetworkStatus::derive(&status, &status, chain_registry.ids().cloned());
        Self {
            sequence: 0,
            generation: 0,
            fetched_at: Utc::now(),
            api_status: status.clone(),
            chain_status: status,
            analytics: None,
            pools: Vec::new(),
            positions: Vec::new(),
            arbitrage: Vec::new(),
            chains: Vec::new(),
            protocols: Vec::new(),
            yield_history: Vec::new(),
            zetachain_pools: Vec::new(),
            network,
            chain_registry,
            protocol_registry: ProtocolRegistry::default(),
            unavailable: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_available(&self, kind: SourceKind) -> bool {
        !self.unavailable.contains(&kind)
    }

    /// True when at least one source fell back to its default.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.unavailable.is_empty()
    }
}
