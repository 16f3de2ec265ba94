use super::{AggregatorConfig, PublishPolicy, Snapshot, SourceKind};
use crate::error::SourceError;
use crate::records::{
    ArbitrageRecord, ChainRecord, PoolRecord, PositionRecord, ProtocolRecord, YieldPointRecord,
    decode_record, ingest_all,
};
use crate::sources::DashboardSource;
use chrono::Utc;
use omniyield_domain::entities::{AnalyticsSummary, NetworkStatus, SourceStatus};
use omniyield_domain::registry::{ChainRegistry, ProtocolRegistry};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Fans out the dashboard reads, joins them and publishes one snapshot.
///
/// `refresh` never fails as a whole: a failed read contributes its default
/// value and is listed in [`Snapshot::unavailable`]. Consumers read the
/// current snapshot through [`DataAggregator::snapshot`] and always see a
/// complete one.
pub struct DataAggregator {
    source: Arc<dyn DashboardSource>,
    config: AggregatorConfig,
    base_registry: ChainRegistry,
    next_sequence: AtomicU64,
    current: RwLock<Arc<Snapshot>>,
}

impl DataAggregator {
    /// Creates an aggregator seeded with the built-in chain registry.
    pub fn new(source: Arc<dyn DashboardSource>, config: AggregatorConfig) -> Self {
        Self::with_chain_registry(source, config, ChainRegistry::builtin())
    }

    /// Creates an aggregator whose fetched chains are layered over `registry`.
    pub fn with_chain_registry(
        source: Arc<dyn DashboardSource>,
        config: AggregatorConfig,
        registry: ChainRegistry,
    ) -> Self {
        let initial = Arc::new(Snapshot::empty(registry.clone()));
        Self {
            source,
            config,
            base_registry: registry,
            next_sequence: AtomicU64::new(0),
            current: RwLock::new(initial),
        }
    }

    /// The currently published snapshot.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// Runs one batch of reads and returns the snapshot it produced.
    ///
    /// Whether that snapshot also replaces the published one depends on
    /// [`PublishPolicy`].
    pub async fn refresh(&self) -> Arc<Snapshot> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(sequence = sequence, "Refresh started");

        let snapshot = self.collect(sequence).await;
        self.publish(snapshot).await
    }

    async fn collect(&self, sequence: u64) -> Snapshot {
        let source = self.source.as_ref();
        let (
            api_status,
            chain_status,
            analytics,
            pools,
            positions,
            arbitrage,
            chains,
            protocols,
            yield_history,
            zetachain_pools,
            supported_chains,
        ) = tokio::join!(
            read(SourceKind::ApiStatus, source.api_status()),
            read(SourceKind::ChainStatus, source.chain_status()),
            read(SourceKind::Analytics, source.analytics()),
            read(SourceKind::Pools, source.pools()),
            read(SourceKind::Positions, source.positions()),
            read(SourceKind::Arbitrage, source.arbitrage()),
            read(SourceKind::Chains, source.chains()),
            read(SourceKind::Protocols, source.protocols()),
            read(SourceKind::YieldHistory, source.yield_history()),
            read(SourceKind::ZetachainPools, source.zetachain_pools()),
            read(SourceKind::SupportedChains, source.supported_chains()),
        );

        let mut unavailable = BTreeSet::new();

        let api_status = status_or_default(SourceKind::ApiStatus, api_status, &mut unavailable);
        let chain_status =
            status_or_default(SourceKind::ChainStatus, chain_status, &mut unavailable);

        let analytics = match analytics {
            Ok(record) => Some(AnalyticsSummary::from(record)),
            Err(_) => {
                unavailable.insert(SourceKind::Analytics);
                None
            }
        };

        let pools = collection(SourceKind::Pools, pools, PoolRecord::into_domain, &mut unavailable);
        let positions = collection(
            SourceKind::Positions,
            positions,
            PositionRecord::into_domain,
            &mut unavailable,
        );
        let arbitrage = collection(
            SourceKind::Arbitrage,
            arbitrage,
            ArbitrageRecord::into_domain,
            &mut unavailable,
        );
        let chains = collection(SourceKind::Chains, chains, ChainRecord::into_domain, &mut unavailable);
        let protocols = collection(
            SourceKind::Protocols,
            protocols,
            ProtocolRecord::into_domain,
            &mut unavailable,
        );
        let yield_history = collection(
            SourceKind::YieldHistory,
            yield_history,
            YieldPointRecord::into_domain,
            &mut unavailable,
        );
        let zetachain_pools = collection(
            SourceKind::ZetachainPools,
            zetachain_pools,
            PoolRecord::into_domain,
            &mut unavailable,
        );

        let chain_registry = self.base_registry.merged_with(&chains);
        let protocol_registry = ProtocolRegistry::new(protocols.iter().cloned());

        let supported_ids = match supported_chains {
            Ok(record) => record.into_ids(),
            Err(_) => {
                unavailable.insert(SourceKind::SupportedChains);
                chain_registry.ids().cloned().collect()
            }
        };
        let network = NetworkStatus::derive(&api_status, &chain_status, supported_ids);

        Snapshot {
            sequence,
            generation: 0,
            fetched_at: Utc::now(),
            api_status,
            chain_status,
            analytics,
            pools,
            positions,
            arbitrage,
            chains,
            protocols,
            yield_history,
            zetachain_pools,
            network,
            chain_registry,
            protocol_registry,
            unavailable,
        }
    }

    async fn publish(&self, mut snapshot: Snapshot) -> Arc<Snapshot> {
        let mut current = self.current.write().await;

        let accept = match self.config.publish_policy {
            PublishPolicy::LatestIssued => snapshot.sequence > current.sequence,
            PublishPolicy::LatestResolved => true,
        };

        if !accept {
            debug!(
                sequence = snapshot.sequence,
                published = current.sequence,
                "Discarding snapshot superseded by a later refresh"
            );
            return Arc::new(snapshot);
        }

        snapshot.generation = current.generation + 1;
        let snapshot = Arc::new(snapshot);
        *current = Arc::clone(&snapshot);

        info!(
            sequence = snapshot.sequence,
            generation = snapshot.generation,
            pools = snapshot.pools.len(),
            positions = snapshot.positions.len(),
            unavailable = snapshot.unavailable.len(),
            "Snapshot published"
        );
        snapshot
    }
}

async fn read<T>(
    kind: SourceKind,
    call: impl Future<Output = Result<T, SourceError>>,
) -> Result<T, SourceError> {
    let result = call.await;
    if let Err(e) = &result {
        warn!(source = %kind, error = %e, "Source unavailable, using default");
    }
    result
}

fn status_or_default<R: Into<SourceStatus>>(
    kind: SourceKind,
    result: Result<R, SourceError>,
    unavailable: &mut BTreeSet<SourceKind>,
) -> SourceStatus {
    match result {
        Ok(record) => record.into(),
        Err(e) => {
            unavailable.insert(kind);
            SourceStatus::unavailable(e.to_string())
        }
    }
}

/// Decodes and validates each raw element on its own.
fn collection<R: DeserializeOwned, T>(
    kind: SourceKind,
    result: Result<Vec<Value>, SourceError>,
    convert: impl Fn(R) -> Result<T, SourceError>,
    unavailable: &mut BTreeSet<SourceKind>,
) -> Vec<T> {
    match result {
        Ok(values) => ingest_all(kind.as_str(), values, |value| {
            decode_record::<R>(kind.as_str(), value).and_then(&convert)
        }),
        Err(_) => {
            unavailable.insert(kind);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        AnalyticsRecord, ApiStatusRecord, ChainStatusRecord, SupportedChainsRecord,
    };
    use async_trait::async_trait;
    use omniyield_domain::value_objects::ChainId;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    fn pool(id: &str, chain: &str) -> Value {
        json!({
            "id": id,
            "chain_id": chain,
            "protocol_id": "aave",
            "token0": "USDC",
            "token1": "USDT",
            "apy": 8.0,
            "tvl_usd": 1000000.0,
            "daily_volume_usd": 50000.0,
            "risk_score": 2.0,
            "il_risk": "Low"
        })
    }

    #[derive(Default)]
    struct FakeSource {
        failing: BTreeSet<SourceKind>,
        delayed_pools: Mutex<VecDeque<(Duration, Vec<Value>)>>,
    }

    impl FakeSource {
        fn failing(kinds: &[SourceKind]) -> Self {
            Self {
                failing: kinds.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn with_pool_responses(responses: Vec<(Duration, Vec<Value>)>) -> Self {
            Self {
                delayed_pools: Mutex::new(responses.into()),
                ..Self::default()
            }
        }

        fn check(&self, kind: SourceKind) -> Result<(), SourceError> {
            if self.failing.contains(&kind) {
                Err(SourceError::Unavailable(format!("{kind} is down")))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl DashboardSource for FakeSource {
        async fn api_status(&self) -> Result<ApiStatusRecord, SourceError> {
            self.check(SourceKind::ApiStatus)?;
            Ok(ApiStatusRecord {
                message: Some("OmniYield API".to_string()),
                version: Some("1.0.0".to_string()),
                database_connected: Some(true),
                error: None,
            })
        }

        async fn chain_status(&self) -> Result<ChainStatusRecord, SourceError> {
            self.check(SourceKind::ChainStatus)?;
            Ok(ChainStatusRecord {
                connected: Some(true),
                chain_id: Some(ChainId::from(7001u64)),
                block_number: Some(1_234_567),
                gas_price_gwei: Some(10.0),
                error: None,
            })
        }

        async fn analytics(&self) -> Result<AnalyticsRecord, SourceError> {
            self.check(SourceKind::Analytics)?;
            Ok(serde_json::from_value(json!({
                "total_value_locked": 5000.0,
                "average_apy": 9.5,
                "chains_count": 2
            }))
            .unwrap())
        }

        async fn pools(&self) -> Result<Vec<Value>, SourceError> {
            let next = self.delayed_pools.lock().unwrap().pop_front();
            if let Some((delay, pools)) = next {
                tokio::time::sleep(delay).await;
                return Ok(pools);
            }
            self.check(SourceKind::Pools)?;
            Ok(vec![pool("p1", "polygon"), pool("p2", "bsc")])
        }

        async fn positions(&self) -> Result<Vec<Value>, SourceError> {
            self.check(SourceKind::Positions)?;
            Ok(Vec::new())
        }

        async fn arbitrage(&self) -> Result<Vec<Value>, SourceError> {
            self.check(SourceKind::Arbitrage)?;
            Ok(Vec::new())
        }

        async fn chains(&self) -> Result<Vec<Value>, SourceError> {
            self.check(SourceKind::Chains)?;
            Ok(vec![json!({
                "id": "polygon",
                "name": "Polygon PoS",
                "symbol": "MATIC"
            })])
        }

        async fn protocols(&self) -> Result<Vec<Value>, SourceError> {
            self.check(SourceKind::Protocols)?;
            Ok(vec![json!({ "id": "aave", "name": "Aave" })])
        }

        async fn yield_history(&self) -> Result<Vec<Value>, SourceError> {
            self.check(SourceKind::YieldHistory)?;
            Ok(Vec::new())
        }

        async fn zetachain_pools(&self) -> Result<Vec<Value>, SourceError> {
            self.check(SourceKind::ZetachainPools)?;
            Ok(vec![pool("z1", "7001")])
        }

        async fn supported_chains(&self) -> Result<SupportedChainsRecord, SourceError> {
            self.check(SourceKind::SupportedChains)?;
            Ok(SupportedChainsRecord::Ids(vec![
                ChainId::from(7001u64),
                ChainId::from(1u64),
            ]))
        }
    }

    fn aggregator(source: FakeSource, policy: PublishPolicy) -> DataAggregator {
        DataAggregator::new(
            Arc::new(source),
            AggregatorConfig::default().with_policy(policy),
        )
    }

    #[tokio::test]
    async fn test_refresh_all_sources_healthy() {
        let agg = aggregator(FakeSource::default(), PublishPolicy::LatestIssued);
        let snapshot = agg.refresh().await;

        assert!(!snapshot.is_degraded());
        assert_eq!(snapshot.pools.len(), 2);
        assert_eq!(snapshot.zetachain_pools.len(), 1);
        assert!(snapshot.network.backend_reachable);
        assert!(snapshot.network.chain_backend_connected);
        assert!(snapshot.network.database_connected);
        assert!(snapshot.network.supports(&ChainId::from(7001u64)));
        assert_eq!(
            snapshot.chain_registry.display_name(&ChainId::from("polygon")),
            "Polygon PoS"
        );
        assert_eq!(snapshot.protocol_registry.display_name("aave"), "Aave");
        assert_eq!(snapshot.generation, 1);
    }

    #[tokio::test]
    async fn test_failed_sources_default_without_affecting_others() {
        let source = FakeSource::failing(&[
            SourceKind::ApiStatus,
            SourceKind::Pools,
            SourceKind::Analytics,
            SourceKind::SupportedChains,
        ]);
        let agg = aggregator(source, PublishPolicy::LatestIssued);
        let snapshot = agg.refresh().await;

        assert!(snapshot.pools.is_empty());
        assert!(snapshot.analytics.is_none());
        assert!(snapshot.api_status.error.is_some());
        assert!(!snapshot.network.backend_reachable);
        assert!(!snapshot.is_available(SourceKind::Pools));
        assert!(snapshot.is_available(SourceKind::ZetachainPools));
        assert_eq!(snapshot.zetachain_pools.len(), 1);
        assert_eq!(snapshot.protocols.len(), 1);
        assert_eq!(snapshot.unavailable.len(), 4);

        // Falls back to the registry's ids.
        assert!(snapshot.network.supports(&ChainId::from(137u64)));
        assert!(snapshot.network.supports(&ChainId::from("polygon")));
    }

    #[tokio::test]
    async fn test_every_source_failing_still_publishes() {
        let agg = aggregator(FakeSource::failing(&SourceKind::ALL), PublishPolicy::LatestIssued);
        let snapshot = agg.refresh().await;

        assert_eq!(snapshot.unavailable.len(), SourceKind::ALL.len());
        assert_eq!(agg.snapshot().await.generation, 1);
    }

    #[tokio::test]
    async fn test_snapshot_before_first_refresh_is_empty() {
        let agg = aggregator(FakeSource::default(), PublishPolicy::LatestIssued);
        let snapshot = agg.snapshot().await;

        assert_eq!(snapshot.generation, 0);
        assert!(snapshot.pools.is_empty());
        assert_eq!(snapshot.chain_registry.len(), ChainRegistry::builtin().len());
    }

    #[tokio::test]
    async fn test_malformed_record_only_drops_itself() {
        let mut malformed = pool("broken", "bsc");
        malformed["apy"] = Value::Null;
        let source = FakeSource::with_pool_responses(vec![(
            Duration::ZERO,
            vec![pool("good", "polygon"), malformed, json!("not an object")],
        )]);
        let agg = aggregator(source, PublishPolicy::LatestIssued);
        let snapshot = agg.refresh().await;

        assert_eq!(snapshot.pools.len(), 1);
        assert_eq!(snapshot.pools[0].id, "good");
        assert!(snapshot.is_available(SourceKind::Pools));
        assert!(!snapshot.is_degraded());
    }

    fn overlapping_source() -> FakeSource {
        FakeSource::with_pool_responses(vec![
            (Duration::from_millis(80), vec![pool("first", "bsc")]),
            (Duration::from_millis(5), vec![pool("second", "bsc")]),
        ])
    }

    #[tokio::test]
    async fn test_overlapping_refresh_latest_issued_wins() {
        let agg = aggregator(overlapping_source(), PublishPolicy::LatestIssued);

        let (first, second) = tokio::join!(agg.refresh(), agg.refresh());

        assert_eq!(first.pools[0].id, "first");
        assert_eq!(second.pools[0].id, "second");
        assert_eq!(first.generation, 0);

        let published = agg.snapshot().await;
        assert_eq!(published.pools[0].id, "second");
        assert_eq!(published.sequence, 2);
        assert_eq!(published.generation, 1);
    }

    #[tokio::test]
    async fn test_overlapping_refresh_latest_resolved_wins() {
        let agg = aggregator(overlapping_source(), PublishPolicy::LatestResolved);

        let (first, second) = tokio::join!(agg.refresh(), agg.refresh());
        assert_eq!(second.generation, 1);
        assert_eq!(first.generation, 2);

        let published = agg.snapshot().await;
        assert_eq!(published.pools[0].id, "first");
    }
}
