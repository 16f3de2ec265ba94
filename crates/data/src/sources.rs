//! Boundary traits between the aggregation layer and the backend.
//!
//! Every method is a single independent call. Implementations must not retry:
//! the aggregator turns a failure into that read's default value.
//!
//! Collection reads return the raw JSON elements. Each element is decoded and
//! validated on its own during ingestion, so one malformed record only drops
//! itself.

use crate::error::SourceError;
use crate::records::{
    AnalyticsRecord, ApiStatusRecord, BalanceRecord, ChainStatusRecord, StrategyPreferences,
    StrategyRecommendation, SupportedChainsRecord, TransferBody, TransferStatusRecord,
};
use async_trait::async_trait;
use omniyield_domain::value_objects::ChainId;
use serde_json::Value;

/// Read endpoints feeding a dashboard snapshot.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Backend liveness and database connectivity.
    async fn api_status(&self) -> Result<ApiStatusRecord, SourceError>;

    /// Connectivity of the chain the backend relays to.
    async fn chain_status(&self) -> Result<ChainStatusRecord, SourceError>;

    async fn analytics(&self) -> Result<AnalyticsRecord, SourceError>;

    /// Raw `PoolRecord` elements.
    async fn pools(&self) -> Result<Vec<Value>, SourceError>;

    async fn positions(&self) -> Result<Vec<Value>, SourceError>;

    async fn arbitrage(&self) -> Result<Vec<Value>, SourceError>;

    async fn chains(&self) -> Result<Vec<Value>, SourceError>;

    async fn protocols(&self) -> Result<Vec<Value>, SourceError>;

    async fn yield_history(&self) -> Result<Vec<Value>, SourceError>;

    /// Pools specific to the ZetaChain deployment, in `PoolRecord` shape.
    async fn zetachain_pools(&self) -> Result<Vec<Value>, SourceError>;

    async fn supported_chains(&self) -> Result<SupportedChainsRecord, SourceError>;
}

/// Native balance lookup for a wallet address.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn native_balance(
        &self,
        address: &str,
        chain_id: Option<&ChainId>,
    ) -> Result<BalanceRecord, SourceError>;
}

/// Cross-chain transfer submission and status lookup.
#[async_trait]
pub trait CrossChainGateway: Send + Sync {
    async fn submit(&self, body: &TransferBody) -> Result<TransferStatusRecord, SourceError>;

    async fn status(&self, tx_hash: &str) -> Result<TransferStatusRecord, SourceError>;
}

/// Backend-side strategy optimiser.
#[async_trait]
pub trait StrategyAdvisor: Send + Sync {
    async fn optimize_strategy(
        &self,
        preferences: &StrategyPreferences,
    ) -> Result<StrategyRecommendation, SourceError>;
}
