//! reqwest-backed implementation of the source traits.

use crate::config::BackendConfig;
use crate::error::SourceError;
use crate::records::{
    AnalyticsRecord, ApiStatusRecord, BalanceRecord, ChainStatusRecord, StrategyPreferences,
    StrategyRecommendation, SupportedChainsRecord, TransferBody, TransferStatusRecord,
};
use crate::sources::{BalanceSource, CrossChainGateway, DashboardSource, StrategyAdvisor};
use async_trait::async_trait;
use omniyield_domain::value_objects::ChainId;
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

mod paths {
    pub const STATUS: &str = "/";
    pub const CHAIN_STATUS: &str = "/zetachain/status";
    pub const ANALYTICS: &str = "/analytics/overview";
    pub const YIELD_HISTORY: &str = "/analytics/yield-history";
    pub const POOLS: &str = "/pools";
    pub const PORTFOLIO: &str = "/portfolio";
    pub const ARBITRAGE: &str = "/arbitrage";
    pub const CHAINS: &str = "/chains";
    pub const PROTOCOLS: &str = "/protocols";
    pub const ZETACHAIN_POOLS: &str = "/zetachain/pools";
    pub const SUPPORTED_CHAINS: &str = "/zetachain/supported-chains";
    pub const BALANCE: &str = "/zetachain/balance";
    pub const CROSS_CHAIN_TX: &str = "/zetachain/cross-chain-tx";
    pub const OPTIMIZE: &str = "/strategy/optimize";
}

/// HTTP client for the OmniYield backend.
///
/// The per-request timeout from [`BackendConfig`] is set on the underlying
/// client, so a slow endpoint fails on its own without holding up the others.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: HttpClient,
    api_base: String,
}

impl HttpBackend {
    /// Builds a client from configuration.
    ///
    /// # Errors
    /// Returns [`SourceError::Http`] if the TLS backend cannot be initialised.
    pub fn new(config: &BackendConfig) -> Result<Self, SourceError> {
        let client = HttpClient::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base(),
        })
    }

    /// Full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        debug!(path = path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, SourceError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(path = path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, SourceError> {
        let status = response.status();
        if !status.is_success() {
            warn!(path = path, status = status.as_u16(), "Backend returned an error status");
            return Err(SourceError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DashboardSource for HttpBackend {
    async fn api_status(&self) -> Result<ApiStatusRecord, SourceError> {
        self.get_json(paths::STATUS).await
    }

    async fn chain_status(&self) -> Result<ChainStatusRecord, SourceError> {
        self.get_json(paths::CHAIN_STATUS).await
    }

    async fn analytics(&self) -> Result<AnalyticsRecord, SourceError> {
        self.get_json(paths::ANALYTICS).await
    }

    async fn pools(&self) -> Result<Vec<Value>, SourceError> {
        self.get_json(paths::POOLS).await
    }

    async fn positions(&self) -> Result<Vec<Value>, SourceError> {
        self.get_json(paths::PORTFOLIO).await
    }

    async fn arbitrage(&self) -> Result<Vec<Value>, SourceError> {
        self.get_json(paths::ARBITRAGE).await
    }

    async fn chains(&self) -> Result<Vec<Value>, SourceError> {
        self.get_json(paths::CHAINS).await
    }

    async fn protocols(&self) -> Result<Vec<Value>, SourceError> {
        self.get_json(paths::PROTOCOLS).await
    }

    async fn yield_history(&self) -> Result<Vec<Value>, SourceError> {
        self.get_json(paths::YIELD_HISTORY).await
    }

    async fn zetachain_pools(&self) -> Result<Vec<Value>, SourceError> {
        self.get_json(paths::ZETACHAIN_POOLS).await
    }

    async fn supported_chains(&self) -> Result<SupportedChainsRecord, SourceError> {
        self.get_json(paths::SUPPORTED_CHAINS).await
    }
}

#[async_trait]
impl BalanceSource for HttpBackend {
    async fn native_balance(
        &self,
        address: &str,
        chain_id: Option<&ChainId>,
    ) -> Result<BalanceRecord, SourceError> {
        // The backend resolves the balance on its configured chain.
        debug!(address = address, chain = ?chain_id, "Querying native balance");
        self.get_json(&format!("{}/{}", paths::BALANCE, address)).await
    }
}

#[async_trait]
impl CrossChainGateway for HttpBackend {
    async fn submit(&self, body: &TransferBody) -> Result<TransferStatusRecord, SourceError> {
        self.post_json(paths::CROSS_CHAIN_TX, body).await
    }

    async fn status(&self, tx_hash: &str) -> Result<TransferStatusRecord, SourceError> {
        self.get_json(&format!("{}/{}", paths::CROSS_CHAIN_TX, tx_hash))
            .await
    }
}

#[async_trait]
impl StrategyAdvisor for HttpBackend {
    async fn optimize_strategy(
        &self,
        preferences: &StrategyPreferences,
    ) -> Result<StrategyRecommendation, SourceError> {
        self.post_json(paths::OPTIMIZE, preferences).await
    }
}
