//! Chain, protocol and pool records.

use super::{finite, non_negative};
use crate::error::SourceError;
use omniyield_domain::entities::{Chain, Pool, Protocol};
use omniyield_domain::enums::RiskLevel;
use omniyield_domain::metrics::risk_bucket;
use omniyield_domain::registry::icon_url_for;
use omniyield_domain::value_objects::ChainId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound of the risk score scale.
const MAX_RISK_SCORE: f64 = 10.0;

/// Chain entry from `/chains`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRecord {
    pub id: ChainId,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub native_token: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub explorer_url: Option<String>,
    #[serde(default, alias = "is_testnet")]
    pub testnet: bool,
}

impl ChainRecord {
    /// Validates and converts into a [`Chain`].
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRecord`] when the id or name is empty.
    pub fn into_domain(self) -> Result<Chain, SourceError> {
        if self.id.is_empty() {
            return Err(SourceError::invalid("chain", "", "empty id"));
        }
        if self.name.trim().is_empty() {
            return Err(SourceError::invalid("chain", self.id.as_str(), "empty name"));
        }

        let native_symbol = self
            .native_token
            .or(self.symbol)
            .unwrap_or_default();
        let icon_url = match self.logo {
            Some(logo) if !logo.trim().is_empty() => logo,
            _ => icon_url_for(&native_symbol),
        };

        Ok(Chain {
            id: self.id,
            name: self.name,
            native_symbol,
            icon_url,
            is_testnet: self.testnet,
            explorer_url: self.explorer_url,
            rpc_url: self.rpc_url,
        })
    }
}

/// Protocol entry from `/protocols`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tvl_usd: Option<f64>,
    #[serde(default)]
    pub chains: Vec<ChainId>,
}

impl ProtocolRecord {
    /// Validates and converts into a [`Protocol`].
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRecord`] for an empty id or a negative TVL.
    pub fn into_domain(self) -> Result<Protocol, SourceError> {
        if self.id.trim().is_empty() {
            return Err(SourceError::invalid("protocol", "", "empty id"));
        }
        let tvl_usd = self
            .tvl_usd
            .map(|tvl| non_negative("protocol", &self.id, "tvl_usd", tvl))
            .transpose()?;

        Ok(Protocol {
            name: if self.name.trim().is_empty() {
                self.id.clone()
            } else {
                self.name
            },
            icon_url: self.logo.unwrap_or_default(),
            id: self.id,
            category: self.category,
            tvl_usd,
            chains: self.chains,
        })
    }
}

/// Pool entry from `/pools` and `/zetachain/pools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRecord {
    pub id: String,
    pub protocol_id: String,
    pub chain_id: ChainId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub token0: String,
    pub token1: String,
    pub apy: f64,
    #[serde(default)]
    pub apy_7d: Option<f64>,
    #[serde(default)]
    pub apy_30d: Option<f64>,
    pub tvl_usd: f64,
    #[serde(default)]
    pub daily_volume_usd: f64,
    pub risk_score: f64,
    #[serde(default)]
    pub il_risk: Option<String>,
    #[serde(default)]
    pub auto_compound: bool,
    #[serde(default, alias = "reward_tokens")]
    pub rewards_tokens: Vec<String>,
}

impl PoolRecord {
    /// Validates and converts into a [`Pool`].
    ///
    /// The risk score is clamped into `[0, 10]`. An unrecognised impermanent loss
    /// label is replaced by the bucket of the risk score.
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRecord`] for an empty id, negative amounts or
    /// a non-finite risk score.
    pub fn into_domain(self) -> Result<Pool, SourceError> {
        const KIND: &str = "pool";
        if self.id.trim().is_empty() {
            return Err(SourceError::invalid(KIND, "", "empty id"));
        }
        let id = self.id.as_str();

        let apy = non_negative(KIND, id, "apy", self.apy)?;
        let tvl_usd = non_negative(KIND, id, "tvl_usd", self.tvl_usd)?;
        let daily_volume_usd = non_negative(KIND, id, "daily_volume_usd", self.daily_volume_usd)?;
        let apy_7d = self
            .apy_7d
            .map(|v| non_negative(KIND, id, "apy_7d", v))
            .transpose()?;
        let apy_30d = self
            .apy_30d
            .map(|v| non_negative(KIND, id, "apy_30d", v))
            .transpose()?;

        let raw_score = finite(KIND, id, "risk_score", self.risk_score)?;
        let risk_score = raw_score.clamp(0.0, MAX_RISK_SCORE);
        if risk_score != raw_score {
            debug!(pool = id, raw = raw_score, "Clamped risk score");
        }

        let il_risk = self
            .il_risk
            .as_deref()
            .and_then(RiskLevel::parse)
            .unwrap_or_else(|| risk_bucket(risk_score));

        let symbol = if self.symbol.trim().is_empty() {
            format!("{}/{}", self.token0, self.token1)
        } else {
            self.symbol
        };

        Ok(Pool {
            id: self.id,
            chain_id: self.chain_id,
            protocol_id: self.protocol_id,
            name: self.name,
            symbol,
            token0: self.token0,
            token1: self.token1,
            apy,
            apy_7d,
            apy_30d,
            tvl_usd,
            daily_volume_usd,
            risk_score,
            il_risk,
            auto_compound: self.auto_compound,
            reward_tokens: self.rewards_tokens,
        })
    }
}
