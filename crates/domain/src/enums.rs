use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk classification shared by pool risk scores and impermanent loss ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parses a risk label case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a cross-chain transfer as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxState {
    Pending,
    Confirmed,
    Failed,
}

impl TxState {
    /// Parses a backend status label. Unknown labels are treated as pending.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "confirmed" | "success" | "completed" => Self::Confirmed,
            "failed" | "error" | "reverted" => Self::Failed,
            _ => Self::Pending,
        }
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// Ordering applied to pool listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoolSort {
    /// Highest APY first.
    #[default]
    Apy,
    /// Highest TVL first.
    Tvl,
    /// Lowest risk score first.
    Risk,
}

impl PoolSort {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "apy" => Some(Self::Apy),
            "tvl" => Some(Self::Tvl),
            "risk" => Some(Self::Risk),
            _ => None,
        }
    }
}
