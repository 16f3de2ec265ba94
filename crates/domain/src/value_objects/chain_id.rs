//! Chain identifiers.
//!
//! Wallet networks are identified by EVM numeric ids (`7001`, `137`) while the
//! backend's chain registry uses symbolic ids (`"polygon"`). Both are carried
//! as a normalised string so they can share one key space.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a blockchain network, numeric or symbolic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainId(String);

impl ChainId {
    /// Creates a chain id from any string-like value. Surrounding whitespace is removed.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric EVM chain id if this id is numeric.
    #[must_use]
    pub fn as_numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ChainId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChainId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            // Some encoders emit integral ids as `7001.0`.
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::from(n)),
            Raw::Float(n) if n >= 0.0 && n.fract() == 0.0 && n < u64::MAX as f64 => {
                Ok(Self::from(n as u64))
            }
            Raw::Float(n) => Err(D::Error::custom(format!(
                "chain id must be a non-negative integer, got {n}"
            ))),
            Raw::Text(s) => Ok(Self::new(s)),
        }
    }
}

/// Chain selection applied to pool listings. `All` bypasses filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainFilter {
    #[default]
    All,
    Chain(ChainId),
}

impl ChainFilter {
    /// Parses a selector, treating `"all"` (any case) as the sentinel.
    pub fn parse(selector: &str) -> Self {
        if selector.trim().eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Chain(ChainId::new(selector))
        }
    }

    #[must_use]
    pub fn matches(&self, chain_id: &ChainId) -> bool {
        match self {
            Self::All => true,
            Self::Chain(id) => id == chain_id,
        }
    }
}

impl From<&str> for ChainFilter {
    fn from(selector: &str) -> Self {
        Self::parse(selector)
    }
}
