//! Connector ranking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Preferred connectors, best first. Names are matched exactly.
pub const CONNECTOR_PRIORITY: [&str; 4] = ["MetaMask", "WalletConnect", "Coinbase Wallet", "Injected"];

/// A mechanism for establishing a wallet connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub name: String,
}

impl Connector {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Position in [`CONNECTOR_PRIORITY`], if listed.
    #[must_use]
    pub fn priority(&self) -> Option<usize> {
        CONNECTOR_PRIORITY.iter().position(|name| *name == self.name)
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Picks the highest-priority connector.
///
/// Falls back to the first available connector when none is listed in
/// [`CONNECTOR_PRIORITY`], and returns `None` for an empty list.
pub fn select_best_connector(available: &[Connector]) -> Option<&Connector> {
    available
        .iter()
        .filter_map(|c| c.priority().map(|rank| (rank, c)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, c)| c)
        .or_else(|| available.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<Connector> {
        names
            .iter()
            .map(|name| Connector::new(name.to_lowercase(), *name))
            .collect()
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        assert!(select_best_connector(&[]).is_none());
    }

    #[test]
    fn test_priority_order() {
        let available = named(&["Injected", "WalletConnect"]);
        assert_eq!(select_best_connector(&available).unwrap().name, "WalletConnect");

        let available = named(&["Coinbase Wallet", "Injected", "MetaMask"]);
        assert_eq!(select_best_connector(&available).unwrap().name, "MetaMask");
    }

    #[test]
    fn test_unlisted_connectors_fall_back_to_first() {
        let available = named(&["Rabby", "Frame"]);
        assert_eq!(select_best_connector(&available).unwrap().name, "Rabby");
    }

    #[test]
    fn test_listed_connector_beats_earlier_unlisted() {
        let available = named(&["Rabby", "Injected"]);
        assert_eq!(select_best_connector(&available).unwrap().name, "Injected");
    }
}
