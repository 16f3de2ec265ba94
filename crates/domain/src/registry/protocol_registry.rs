//! Protocol metadata lookup.

use crate::entities::Protocol;
use std::collections::HashMap;

/// Mapping from protocol id to protocol metadata.
#[derive(Debug, Clone, Default)]
pub struct ProtocolRegistry {
    protocols: HashMap<String, Protocol>,
}

impl ProtocolRegistry {
    /// Builds a registry. Later entries with a repeated id win.
    pub fn new(protocols: impl IntoIterator<Item = Protocol>) -> Self {
        Self {
            protocols: protocols
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Protocol> {
        self.protocols.get(id)
    }

    /// Icon URL of a protocol, or an empty string when unknown.
    #[must_use]
    pub fn icon(&self, id: &str) -> &str {
        self.get(id).map_or("", |p| p.icon_url.as_str())
    }

    /// Display name of a protocol, falling back to its id.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |p| p.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}
