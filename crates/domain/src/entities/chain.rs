use crate::value_objects::ChainId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub id: ChainId,
    pub name: String,
    pub native_symbol: String,
    pub icon_url: String,
    pub is_testnet: bool,

    pub explorer_url: Option<String>,
    pub rpc_url: Option<String>,
}

impl Chain {
    pub fn new(
        id: impl Into<ChainId>,
        name: impl Into<String>,
        native_symbol: impl Into<String>,
        icon_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            native_symbol: native_symbol.into(),
            icon_url: icon_url.into(),
            is_testnet: false,
            explorer_url: None,
            rpc_url: None,
        }
    }

    #[must_use]
    pub fn testnet(mut self) -> Self {
        self.is_testnet = true;
        self
    }

    #[must_use]
    pub fn with_explorer(mut self, url: impl Into<String>) -> Self {
        self.explorer_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_rpc(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }
}
