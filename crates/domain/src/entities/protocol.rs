use crate::value_objects::ChainId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    pub id: String,
    pub name: String,
    pub icon_url: String,

    pub category: Option<String>,
    pub tvl_usd: Option<f64>,
    pub chains: Vec<ChainId>,
}
