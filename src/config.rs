use crate::error::Result;
use crate::share::DEFAULT_SHARE_PARAM;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORAGE_KEY: &str = "pl_dashboard_pro_v2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Key the dataset is persisted under.
    pub storage_key: String,
    /// Directory used by the file store.
    pub storage_dir: String,
    /// Query parameter that carries a share token.
    pub share_param: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: ".".to_string(),
            share_param: DEFAULT_SHARE_PARAM.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
