use serde::{Deserialize, Serialize};

use super::Timestamps;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Provider {
    pub resource_id: Option<String>,
    pub provider_kind: Option<String>,
    pub provider_vendor: Option<String>,
    pub name: Option<String>,
    pub api_endpoint: Option<String>,
    pub api_credentials: Option<Vec<String>>,
    /// Provider-specific configuration as a JSON document.
    pub config: Option<String>,
    pub timestamps: Option<Timestamps>,
}
