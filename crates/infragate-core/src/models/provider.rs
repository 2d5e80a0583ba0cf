//! Infrastructure provider domain model.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::enums::{ProviderKind, ProviderVendor};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderResource {
    pub resource_id: String,
    pub provider_kind: ProviderKind,
    pub provider_vendor: ProviderVendor,
    pub name: String,
    pub api_endpoint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub api_credentials: Vec<String>,
    /// Opaque JSON configuration.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub config: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}
