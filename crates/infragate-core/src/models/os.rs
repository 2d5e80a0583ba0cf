//! Operating system image domain model.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::enums::{OsProviderKind, OsType, SecurityFeature};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingSystemResource {
    pub resource_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub architecture: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kernel_command: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update_sources: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_id: String,
    /// Lowercase hex SHA-256 of the image.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sha256: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub installed_packages: String,
    pub security_feature: SecurityFeature,
    pub os_type: OsType,
    pub os_provider: OsProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl OperatingSystemResource {
    pub fn stub(resource_id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            resource_id: resource_id.into(),
            ..Default::default()
        })
    }
}
