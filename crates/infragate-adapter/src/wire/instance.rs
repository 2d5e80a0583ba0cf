use serde::{Deserialize, Serialize};

use super::{Host, Timestamps};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instance {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub desired_state: Option<String>,
    pub current_state: Option<String>,
    pub security_feature: Option<String>,
    pub instance_status: Option<String>,
    pub host_id: Option<String>,
    pub host: Option<Box<Host>>,
    /// Desired operating system.
    pub os_id: Option<String>,
    pub desired_os: Option<Box<OperatingSystem>>,
    pub current_os_id: Option<String>,
    pub current_os: Option<Box<OperatingSystem>>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingSystem {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub architecture: Option<String>,
    pub kernel_command: Option<String>,
    pub update_sources: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub image_id: Option<String>,
    pub sha256: Option<String>,
    pub profile_name: Option<String>,
    pub profile_version: Option<String>,
    pub installed_packages: Option<String>,
    pub security_feature: Option<String>,
    pub os_type: Option<String>,
    pub os_provider: Option<String>,
    pub timestamps: Option<Timestamps>,
}
