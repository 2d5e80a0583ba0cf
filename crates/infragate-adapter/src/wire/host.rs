use serde::{Deserialize, Serialize};

use super::{Instance, MetadataItem, Site, Timestamps};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Host {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub serial_number: Option<String>,
    pub hostname: Option<String>,
    pub note: Option<String>,
    pub desired_state: Option<String>,
    pub current_state: Option<String>,
    pub desired_power_state: Option<String>,
    pub current_power_state: Option<String>,
    pub host_status: Option<String>,
    pub cpu_cores: Option<i32>,
    pub memory_bytes: Option<u64>,
    pub site_id: Option<String>,
    pub site: Option<Box<Site>>,
    pub instance: Option<Box<Instance>>,
    pub metadata: Option<Vec<MetadataItem>>,
    pub inherited_metadata: Option<Vec<MetadataItem>>,
    pub timestamps: Option<Timestamps>,
}

/// Registration of a host that has not been onboarded yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostRegister {
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub serial_number: Option<String>,
    /// Onboard immediately instead of waiting for an explicit onboard.
    pub auto_onboard: Option<bool>,
}
