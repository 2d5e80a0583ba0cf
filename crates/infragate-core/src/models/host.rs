//! Host domain model.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::enums::{HostState, PowerState};
use super::instance::InstanceResource;
use super::site::SiteResource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostResource {
    pub resource_id: String,
    pub name: String,
    /// SMBIOS UUID, lowercase hyphenated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub serial_number: String,
    /// Hostname reported by the host agent.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    pub desired_state: HostState,
    pub current_state: HostState,
    pub desired_power_state: PowerState,
    pub current_power_state: PowerState,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host_status: String,
    pub cpu_cores: u32,
    pub memory_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Box<SiteResource>>,
    /// Reverse edge: the instance running on this host, filled on reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<Box<InstanceResource>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metadata: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl HostResource {
    pub fn stub(resource_id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            resource_id: resource_id.into(),
            ..Default::default()
        })
    }
}
