//! Instance domain model: an operating system deployed on a host.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::enums::{InstanceKind, InstanceState, SecurityFeature};
use super::host::HostResource;
use super::os::OperatingSystemResource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceResource {
    pub resource_id: String,
    pub name: String,
    pub kind: InstanceKind,
    pub desired_state: InstanceState,
    pub current_state: InstanceState,
    pub security_feature: SecurityFeature,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Box<HostResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_os: Option<Box<OperatingSystemResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_os: Option<Box<OperatingSystemResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl InstanceResource {
    pub fn stub(resource_id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            resource_id: resource_id.into(),
            ..Default::default()
        })
    }
}
