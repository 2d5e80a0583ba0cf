//! Workload domain models.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::enums::{WorkloadKind, WorkloadMemberKind};
use super::instance::InstanceResource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadResource {
    pub resource_id: String,
    pub kind: WorkloadKind,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub external_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Reverse edge: members of this workload, filled on reads.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<WorkloadMemberResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl WorkloadResource {
    pub fn stub(resource_id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            resource_id: resource_id.into(),
            ..Default::default()
        })
    }
}

/// Membership of an instance in a workload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadMemberResource {
    pub resource_id: String,
    pub kind: WorkloadMemberKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<Box<WorkloadResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<Box<InstanceResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}
