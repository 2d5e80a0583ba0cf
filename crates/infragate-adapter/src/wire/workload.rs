use serde::{Deserialize, Serialize};

use super::{Instance, Timestamps};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workload {
    pub resource_id: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub members: Option<Vec<WorkloadMember>>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadMember {
    pub resource_id: Option<String>,
    pub kind: Option<String>,
    pub workload_id: Option<String>,
    pub instance_id: Option<String>,
    pub instance: Option<Box<Instance>>,
    pub timestamps: Option<Timestamps>,
}
