//! Region domain model.
//!
//! Regions form a tree: a region may have a parent region, and sites are
//! placed inside regions.

use serde::{Deserialize, Serialize};

use super::Timestamps;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionResource {
    pub resource_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_region: Option<Box<RegionResource>>,
    /// JSON-encoded metadata items.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metadata: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl RegionResource {
    pub fn stub(resource_id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            resource_id: resource_id.into(),
            ..Default::default()
        })
    }
}
