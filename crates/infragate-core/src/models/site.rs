//! Site domain model.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::region::RegionResource;

/// A physical location that hosts are deployed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteResource {
    pub resource_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Box<RegionResource>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Latitude in degrees multiplied by 10^7.
    pub site_lat: i32,
    /// Longitude in degrees multiplied by 10^7.
    pub site_lng: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metadata: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl SiteResource {
    pub fn stub(resource_id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            resource_id: resource_id.into(),
            ..Default::default()
        })
    }
}
