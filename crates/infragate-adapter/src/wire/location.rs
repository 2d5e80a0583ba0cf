use serde::{Deserialize, Serialize};

use super::{MetadataItem, Timestamps};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Site {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub region_id: Option<String>,
    pub region: Option<Box<Region>>,
    pub address: Option<String>,
    /// Latitude in 1e-7 degrees.
    pub site_lat: Option<i32>,
    /// Longitude in 1e-7 degrees.
    pub site_lng: Option<i32>,
    pub dns_servers: Option<Vec<String>>,
    pub metadata: Option<Vec<MetadataItem>>,
    pub inherited_metadata: Option<Vec<MetadataItem>>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Region {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub parent_id: Option<String>,
    pub parent_region: Option<Box<Region>>,
    pub metadata: Option<Vec<MetadataItem>>,
    pub inherited_metadata: Option<Vec<MetadataItem>>,
    /// Sites directly inside the region; only filled by lists that ask
    /// for it.
    pub total_sites: Option<i32>,
    pub timestamps: Option<Timestamps>,
}

/// Parameters of the location hierarchy query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationsQuery {
    /// Substring matched against region and site names. Required.
    pub name: Option<String>,
    pub show_regions: Option<bool>,
    pub show_sites: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    #[serde(rename = "RESOURCE_KIND_REGION")]
    Region,
    #[serde(rename = "RESOURCE_KIND_SITE")]
    Site,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationNode {
    pub resource_id: String,
    pub name: String,
    /// Nearest region or site above this node; empty for roots.
    pub parent_id: String,
    #[serde(rename = "type")]
    pub node_type: LocationType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsResponse {
    pub nodes: Vec<LocationNode>,
    /// Matches across both kinds, before per-kind result caps.
    pub total_elements: i32,
    /// Matched ids actually returned.
    pub output_elements: i32,
}
