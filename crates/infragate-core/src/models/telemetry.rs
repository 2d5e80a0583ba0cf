//! Telemetry groups and the profiles that attach them to locations or
//! instances.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::enums::{CollectorKind, SeverityLevel, TelemetryKind};
use super::instance::InstanceResource;
use super::region::RegionResource;
use super::site::SiteResource;

/// A named set of log sources or metric names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryGroupResource {
    pub resource_id: String,
    pub name: String,
    pub kind: TelemetryKind,
    pub collector_kind: CollectorKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl TelemetryGroupResource {
    pub fn stub(resource_id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            resource_id: resource_id.into(),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTarget {
    Instance(Box<InstanceResource>),
    Site(Box<SiteResource>),
    Region(Box<RegionResource>),
}

impl ProfileTarget {
    pub fn resource_id(&self) -> &str {
        match self {
            ProfileTarget::Instance(i) => &i.resource_id,
            ProfileTarget::Site(s) => &s.resource_id,
            ProfileTarget::Region(r) => &r.resource_id,
        }
    }
}

/// Attaches a telemetry group to an instance, site or region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryProfileResource {
    pub resource_id: String,
    pub kind: TelemetryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<ProfileTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Box<TelemetryGroupResource>>,
    /// Collection interval in seconds, metrics profiles only.
    pub metrics_interval: u32,
    /// Minimum severity, logs profiles only.
    pub log_level: SeverityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}
