//! The public wire schema.
//!
//! Wire records are flat and mostly optional so that an omitted field is
//! distinguishable from a field present with its zero value. Enum-valued
//! fields are carried as strings; conversion rejects unknown values.

pub mod host;
pub mod instance;
pub mod location;
pub mod provider;
pub mod schedule;
pub mod telemetry;
pub mod workload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use host::{Host, HostRegister};
pub use infragate_core::metadata::MetadataItem;
pub use instance::{Instance, OperatingSystem};
pub use location::{LocationNode, LocationType, LocationsQuery, LocationsResponse, Region, Site};
pub use provider::Provider;
pub use schedule::{RepeatedSchedule, SingleSchedule};
pub use telemetry::{
    TelemetryLogsGroup, TelemetryLogsProfile, TelemetryMetricsGroup, TelemetryMetricsProfile,
};
pub use workload::{Workload, WorkloadMember};

/// Server-assigned timestamps echoed on reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timestamps {
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Query parameters accepted by list operations. Each kind reads the
/// subset it understands and ignores the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    pub offset: Option<i32>,
    pub page_size: Option<i32>,
    /// Filter expression over wire field names.
    pub filter: Option<String>,
    /// `field [asc|desc]` terms over wire field names.
    pub order_by: Option<String>,
    pub host_id: Option<String>,
    pub site_id: Option<String>,
    pub region_id: Option<String>,
    pub instance_id: Option<String>,
    pub workload_id: Option<String>,
    /// Unix time in seconds; selects schedules active at that moment.
    pub unix_epoch: Option<String>,
    /// Regions: report the number of sites in each region.
    pub show_total_sites: Option<bool>,
    /// Telemetry profiles: include profiles inherited from ancestors of
    /// the single target given.
    pub show_inherited: Option<bool>,
}
