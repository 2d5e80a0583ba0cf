use serde::{Deserialize, Serialize};

use super::Timestamps;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetryLogsGroup {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub collector_kind: Option<String>,
    pub groups: Option<Vec<String>>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetryMetricsGroup {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub collector_kind: Option<String>,
    pub groups: Option<Vec<String>>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetryLogsProfile {
    pub resource_id: Option<String>,
    pub target_instance: Option<String>,
    pub target_site: Option<String>,
    pub target_region: Option<String>,
    pub logs_group_id: Option<String>,
    pub logs_group: Option<Box<TelemetryLogsGroup>>,
    pub log_level: Option<String>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetryMetricsProfile {
    pub resource_id: Option<String>,
    pub target_instance: Option<String>,
    pub target_site: Option<String>,
    pub target_region: Option<String>,
    pub metrics_group_id: Option<String>,
    pub metrics_group: Option<Box<TelemetryMetricsGroup>>,
    pub metrics_interval: Option<i32>,
    pub timestamps: Option<Timestamps>,
}
