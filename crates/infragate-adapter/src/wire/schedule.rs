use serde::{Deserialize, Serialize};

use super::{Host, Region, Site, Timestamps};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleSchedule {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub schedule_status: Option<String>,
    pub start_seconds: Option<i64>,
    /// 0 leaves the schedule open-ended.
    pub end_seconds: Option<i64>,
    pub target_host_id: Option<String>,
    pub target_site_id: Option<String>,
    pub target_region_id: Option<String>,
    pub target_host: Option<Box<Host>>,
    pub target_site: Option<Box<Site>>,
    pub target_region: Option<Box<Region>>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepeatedSchedule {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub schedule_status: Option<String>,
    pub duration_seconds: Option<i32>,
    pub cron_minutes: Option<String>,
    pub cron_hours: Option<String>,
    pub cron_day_month: Option<String>,
    pub cron_month: Option<String>,
    pub cron_day_week: Option<String>,
    pub target_host_id: Option<String>,
    pub target_site_id: Option<String>,
    pub target_region_id: Option<String>,
    pub target_host: Option<Box<Host>>,
    pub target_site: Option<Box<Site>>,
    pub target_region: Option<Box<Region>>,
    pub timestamps: Option<Timestamps>,
}
