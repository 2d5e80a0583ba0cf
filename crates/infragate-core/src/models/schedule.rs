//! Maintenance schedule domain models.
//!
//! A schedule targets at most one of a host, a site or a region; the
//! target is a single oneof edge so two targets can never coexist.

use serde::{Deserialize, Serialize};

use super::Timestamps;
use super::enums::ScheduleStatus;
use super::host::HostResource;
use super::region::RegionResource;
use super::site::SiteResource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleTarget {
    TargetHost(Box<HostResource>),
    TargetSite(Box<SiteResource>),
    TargetRegion(Box<RegionResource>),
}

impl ScheduleTarget {
    pub fn resource_id(&self) -> &str {
        match self {
            ScheduleTarget::TargetHost(h) => &h.resource_id,
            ScheduleTarget::TargetSite(s) => &s.resource_id,
            ScheduleTarget::TargetRegion(r) => &r.resource_id,
        }
    }
}

/// A one-off schedule between two unix timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleScheduleResource {
    pub resource_id: String,
    pub name: String,
    pub schedule_status: ScheduleStatus,
    /// Unix seconds.
    pub start_seconds: u64,
    /// Unix seconds; zero means open-ended.
    pub end_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<ScheduleTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

/// A cron-style recurring schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatedScheduleResource {
    pub resource_id: String,
    pub name: String,
    pub schedule_status: ScheduleStatus,
    pub duration_seconds: u32,
    pub cron_minutes: String,
    pub cron_hours: String,
    pub cron_day_month: String,
    pub cron_month: String,
    pub cron_day_week: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<ScheduleTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}
