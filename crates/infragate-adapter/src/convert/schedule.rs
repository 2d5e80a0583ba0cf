//! Single and repeated maintenance schedules.
//!
//! Both kinds target at most one of a host, a site or a region. The wire
//! carries three sibling ids; internally the target is one oneof edge.

use infragate_core::id::ResourceKind;
use infragate_core::models::{
    HostResource, RegionResource, RepeatedScheduleResource, ScheduleTarget, SingleScheduleResource,
    SiteResource,
};

use super::{
    enum_in, enum_out, host, id_out, nested, parse_id, region, site, text_in, text_out,
    timestamps_out,
};
use crate::error::ConvertError;
use crate::page::narrow;
use crate::relation::{self, Candidate, Requirement};
use crate::wire::{Host, Region, RepeatedSchedule, Site, SingleSchedule};

const MAX_DURATION_SECONDS: u32 = 86_400;

fn candidates<'a>(
    host: &'a Option<String>,
    site: &'a Option<String>,
    region: &'a Option<String>,
) -> [Candidate<'a>; 3] {
    [
        ("targetHostId", host.as_deref()),
        ("targetSiteId", site.as_deref()),
        ("targetRegionId", region.as_deref()),
    ]
}

fn target_in(
    host: &Option<String>,
    site: &Option<String>,
    region: &Option<String>,
) -> Result<Option<ScheduleTarget>, ConvertError> {
    let candidates = candidates(host, site, region);
    let Some((index, raw)) = relation::validate_exclusive(&candidates, Requirement::Optional)?
    else {
        return Ok(None);
    };
    let field = candidates[index].0;
    let target = match index {
        0 => {
            let id = parse_id(field, ResourceKind::Host, raw)?;
            ScheduleTarget::TargetHost(HostResource::stub(id.as_str()))
        }
        1 => {
            let id = parse_id(field, ResourceKind::Site, raw)?;
            ScheduleTarget::TargetSite(SiteResource::stub(id.as_str()))
        }
        _ => {
            let id = parse_id(field, ResourceKind::Region, raw)?;
            ScheduleTarget::TargetRegion(RegionResource::stub(id.as_str()))
        }
    };
    Ok(Some(target))
}

/// Wire projection of a schedule target: the three sibling ids plus the
/// expanded target record.
#[derive(Default)]
struct TargetOut {
    host_id: Option<String>,
    site_id: Option<String>,
    region_id: Option<String>,
    host: Option<Box<Host>>,
    site: Option<Box<Site>>,
    region: Option<Box<Region>>,
}

fn target_out(relation: Option<&ScheduleTarget>, depth: u8) -> Result<TargetOut, ConvertError> {
    let mut out = TargetOut::default();
    match relation {
        None => {}
        Some(ScheduleTarget::TargetHost(h)) => {
            out.host_id = Some(h.resource_id.clone());
            out.host = nested(Some(h.as_ref()), depth, |h, d| host::from_internal(h, None, d))?;
        }
        Some(ScheduleTarget::TargetSite(s)) => {
            out.site_id = Some(s.resource_id.clone());
            out.site = nested(Some(s.as_ref()), depth, |s, d| site::from_internal(s, None, d))?;
        }
        Some(ScheduleTarget::TargetRegion(r)) => {
            out.region_id = Some(r.resource_id.clone());
            out.region = nested(Some(r.as_ref()), depth, |r, d| region::from_internal(r, None, d))?;
        }
    }
    Ok(out)
}

pub fn validate_single(wire: &SingleSchedule) -> Result<(), ConvertError> {
    let candidates = candidates(&wire.target_host_id, &wire.target_site_id, &wire.target_region_id);
    relation::validate_exclusive(&candidates, Requirement::Optional).map(drop)
}

pub fn validate_repeated(wire: &RepeatedSchedule) -> Result<(), ConvertError> {
    let candidates = candidates(&wire.target_host_id, &wire.target_site_id, &wire.target_region_id);
    relation::validate_exclusive(&candidates, Requirement::Optional).map(drop)
}

/// `endSeconds` of zero leaves the schedule open-ended.
pub fn single_to_internal(wire: &SingleSchedule) -> Result<SingleScheduleResource, ConvertError> {
    let start_seconds: u64 = narrow("startSeconds", wire.start_seconds.unwrap_or(0))?;
    let end_seconds: u64 = narrow("endSeconds", wire.end_seconds.unwrap_or(0))?;
    if end_seconds != 0 && end_seconds <= start_seconds {
        return Err(ConvertError::InvalidValue {
            field: "endSeconds",
            reason: "must be after startSeconds".into(),
        });
    }
    Ok(SingleScheduleResource {
        name: text_in(&wire.name),
        schedule_status: enum_in("scheduleStatus", &wire.schedule_status)?,
        start_seconds,
        end_seconds,
        relation: target_in(&wire.target_host_id, &wire.target_site_id, &wire.target_region_id)?,
        ..Default::default()
    })
}

pub fn single_from_internal(
    schedule: &SingleScheduleResource,
    depth: u8,
) -> Result<SingleSchedule, ConvertError> {
    let target = target_out(schedule.relation.as_ref(), depth)?;
    Ok(SingleSchedule {
        resource_id: id_out(&schedule.resource_id),
        name: text_out(&schedule.name),
        schedule_status: enum_out(schedule.schedule_status),
        start_seconds: Some(narrow("startSeconds", schedule.start_seconds)?),
        end_seconds: Some(narrow("endSeconds", schedule.end_seconds)?),
        target_host_id: target.host_id,
        target_site_id: target.site_id,
        target_region_id: target.region_id,
        target_host: target.host,
        target_site: target.site,
        target_region: target.region,
        timestamps: timestamps_out(schedule.timestamps),
    })
}

/// A cron field: digits and `* , - /` only.
fn cron_in(field: &'static str, value: &Option<String>) -> Result<String, ConvertError> {
    let expr = text_in(value);
    if expr.is_empty() {
        return Err(ConvertError::MissingField(field));
    }
    if let Some(bad) = expr.chars().find(|c| !c.is_ascii_digit() && !"*,-/".contains(*c)) {
        return Err(ConvertError::InvalidValue {
            field,
            reason: format!("unexpected character {bad:?}"),
        });
    }
    Ok(expr)
}

pub fn repeated_to_internal(
    wire: &RepeatedSchedule,
) -> Result<RepeatedScheduleResource, ConvertError> {
    let duration_seconds: u32 = narrow("durationSeconds", wire.duration_seconds.unwrap_or(0))?;
    if duration_seconds > MAX_DURATION_SECONDS {
        return Err(ConvertError::InvalidValue {
            field: "durationSeconds",
            reason: format!("must not exceed {MAX_DURATION_SECONDS}"),
        });
    }
    Ok(RepeatedScheduleResource {
        name: text_in(&wire.name),
        schedule_status: enum_in("scheduleStatus", &wire.schedule_status)?,
        duration_seconds,
        cron_minutes: cron_in("cronMinutes", &wire.cron_minutes)?,
        cron_hours: cron_in("cronHours", &wire.cron_hours)?,
        cron_day_month: cron_in("cronDayMonth", &wire.cron_day_month)?,
        cron_month: cron_in("cronMonth", &wire.cron_month)?,
        cron_day_week: cron_in("cronDayWeek", &wire.cron_day_week)?,
        relation: target_in(&wire.target_host_id, &wire.target_site_id, &wire.target_region_id)?,
        ..Default::default()
    })
}

pub fn repeated_from_internal(
    schedule: &RepeatedScheduleResource,
    depth: u8,
) -> Result<RepeatedSchedule, ConvertError> {
    let target = target_out(schedule.relation.as_ref(), depth)?;
    Ok(RepeatedSchedule {
        resource_id: id_out(&schedule.resource_id),
        name: text_out(&schedule.name),
        schedule_status: enum_out(schedule.schedule_status),
        duration_seconds: Some(narrow("durationSeconds", schedule.duration_seconds)?),
        cron_minutes: text_out(&schedule.cron_minutes),
        cron_hours: text_out(&schedule.cron_hours),
        cron_day_month: text_out(&schedule.cron_day_month),
        cron_month: text_out(&schedule.cron_month),
        cron_day_week: text_out(&schedule.cron_day_week),
        target_host_id: target.host_id,
        target_site_id: target.site_id,
        target_region_id: target.region_id,
        target_host: target.host,
        target_site: target.site,
        target_region: target.region,
        timestamps: timestamps_out(schedule.timestamps),
    })
}
