//! Telemetry groups and profiles.
//!
//! The wire splits both into logs and metrics variants. Internally one
//! group kind and one profile kind carry a [`TelemetryKind`] instead, so
//! every read checks that the stored record is of the variant asked for.

use infragate_core::id::ResourceKind;
use infragate_core::models::enums::TelemetryKind;
use infragate_core::models::{
    InstanceResource, ProfileTarget, RegionResource, SiteResource, TelemetryGroupResource,
    TelemetryProfileResource,
};

use super::{
    enum_in, enum_out, id_out, list_in, list_out, nested, parse_id, text_in, text_out,
    timestamps_out,
};
use crate::error::ConvertError;
use crate::page::narrow;
use crate::relation::{self, Candidate, Requirement};
use crate::wire::{
    TelemetryLogsGroup, TelemetryLogsProfile, TelemetryMetricsGroup, TelemetryMetricsProfile,
};

fn expect_kind(
    expected: TelemetryKind,
    actual: TelemetryKind,
    wire: &'static str,
    id: &str,
) -> Result<(), ConvertError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ConvertError::UnexpectedResource {
            expected: wire,
            id: id.to_owned(),
        })
    }
}

fn group_in(
    kind: TelemetryKind,
    name: &Option<String>,
    collector_kind: &Option<String>,
    groups: &Option<Vec<String>>,
) -> Result<TelemetryGroupResource, ConvertError> {
    let name = text_in(name);
    if name.is_empty() {
        return Err(ConvertError::MissingField("name"));
    }
    let groups = list_in(groups);
    if groups.is_empty() {
        return Err(ConvertError::MissingField("groups"));
    }
    Ok(TelemetryGroupResource {
        name,
        kind,
        collector_kind: enum_in("collectorKind", collector_kind)?,
        groups,
        ..Default::default()
    })
}

pub fn logs_group_to_internal(
    wire: &TelemetryLogsGroup,
) -> Result<TelemetryGroupResource, ConvertError> {
    group_in(TelemetryKind::Logs, &wire.name, &wire.collector_kind, &wire.groups)
}

pub fn metrics_group_to_internal(
    wire: &TelemetryMetricsGroup,
) -> Result<TelemetryGroupResource, ConvertError> {
    group_in(TelemetryKind::Metrics, &wire.name, &wire.collector_kind, &wire.groups)
}

pub fn logs_group_from_internal(
    group: &TelemetryGroupResource,
) -> Result<TelemetryLogsGroup, ConvertError> {
    expect_kind(TelemetryKind::Logs, group.kind, "TelemetryLogsGroup", &group.resource_id)?;
    Ok(TelemetryLogsGroup {
        resource_id: id_out(&group.resource_id),
        name: text_out(&group.name),
        collector_kind: enum_out(group.collector_kind),
        groups: list_out(&group.groups),
        timestamps: timestamps_out(group.timestamps),
    })
}

pub fn metrics_group_from_internal(
    group: &TelemetryGroupResource,
) -> Result<TelemetryMetricsGroup, ConvertError> {
    expect_kind(TelemetryKind::Metrics, group.kind, "TelemetryMetricsGroup", &group.resource_id)?;
    Ok(TelemetryMetricsGroup {
        resource_id: id_out(&group.resource_id),
        name: text_out(&group.name),
        collector_kind: enum_out(group.collector_kind),
        groups: list_out(&group.groups),
        timestamps: timestamps_out(group.timestamps),
    })
}

fn candidates<'a>(
    instance: &'a Option<String>,
    site: &'a Option<String>,
    region: &'a Option<String>,
) -> [Candidate<'a>; 3] {
    [
        ("targetInstance", instance.as_deref()),
        ("targetSite", site.as_deref()),
        ("targetRegion", region.as_deref()),
    ]
}

/// A profile is attached to exactly one of an instance, a site or a region.
fn target_in(
    instance: &Option<String>,
    site: &Option<String>,
    region: &Option<String>,
) -> Result<ProfileTarget, ConvertError> {
    let candidates = candidates(instance, site, region);
    let Some((index, raw)) = relation::validate_exclusive(&candidates, Requirement::Required)?
    else {
        return Err(ConvertError::MissingRelation {
            fields: candidates.iter().map(|(name, _)| *name).collect(),
        });
    };
    let field = candidates[index].0;
    Ok(match index {
        0 => {
            let id = parse_id(field, ResourceKind::Instance, raw)?;
            ProfileTarget::Instance(InstanceResource::stub(id.as_str()))
        }
        1 => {
            let id = parse_id(field, ResourceKind::Site, raw)?;
            ProfileTarget::Site(SiteResource::stub(id.as_str()))
        }
        _ => {
            let id = parse_id(field, ResourceKind::Region, raw)?;
            ProfileTarget::Region(RegionResource::stub(id.as_str()))
        }
    })
}

type TargetIds = (Option<String>, Option<String>, Option<String>);

fn target_out(relation: Option<&ProfileTarget>) -> TargetIds {
    match relation {
        None => (None, None, None),
        Some(ProfileTarget::Instance(i)) => (Some(i.resource_id.clone()), None, None),
        Some(ProfileTarget::Site(s)) => (None, Some(s.resource_id.clone()), None),
        Some(ProfileTarget::Region(r)) => (None, None, Some(r.resource_id.clone())),
    }
}

fn group_id_in(
    field: &'static str,
    value: &Option<String>,
) -> Result<Box<TelemetryGroupResource>, ConvertError> {
    match super::relation_in(field, ResourceKind::TelemetryGroup, value)? {
        Some(id) => Ok(TelemetryGroupResource::stub(id.as_str())),
        None => Err(ConvertError::MissingField(field)),
    }
}

pub fn validate_logs_profile(wire: &TelemetryLogsProfile) -> Result<(), ConvertError> {
    let candidates = candidates(&wire.target_instance, &wire.target_site, &wire.target_region);
    relation::validate_exclusive(&candidates, Requirement::Required).map(drop)
}

pub fn validate_metrics_profile(wire: &TelemetryMetricsProfile) -> Result<(), ConvertError> {
    let candidates = candidates(&wire.target_instance, &wire.target_site, &wire.target_region);
    relation::validate_exclusive(&candidates, Requirement::Required).map(drop)
}

pub fn logs_profile_to_internal(
    wire: &TelemetryLogsProfile,
) -> Result<TelemetryProfileResource, ConvertError> {
    Ok(TelemetryProfileResource {
        kind: TelemetryKind::Logs,
        relation: Some(target_in(&wire.target_instance, &wire.target_site, &wire.target_region)?),
        group: Some(group_id_in("logsGroupId", &wire.logs_group_id)?),
        log_level: enum_in("logLevel", &wire.log_level)?,
        ..Default::default()
    })
}

/// Metrics are collected at least once per second.
pub fn metrics_profile_to_internal(
    wire: &TelemetryMetricsProfile,
) -> Result<TelemetryProfileResource, ConvertError> {
    let metrics_interval: u32 = narrow("metricsInterval", wire.metrics_interval.unwrap_or(0))?;
    if metrics_interval == 0 {
        return Err(ConvertError::InvalidValue {
            field: "metricsInterval",
            reason: "must be at least 1".into(),
        });
    }
    Ok(TelemetryProfileResource {
        kind: TelemetryKind::Metrics,
        relation: Some(target_in(&wire.target_instance, &wire.target_site, &wire.target_region)?),
        group: Some(group_id_in("metricsGroupId", &wire.metrics_group_id)?),
        metrics_interval,
        ..Default::default()
    })
}

pub fn logs_profile_from_internal(
    profile: &TelemetryProfileResource,
    depth: u8,
) -> Result<TelemetryLogsProfile, ConvertError> {
    expect_kind(TelemetryKind::Logs, profile.kind, "TelemetryLogsProfile", &profile.resource_id)?;
    let (target_instance, target_site, target_region) = target_out(profile.relation.as_ref());
    Ok(TelemetryLogsProfile {
        resource_id: id_out(&profile.resource_id),
        target_instance,
        target_site,
        target_region,
        logs_group_id: profile.group.as_ref().map(|g| g.resource_id.clone()),
        logs_group: nested(profile.group.as_deref(), depth, |g, _| logs_group_from_internal(g))?,
        log_level: enum_out(profile.log_level),
        timestamps: timestamps_out(profile.timestamps),
    })
}

pub fn metrics_profile_from_internal(
    profile: &TelemetryProfileResource,
    depth: u8,
) -> Result<TelemetryMetricsProfile, ConvertError> {
    expect_kind(
        TelemetryKind::Metrics,
        profile.kind,
        "TelemetryMetricsProfile",
        &profile.resource_id,
    )?;
    let (target_instance, target_site, target_region) = target_out(profile.relation.as_ref());
    Ok(TelemetryMetricsProfile {
        resource_id: id_out(&profile.resource_id),
        target_instance,
        target_site,
        target_region,
        metrics_group_id: profile.group.as_ref().map(|g| g.resource_id.clone()),
        metrics_group: nested(profile.group.as_deref(), depth, |g, _| {
            metrics_group_from_internal(g)
        })?,
        metrics_interval: Some(narrow("metricsInterval", profile.metrics_interval)?),
        timestamps: timestamps_out(profile.timestamps),
    })
}
