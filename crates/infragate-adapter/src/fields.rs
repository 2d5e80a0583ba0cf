//! Per-kind field tables and the update masks derived from them.
//!
//! Each wire field that can appear in a `filter` or `orderBy` expression
//! maps to an internal path. Fields that carry a mask path are the ones an
//! update overwrites; the mask for a kind is the same for every request, so
//! a PUT or PATCH always replaces all of them.

use std::collections::HashMap;
use std::sync::LazyLock;

use infragate_core::field_mask::FieldMask;
use infragate_core::query::{self, Token};

use crate::dispatch::ApiKind;
use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// camelCase name on the wire.
    pub wire: &'static str,
    /// Internal path used in filter and order-by expressions.
    pub path: &'static str,
    /// Top-level internal field an update overwrites, if any.
    pub mask: Option<&'static str>,
}

const fn writable(wire: &'static str, path: &'static str) -> FieldSpec {
    FieldSpec {
        wire,
        path,
        mask: Some(path),
    }
}

const fn edge(wire: &'static str, path: &'static str, mask: &'static str) -> FieldSpec {
    FieldSpec {
        wire,
        path,
        mask: Some(mask),
    }
}

const fn read_only(wire: &'static str, path: &'static str) -> FieldSpec {
    FieldSpec {
        wire,
        path,
        mask: None,
    }
}

const RESOURCE_ID: FieldSpec = read_only("resourceId", "resource_id");

const HOST: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("name", "name"),
    read_only("uuid", "uuid"),
    read_only("serialNumber", "serial_number"),
    read_only("hostname", "hostname"),
    writable("note", "note"),
    writable("desiredState", "desired_state"),
    read_only("currentState", "current_state"),
    writable("desiredPowerState", "desired_power_state"),
    read_only("currentPowerState", "current_power_state"),
    read_only("hostStatus", "host_status"),
    read_only("cpuCores", "cpu_cores"),
    read_only("memoryBytes", "memory_bytes"),
    edge("siteId", "site.resource_id", "site"),
    writable("metadata", "metadata"),
];

const SITE: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("name", "name"),
    edge("regionId", "region.resource_id", "region"),
    writable("address", "address"),
    writable("siteLat", "site_lat"),
    writable("siteLng", "site_lng"),
    writable("dnsServers", "dns_servers"),
    writable("metadata", "metadata"),
];

const REGION: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("name", "name"),
    edge("parentId", "parent_region.resource_id", "parent_region"),
    writable("metadata", "metadata"),
];

const INSTANCE: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("name", "name"),
    read_only("kind", "kind"),
    writable("desiredState", "desired_state"),
    read_only("currentState", "current_state"),
    read_only("securityFeature", "security_feature"),
    read_only("instanceStatus", "instance_status"),
    read_only("hostId", "host.resource_id"),
    edge("osId", "desired_os.resource_id", "desired_os"),
    read_only("currentOsId", "current_os.resource_id"),
];

const OPERATING_SYSTEM: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("name", "name"),
    writable("architecture", "architecture"),
    writable("kernelCommand", "kernel_command"),
    writable("updateSources", "update_sources"),
    read_only("imageUrl", "image_url"),
    read_only("imageId", "image_id"),
    read_only("sha256", "sha256"),
    read_only("profileName", "profile_name"),
    read_only("profileVersion", "profile_version"),
    writable("installedPackages", "installed_packages"),
    writable("securityFeature", "security_feature"),
    read_only("osType", "os_type"),
    read_only("osProvider", "os_provider"),
];

const SINGLE_SCHEDULE: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("name", "name"),
    writable("scheduleStatus", "schedule_status"),
    writable("startSeconds", "start_seconds"),
    writable("endSeconds", "end_seconds"),
    edge("targetHostId", "relation.target_host.resource_id", "relation"),
    edge("targetSiteId", "relation.target_site.resource_id", "relation"),
    edge("targetRegionId", "relation.target_region.resource_id", "relation"),
];

const REPEATED_SCHEDULE: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("name", "name"),
    writable("scheduleStatus", "schedule_status"),
    writable("durationSeconds", "duration_seconds"),
    writable("cronMinutes", "cron_minutes"),
    writable("cronHours", "cron_hours"),
    writable("cronDayMonth", "cron_day_month"),
    writable("cronMonth", "cron_month"),
    writable("cronDayWeek", "cron_day_week"),
    edge("targetHostId", "relation.target_host.resource_id", "relation"),
    edge("targetSiteId", "relation.target_site.resource_id", "relation"),
    edge("targetRegionId", "relation.target_region.resource_id", "relation"),
];

const WORKLOAD: &[FieldSpec] = &[
    RESOURCE_ID,
    writable("kind", "kind"),
    writable("name", "name"),
    writable("externalId", "external_id"),
    writable("status", "status"),
];

const WORKLOAD_MEMBER: &[FieldSpec] = &[
    RESOURCE_ID,
    read_only("kind", "kind"),
    read_only("workloadId", "workload.resource_id"),
    read_only("instanceId", "instance.resource_id"),
];

const PROVIDER: &[FieldSpec] = &[
    RESOURCE_ID,
    read_only("providerKind", "provider_kind"),
    read_only("providerVendor", "provider_vendor"),
    read_only("name", "name"),
    read_only("apiEndpoint", "api_endpoint"),
];

const TELEMETRY_GROUP: &[FieldSpec] = &[
    RESOURCE_ID,
    read_only("name", "name"),
    read_only("collectorKind", "collector_kind"),
];

const TELEMETRY_LOGS_PROFILE: &[FieldSpec] = &[
    RESOURCE_ID,
    edge("targetInstance", "relation.instance.resource_id", "relation"),
    edge("targetSite", "relation.site.resource_id", "relation"),
    edge("targetRegion", "relation.region.resource_id", "relation"),
    edge("logsGroupId", "group.resource_id", "group"),
    writable("logLevel", "log_level"),
];

const TELEMETRY_METRICS_PROFILE: &[FieldSpec] = &[
    RESOURCE_ID,
    edge("targetInstance", "relation.instance.resource_id", "relation"),
    edge("targetSite", "relation.site.resource_id", "relation"),
    edge("targetRegion", "relation.region.resource_id", "relation"),
    edge("metricsGroupId", "group.resource_id", "group"),
    writable("metricsInterval", "metrics_interval"),
];

pub fn field_table(kind: ApiKind) -> &'static [FieldSpec] {
    match kind {
        ApiKind::Host => HOST,
        ApiKind::Site => SITE,
        ApiKind::Region => REGION,
        ApiKind::Instance => INSTANCE,
        ApiKind::OperatingSystem => OPERATING_SYSTEM,
        ApiKind::SingleSchedule => SINGLE_SCHEDULE,
        ApiKind::RepeatedSchedule => REPEATED_SCHEDULE,
        ApiKind::Workload => WORKLOAD,
        ApiKind::WorkloadMember => WORKLOAD_MEMBER,
        ApiKind::Provider => PROVIDER,
        ApiKind::TelemetryLogsGroup | ApiKind::TelemetryMetricsGroup => TELEMETRY_GROUP,
        ApiKind::TelemetryLogsProfile => TELEMETRY_LOGS_PROFILE,
        ApiKind::TelemetryMetricsProfile => TELEMETRY_METRICS_PROFILE,
    }
}

static MASKS: LazyLock<HashMap<ApiKind, FieldMask>> = LazyLock::new(|| {
    ApiKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let mask = FieldMask::new(field_table(kind).iter().filter_map(|f| f.mask));
            (!mask.is_empty()).then_some((kind, mask))
        })
        .collect()
});

/// The update mask of `kind`, or `None` when the kind cannot be updated.
pub fn field_mask(kind: ApiKind) -> Option<&'static FieldMask> {
    MASKS.get(&kind)
}

/// Host registration changes: rename and re-register.
pub static REGISTER_UPDATE_MASK: LazyLock<FieldMask> =
    LazyLock::new(|| FieldMask::new(["name", "desired_state"]));

pub static ONBOARD_MASK: LazyLock<FieldMask> = LazyLock::new(|| FieldMask::new(["desired_state"]));

pub static INVALIDATE_MASK: LazyLock<FieldMask> =
    LazyLock::new(|| FieldMask::new(["desired_state", "note"]));

fn lookup(kind: ApiKind, wire: &str, context: &'static str) -> Result<&'static str, ConvertError> {
    field_table(kind)
        .iter()
        .find(|f| f.wire == wire)
        .map(|f| f.path)
        .ok_or_else(|| ConvertError::UnknownField {
            field: wire.to_owned(),
            context,
        })
}

/// Rewrite a caller filter from wire field names to internal paths.
/// Keywords, `has` and bare values after an operator are left untouched.
pub fn translate_filter(kind: ApiKind, filter: &str) -> Result<String, ConvertError> {
    if filter.trim().is_empty() {
        return Ok(String::new());
    }
    let tokens = query::tokenize(filter).map_err(|e| ConvertError::InvalidValue {
        field: "filter",
        reason: e.to_string(),
    })?;
    let mut translated = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let after_op = i > 0 && matches!(tokens[i - 1], Token::Op(_));
        let before_paren = matches!(tokens.get(i + 1), Some(Token::LParen));
        match token {
            Token::Ident(word) if token.is_keyword() || after_op => {
                translated.push(Token::Ident(word.clone()));
            }
            Token::Ident(word) if word == query::HAS && before_paren => {
                translated.push(Token::Ident(word.clone()));
            }
            Token::Ident(word) => {
                let path = lookup(kind, word, "filter")?;
                translated.push(Token::Ident(path.to_owned()));
            }
            other => translated.push(other.clone()),
        }
    }
    Ok(query::render(&translated))
}

/// Rewrite `field [asc|desc], ...` from wire names to internal paths.
pub fn translate_order_by(kind: ApiKind, order_by: &str) -> Result<String, ConvertError> {
    let mut terms = Vec::new();
    for term in order_by.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let mut words = term.split_whitespace();
        let (Some(field), direction, None) = (words.next(), words.next(), words.next()) else {
            return Err(ConvertError::InvalidValue {
                field: "orderBy",
                reason: format!("malformed term {term:?}"),
            });
        };
        let path = lookup(kind, field, "orderBy")?;
        match direction.map(str::to_ascii_lowercase).as_deref() {
            None => terms.push(path.to_owned()),
            Some(dir @ ("asc" | "desc")) => terms.push(format!("{path} {dir}")),
            Some(other) => {
                return Err(ConvertError::InvalidValue {
                    field: "orderBy",
                    reason: format!("unknown direction {other:?}"),
                });
            }
        }
    }
    Ok(terms.join(", "))
}
