//! Relation edges inside stored resource bodies.
//!
//! Each kind declares which of its top-level fields are edges. A direct
//! edge holds one target; a oneof edge is an object with a single variant
//! key whose value is the target. Reverse edges (`host.instance`,
//! `workload.members`) are never stored; they are derived on read.

use infragate_core::id::ResourceKind;
use infragate_core::metadata::{self, MetadataItem};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
pub(crate) enum EdgeSlot {
    Direct(&'static str),
    OneOf(&'static str),
}

pub(crate) fn edge_slots(kind: ResourceKind) -> &'static [EdgeSlot] {
    use EdgeSlot::{Direct, OneOf};
    match kind {
        ResourceKind::Region => &[Direct("parent_region")],
        ResourceKind::Site => &[Direct("region")],
        ResourceKind::Host => &[Direct("site")],
        ResourceKind::Instance => &[Direct("host"), Direct("desired_os"), Direct("current_os")],
        ResourceKind::SingleSchedule | ResourceKind::RepeatedSchedule => &[OneOf("relation")],
        ResourceKind::WorkloadMember => &[Direct("workload"), Direct("instance")],
        ResourceKind::TelemetryProfile => &[OneOf("relation"), Direct("group")],
        ResourceKind::OperatingSystem
        | ResourceKind::Workload
        | ResourceKind::Provider
        | ResourceKind::TelemetryGroup => &[],
    }
}

pub(crate) fn reverse_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Host => &["instance"],
        ResourceKind::Workload => &["members"],
        _ => &[],
    }
}

/// Top-level body fields a client may name in an update mask.
pub(crate) fn writable_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Region => &["name", "parent_region", "metadata"],
        ResourceKind::Site => &[
            "name",
            "region",
            "address",
            "site_lat",
            "site_lng",
            "dns_servers",
            "metadata",
        ],
        ResourceKind::Host => &[
            "name",
            "uuid",
            "serial_number",
            "hostname",
            "note",
            "desired_state",
            "current_state",
            "desired_power_state",
            "current_power_state",
            "host_status",
            "cpu_cores",
            "memory_bytes",
            "site",
            "metadata",
        ],
        ResourceKind::Instance => &[
            "name",
            "kind",
            "desired_state",
            "current_state",
            "security_feature",
            "instance_status",
            "host",
            "desired_os",
            "current_os",
        ],
        ResourceKind::OperatingSystem => &[
            "name",
            "architecture",
            "kernel_command",
            "update_sources",
            "image_url",
            "image_id",
            "sha256",
            "profile_name",
            "profile_version",
            "installed_packages",
            "security_feature",
            "os_type",
            "os_provider",
        ],
        ResourceKind::SingleSchedule => &[
            "name",
            "schedule_status",
            "start_seconds",
            "end_seconds",
            "relation",
        ],
        ResourceKind::RepeatedSchedule => &[
            "name",
            "schedule_status",
            "duration_seconds",
            "cron_minutes",
            "cron_hours",
            "cron_day_month",
            "cron_month",
            "cron_day_week",
            "relation",
        ],
        ResourceKind::Workload => &["kind", "name", "external_id", "status"],
        ResourceKind::WorkloadMember => &["kind", "workload", "instance"],
        ResourceKind::Provider => &[
            "provider_kind",
            "provider_vendor",
            "name",
            "api_endpoint",
            "api_credentials",
            "config",
        ],
        ResourceKind::TelemetryGroup => &["name", "collector_kind", "groups"],
        ResourceKind::TelemetryProfile => &["relation", "group", "metrics_interval", "log_level"],
    }
}

/// An edge found in a body: the JSON pointer of the target object and the
/// target's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EdgeRef {
    pub pointer: String,
    pub target: String,
}

fn target_id(value: &Value) -> Option<&str> {
    value
        .get("resource_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Every forward edge present in `body`.
pub(crate) fn edges(kind: ResourceKind, body: &Value) -> Vec<EdgeRef> {
    let mut found = Vec::new();
    for slot in edge_slots(kind) {
        match *slot {
            EdgeSlot::Direct(field) => {
                if let Some(id) = body.get(field).and_then(target_id) {
                    found.push(EdgeRef {
                        pointer: format!("/{field}"),
                        target: id.to_owned(),
                    });
                }
            }
            EdgeSlot::OneOf(field) => {
                let Some(variants) = body.get(field).and_then(Value::as_object) else {
                    continue;
                };
                for (variant, value) in variants {
                    if let Some(id) = target_id(value) {
                        found.push(EdgeRef {
                            pointer: format!("/{field}/{variant}"),
                            target: id.to_owned(),
                        });
                    }
                }
            }
        }
    }
    found
}

fn stub(id: &str) -> Value {
    let mut map = Map::new();
    map.insert("resource_id".into(), Value::String(id.to_owned()));
    Value::Object(map)
}

/// Prepare a body for storage: edges collapse to stubs, reverse edges and
/// bookkeeping fields are dropped.
pub(crate) fn normalize(kind: ResourceKind, body: &mut Value) {
    let Some(object) = body.as_object_mut() else {
        return;
    };
    object.remove("timestamps");
    for field in reverse_fields(kind) {
        object.remove(*field);
    }
    for edge in edges(kind, body) {
        if let Some(slot) = body.pointer_mut(&edge.pointer) {
            *slot = stub(&edge.target);
        }
    }
}

/// Id of the structural parent of a body, following the containment chain
/// region ← site ← host ← instance and region ← region.
pub(crate) fn parent_of(kind: ResourceKind, body: &Value) -> Option<String> {
    let field = match kind {
        ResourceKind::Region => "parent_region",
        ResourceKind::Site => "region",
        ResourceKind::Host => "site",
        ResourceKind::Instance => "host",
        _ => return None,
    };
    body.get(field).and_then(target_id).map(str::to_owned)
}

/// The logs/metrics discriminator of telemetry bodies. Groups and profiles
/// share one internal kind each, so the sub-kind lives in the body and is
/// fixed at create.
pub(crate) fn telemetry_sub_kind(kind: ResourceKind, body: &Value) -> Option<&str> {
    match kind {
        ResourceKind::TelemetryGroup | ResourceKind::TelemetryProfile => {
            body.get("kind").and_then(Value::as_str)
        }
        _ => None,
    }
}

/// Kinds whose reads carry metadata inherited from their ancestors.
pub(crate) fn inherits_metadata(kind: ResourceKind) -> bool {
    matches!(
        kind,
        ResourceKind::Host | ResourceKind::Site | ResourceKind::Region
    )
}

/// Merge metadata layers given nearest first. The first occurrence of a
/// key wins, so nearer ancestors shadow farther ones.
pub(crate) fn merge_metadata(layers: &[&Value]) -> Result<String, serde_json::Error> {
    let mut merged: Vec<MetadataItem> = Vec::new();
    for body in layers {
        let raw = body.get("metadata").and_then(Value::as_str).unwrap_or("");
        for item in metadata::decode(raw)? {
            if !merged.iter().any(|m| m.key == item.key) {
                merged.push(item);
            }
        }
    }
    metadata::encode(&merged)
}
