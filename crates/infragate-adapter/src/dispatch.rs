//! Routing of {operation, kind, payload} to per-kind pipelines.
//!
//! Each public kind implements [`ApiResource`]; the dispatcher keeps one
//! [`KindHandler`] of function pointers per kind, built once.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use infragate_core::error::{InfraError, InfraResult};
use infragate_core::field_mask::FieldMask;
use infragate_core::id::{ResourceId, ResourceKind};
use infragate_core::models::Resource;
use infragate_core::models::enums::TelemetryKind;
use infragate_core::query;
use serde::{Deserialize, Serialize};

use crate::convert::{host, instance, os, provider, region, schedule, site, telemetry, workload};
use crate::error::ConvertError;
use crate::fields;
use crate::filter::{self, DimensionParam};
use crate::page::ListEnvelope;
use crate::wire::{
    Host, Instance, ListParams, OperatingSystem, Provider, Region, RepeatedSchedule,
    SingleSchedule, Site, TelemetryLogsGroup, TelemetryLogsProfile, TelemetryMetricsGroup,
    TelemetryMetricsProfile, Workload, WorkloadMember,
};

/// Public resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiKind {
    Host,
    Site,
    Region,
    Instance,
    OperatingSystem,
    SingleSchedule,
    RepeatedSchedule,
    Workload,
    WorkloadMember,
    Provider,
    TelemetryLogsGroup,
    TelemetryMetricsGroup,
    TelemetryLogsProfile,
    TelemetryMetricsProfile,
}

impl ApiKind {
    pub const ALL: [ApiKind; 14] = [
        ApiKind::Host,
        ApiKind::Site,
        ApiKind::Region,
        ApiKind::Instance,
        ApiKind::OperatingSystem,
        ApiKind::SingleSchedule,
        ApiKind::RepeatedSchedule,
        ApiKind::Workload,
        ApiKind::WorkloadMember,
        ApiKind::Provider,
        ApiKind::TelemetryLogsGroup,
        ApiKind::TelemetryMetricsGroup,
        ApiKind::TelemetryLogsProfile,
        ApiKind::TelemetryMetricsProfile,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ApiKind::Host => "Host",
            ApiKind::Site => "Site",
            ApiKind::Region => "Region",
            ApiKind::Instance => "Instance",
            ApiKind::OperatingSystem => "OperatingSystem",
            ApiKind::SingleSchedule => "SingleSchedule",
            ApiKind::RepeatedSchedule => "RepeatedSchedule",
            ApiKind::Workload => "Workload",
            ApiKind::WorkloadMember => "WorkloadMember",
            ApiKind::Provider => "Provider",
            ApiKind::TelemetryLogsGroup => "TelemetryLogsGroup",
            ApiKind::TelemetryMetricsGroup => "TelemetryMetricsGroup",
            ApiKind::TelemetryLogsProfile => "TelemetryLogsProfile",
            ApiKind::TelemetryMetricsProfile => "TelemetryMetricsProfile",
        }
    }

    /// The internal kind backing this public kind.
    pub const fn resource_kind(self) -> ResourceKind {
        match self {
            ApiKind::Host => ResourceKind::Host,
            ApiKind::Site => ResourceKind::Site,
            ApiKind::Region => ResourceKind::Region,
            ApiKind::Instance => ResourceKind::Instance,
            ApiKind::OperatingSystem => ResourceKind::OperatingSystem,
            ApiKind::SingleSchedule => ResourceKind::SingleSchedule,
            ApiKind::RepeatedSchedule => ResourceKind::RepeatedSchedule,
            ApiKind::Workload => ResourceKind::Workload,
            ApiKind::WorkloadMember => ResourceKind::WorkloadMember,
            ApiKind::Provider => ResourceKind::Provider,
            ApiKind::TelemetryLogsGroup | ApiKind::TelemetryMetricsGroup => {
                ResourceKind::TelemetryGroup
            }
            ApiKind::TelemetryLogsProfile | ApiKind::TelemetryMetricsProfile => {
                ResourceKind::TelemetryProfile
            }
        }
    }

    /// Look up a kind by its public name.
    pub fn from_name(name: &str) -> InfraResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| InfraError::Unimplemented(format!("unknown resource kind {name:?}")))
    }

    /// Parse a caller-supplied id, which must identify a resource of this
    /// kind.
    pub fn parse_id(self, raw: &str) -> Result<ResourceId, ConvertError> {
        ResourceId::parse_kind(self.resource_kind(), raw).map_err(|source| {
            ConvertError::InvalidId {
                field: "resourceId",
                source,
            }
        })
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! wire_resource {
    ($($variant:ident),+ $(,)?) => {
        /// A wire record of any public kind.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind", content = "resource")]
        pub enum WireResource {
            $($variant($variant)),+
        }

        impl WireResource {
            pub fn kind(&self) -> ApiKind {
                match self {
                    $(WireResource::$variant(_) => ApiKind::$variant),+
                }
            }
        }
    };
}

wire_resource!(
    Host,
    Site,
    Region,
    Instance,
    OperatingSystem,
    SingleSchedule,
    RepeatedSchedule,
    Workload,
    WorkloadMember,
    Provider,
    TelemetryLogsGroup,
    TelemetryMetricsGroup,
    TelemetryLogsProfile,
    TelemetryMetricsProfile,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
}

/// A public resource kind: its conversions, relation rules and list
/// constraints.
pub trait ApiResource: Sized + Send + 'static {
    const KIND: ApiKind;

    fn to_internal(&self) -> Result<Resource, ConvertError>;

    fn from_internal(
        resource: &Resource,
        rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError>;

    /// Relation rules checked before conversion.
    fn validate_relations(&self, _op: WriteOp) -> Result<(), ConvertError> {
        Ok(())
    }

    /// Kind-specific predicates a list request adds to the caller's filter.
    fn list_filter(_params: &ListParams) -> Result<Vec<String>, ConvertError> {
        Ok(Vec::new())
    }

    fn into_wire(self) -> WireResource;

    fn from_wire(wire: WireResource) -> Option<Self>;

    fn wire_ref(wire: &WireResource) -> Option<&Self>;
}

fn unexpected(kind: ApiKind, resource: &Resource) -> ConvertError {
    ConvertError::UnexpectedResource {
        expected: kind.as_str(),
        id: resource.resource_id().to_owned(),
    }
}

fn dimensions(params: &[DimensionParam<'_>]) -> Result<Vec<String>, ConvertError> {
    Ok(vec![filter::relation_predicate(params)?])
}

fn telemetry_kind_clause(kind: TelemetryKind) -> String {
    format!("kind = {}", query::quote(kind.as_str()))
}

fn schedule_dimensions(params: &ListParams) -> [DimensionParam<'_>; 3] {
    [
        DimensionParam {
            name: "hostId",
            path: "relation.target_host",
            kind: ResourceKind::Host,
            value: params.host_id.as_deref(),
        },
        DimensionParam {
            name: "siteId",
            path: "relation.target_site",
            kind: ResourceKind::Site,
            value: params.site_id.as_deref(),
        },
        DimensionParam {
            name: "regionId",
            path: "relation.target_region",
            kind: ResourceKind::Region,
            value: params.region_id.as_deref(),
        },
    ]
}

fn profile_filter(params: &ListParams, kind: TelemetryKind) -> Result<Vec<String>, ConvertError> {
    let mut clauses = vec![telemetry_kind_clause(kind)];
    // Inherited listings are anchored on the target instead of filtering on it.
    if params.show_inherited != Some(true) {
        clauses.extend(dimensions(&[
            DimensionParam {
                name: "instanceId",
                path: "relation.instance",
                kind: ResourceKind::Instance,
                value: params.instance_id.as_deref(),
            },
            DimensionParam {
                name: "siteId",
                path: "relation.site",
                kind: ResourceKind::Site,
                value: params.site_id.as_deref(),
            },
            DimensionParam {
                name: "regionId",
                path: "relation.region",
                kind: ResourceKind::Region,
                value: params.region_id.as_deref(),
            },
        ])?);
    }
    Ok(clauses)
}

macro_rules! wire_access {
    ($variant:ident) => {
        fn into_wire(self) -> WireResource {
            WireResource::$variant(self)
        }

        fn from_wire(wire: WireResource) -> Option<Self> {
            match wire {
                WireResource::$variant(w) => Some(w),
                _ => None,
            }
        }

        fn wire_ref(wire: &WireResource) -> Option<&Self> {
            match wire {
                WireResource::$variant(w) => Some(w),
                _ => None,
            }
        }
    };
}

impl ApiResource for Host {
    const KIND: ApiKind = ApiKind::Host;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        host::to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::Host(h) => host::from_internal(h, rendered, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        dimensions(&[DimensionParam {
            name: "siteId",
            path: "site",
            kind: ResourceKind::Site,
            value: params.site_id.as_deref(),
        }])
    }

    wire_access!(Host);
}

impl ApiResource for Site {
    const KIND: ApiKind = ApiKind::Site;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        site::to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::Site(s) => site::from_internal(s, rendered, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        dimensions(&[DimensionParam {
            name: "regionId",
            path: "region",
            kind: ResourceKind::Region,
            value: params.region_id.as_deref(),
        }])
    }

    wire_access!(Site);
}

impl ApiResource for Region {
    const KIND: ApiKind = ApiKind::Region;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        region::to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::Region(r) => region::from_internal(r, rendered, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    wire_access!(Region);
}

impl ApiResource for Instance {
    const KIND: ApiKind = ApiKind::Instance;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        instance::to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::Instance(i) => instance::from_internal(i, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn validate_relations(&self, op: WriteOp) -> Result<(), ConvertError> {
        match op {
            WriteOp::Create => instance::validate_create(self),
            WriteOp::Update => Ok(()),
        }
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        dimensions(&[DimensionParam {
            name: "hostId",
            path: "host",
            kind: ResourceKind::Host,
            value: params.host_id.as_deref(),
        }])
    }

    wire_access!(Instance);
}

impl ApiResource for OperatingSystem {
    const KIND: ApiKind = ApiKind::OperatingSystem;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        os::to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        _depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::OperatingSystem(o) => os::from_internal(o),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    wire_access!(OperatingSystem);
}

impl ApiResource for SingleSchedule {
    const KIND: ApiKind = ApiKind::SingleSchedule;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        schedule::single_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::SingleSchedule(s) => schedule::single_from_internal(s, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn validate_relations(&self, _op: WriteOp) -> Result<(), ConvertError> {
        schedule::validate_single(self)
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        let mut clauses = dimensions(&schedule_dimensions(params))?;
        clauses.extend(filter::epoch_predicate(params.unix_epoch.as_deref())?);
        Ok(clauses)
    }

    wire_access!(SingleSchedule);
}

impl ApiResource for RepeatedSchedule {
    const KIND: ApiKind = ApiKind::RepeatedSchedule;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        schedule::repeated_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::RepeatedSchedule(s) => schedule::repeated_from_internal(s, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn validate_relations(&self, _op: WriteOp) -> Result<(), ConvertError> {
        schedule::validate_repeated(self)
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        dimensions(&schedule_dimensions(params))
    }

    wire_access!(RepeatedSchedule);
}

impl ApiResource for Workload {
    const KIND: ApiKind = ApiKind::Workload;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        workload::workload_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::Workload(w) => workload::workload_from_internal(w, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    wire_access!(Workload);
}

impl ApiResource for WorkloadMember {
    const KIND: ApiKind = ApiKind::WorkloadMember;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        workload::member_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::WorkloadMember(m) => workload::member_from_internal(m, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn validate_relations(&self, _op: WriteOp) -> Result<(), ConvertError> {
        workload::validate_member(self)
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        dimensions(&[DimensionParam {
            name: "workloadId",
            path: "workload",
            kind: ResourceKind::Workload,
            value: params.workload_id.as_deref(),
        }])
    }

    wire_access!(WorkloadMember);
}

impl ApiResource for Provider {
    const KIND: ApiKind = ApiKind::Provider;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        provider::to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        _depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::Provider(p) => provider::from_internal(p),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    wire_access!(Provider);
}

impl ApiResource for TelemetryLogsGroup {
    const KIND: ApiKind = ApiKind::TelemetryLogsGroup;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        telemetry::logs_group_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        _depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::TelemetryGroup(g) => telemetry::logs_group_from_internal(g),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn list_filter(_params: &ListParams) -> Result<Vec<String>, ConvertError> {
        Ok(vec![telemetry_kind_clause(TelemetryKind::Logs)])
    }

    wire_access!(TelemetryLogsGroup);
}

impl ApiResource for TelemetryMetricsGroup {
    const KIND: ApiKind = ApiKind::TelemetryMetricsGroup;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        telemetry::metrics_group_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        _depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::TelemetryGroup(g) => telemetry::metrics_group_from_internal(g),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn list_filter(_params: &ListParams) -> Result<Vec<String>, ConvertError> {
        Ok(vec![telemetry_kind_clause(TelemetryKind::Metrics)])
    }

    wire_access!(TelemetryMetricsGroup);
}

impl ApiResource for TelemetryLogsProfile {
    const KIND: ApiKind = ApiKind::TelemetryLogsProfile;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        telemetry::logs_profile_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::TelemetryProfile(p) => telemetry::logs_profile_from_internal(p, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn validate_relations(&self, _op: WriteOp) -> Result<(), ConvertError> {
        telemetry::validate_logs_profile(self)
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        profile_filter(params, TelemetryKind::Logs)
    }

    wire_access!(TelemetryLogsProfile);
}

impl ApiResource for TelemetryMetricsProfile {
    const KIND: ApiKind = ApiKind::TelemetryMetricsProfile;

    fn to_internal(&self) -> Result<Resource, ConvertError> {
        telemetry::metrics_profile_to_internal(self).map(Resource::from)
    }

    fn from_internal(
        resource: &Resource,
        _rendered: Option<&str>,
        depth: u8,
    ) -> Result<Self, ConvertError> {
        match resource {
            Resource::TelemetryProfile(p) => telemetry::metrics_profile_from_internal(p, depth),
            other => Err(unexpected(Self::KIND, other)),
        }
    }

    fn validate_relations(&self, _op: WriteOp) -> Result<(), ConvertError> {
        telemetry::validate_metrics_profile(self)
    }

    fn list_filter(params: &ListParams) -> Result<Vec<String>, ConvertError> {
        profile_filter(params, TelemetryKind::Metrics)
    }

    wire_access!(TelemetryMetricsProfile);
}

type ToInternalFn = fn(&WireResource) -> Result<Resource, ConvertError>;
type FromInternalFn = fn(&Resource, Option<&str>, u8) -> Result<WireResource, ConvertError>;
type ValidateFn = fn(&WireResource, WriteOp) -> Result<(), ConvertError>;
type ListFilterFn = fn(&ListParams) -> Result<Vec<String>, ConvertError>;

/// Per-kind pipeline steps, type-erased over [`WireResource`].
#[derive(Clone, Copy)]
pub struct KindHandler {
    pub kind: ApiKind,
    pub to_internal: ToInternalFn,
    pub from_internal: FromInternalFn,
    pub mask: Option<&'static FieldMask>,
    pub validate_relations: ValidateFn,
    pub list_filter: ListFilterFn,
}

fn wire_of<T: ApiResource>(wire: &WireResource) -> Result<&T, ConvertError> {
    T::wire_ref(wire).ok_or_else(|| ConvertError::InvalidValue {
        field: "kind",
        reason: format!("expected {}, got {}", T::KIND, wire.kind()),
    })
}

fn to_internal_of<T: ApiResource>(wire: &WireResource) -> Result<Resource, ConvertError> {
    wire_of::<T>(wire)?.to_internal()
}

fn from_internal_of<T: ApiResource>(
    resource: &Resource,
    rendered: Option<&str>,
    depth: u8,
) -> Result<WireResource, ConvertError> {
    T::from_internal(resource, rendered, depth).map(T::into_wire)
}

fn validate_relations_of<T: ApiResource>(
    wire: &WireResource,
    op: WriteOp,
) -> Result<(), ConvertError> {
    wire_of::<T>(wire)?.validate_relations(op)
}

impl KindHandler {
    pub fn of<T: ApiResource>() -> Self {
        Self {
            kind: T::KIND,
            to_internal: to_internal_of::<T>,
            from_internal: from_internal_of::<T>,
            mask: fields::field_mask(T::KIND),
            validate_relations: validate_relations_of::<T>,
            list_filter: T::list_filter,
        }
    }
}

impl fmt::Debug for KindHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindHandler")
            .field("kind", &self.kind)
            .field("mask", &self.mask)
            .finish_non_exhaustive()
    }
}

static HANDLERS: LazyLock<HashMap<ApiKind, KindHandler>> = LazyLock::new(|| {
    [
        KindHandler::of::<Host>(),
        KindHandler::of::<Site>(),
        KindHandler::of::<Region>(),
        KindHandler::of::<Instance>(),
        KindHandler::of::<OperatingSystem>(),
        KindHandler::of::<SingleSchedule>(),
        KindHandler::of::<RepeatedSchedule>(),
        KindHandler::of::<Workload>(),
        KindHandler::of::<WorkloadMember>(),
        KindHandler::of::<Provider>(),
        KindHandler::of::<TelemetryLogsGroup>(),
        KindHandler::of::<TelemetryMetricsGroup>(),
        KindHandler::of::<TelemetryLogsProfile>(),
        KindHandler::of::<TelemetryMetricsProfile>(),
    ]
    .into_iter()
    .map(|h| (h.kind, h))
    .collect()
});

pub fn handler(kind: ApiKind) -> InfraResult<&'static KindHandler> {
    HANDLERS
        .get(&kind)
        .ok_or_else(|| InfraError::Unimplemented(format!("no handler for {kind}")))
}

/// An operation routed by [`crate::InventoryAdapter::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Create(WireResource),
    Get { kind: ApiKind, id: String },
    List { kind: ApiKind, params: ListParams },
    /// Full replace of the kind's maskable fields.
    Update { id: String, resource: WireResource },
    /// Same mask as `Update`.
    Patch { id: String, resource: WireResource },
    Delete { kind: ApiKind, id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Resource(WireResource),
    List(ListEnvelope<WireResource>),
    Deleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_handler() {
        for kind in ApiKind::ALL {
            assert_eq!(handler(kind).unwrap().kind, kind);
        }
    }

    #[test]
    fn unknown_names_are_unimplemented() {
        assert_eq!(ApiKind::from_name("Site").unwrap(), ApiKind::Site);
        assert!(matches!(
            ApiKind::from_name("Cluster"),
            Err(InfraError::Unimplemented(_))
        ));
    }

    #[test]
    fn handlers_reject_foreign_payloads() {
        let site = WireResource::Site(Site::default());
        let err = (handler(ApiKind::Host).unwrap().to_internal)(&site).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidValue { field: "kind", .. }));
    }

    #[test]
    fn read_converts_only_matching_resources() {
        let host = Resource::from(infragate_core::models::HostResource {
            resource_id: "host-0000abcd".into(),
            ..Default::default()
        });
        let err = (handler(ApiKind::Site).unwrap().from_internal)(&host, None, 0).unwrap_err();
        assert!(matches!(err, ConvertError::UnexpectedResource { expected: "Site", .. }));
        let wire = (handler(ApiKind::Host).unwrap().from_internal)(&host, None, 0).unwrap();
        assert_eq!(wire.kind(), ApiKind::Host);
    }

    #[test]
    fn host_list_filter_pins_site() {
        let params = ListParams {
            site_id: Some("site-0000abcd".into()),
            ..Default::default()
        };
        assert_eq!(
            Host::list_filter(&params).unwrap(),
            [r#"site.resource_id = "site-0000abcd""#]
        );
        let params = ListParams {
            site_id: Some("null".into()),
            ..Default::default()
        };
        assert_eq!(Host::list_filter(&params).unwrap(), ["NOT has(site)"]);
        assert_eq!(
            Host::list_filter(&ListParams::default()).unwrap(),
            [query::MATCH_ALL]
        );
    }

    #[test]
    fn schedule_dimensions_are_exclusive() {
        let params = ListParams {
            host_id: Some("host-0000abcd".into()),
            site_id: Some(String::new()),
            unix_epoch: Some("1700000000".into()),
            ..Default::default()
        };
        let clauses = SingleSchedule::list_filter(&params).unwrap();
        assert_eq!(
            clauses,
            [
                r#"relation.target_host.resource_id = "host-0000abcd" AND NOT has(relation.target_site)"#
                    .to_owned(),
                "start_seconds <= 1700000000 AND (end_seconds = 0 OR end_seconds >= 1700000000)"
                    .to_owned(),
            ]
        );
        let both = ListParams {
            host_id: Some("host-0000abcd".into()),
            site_id: Some("site-0000abcd".into()),
            ..Default::default()
        };
        let err = RepeatedSchedule::list_filter(&both).unwrap_err();
        assert_eq!(err.to_string(), "only one of hostId, siteId, regionId may be specified");
    }

    #[test]
    fn inherited_profile_listing_skips_target_dimensions() {
        let params = ListParams {
            site_id: Some("site-0000abcd".into()),
            show_inherited: Some(true),
            ..Default::default()
        };
        assert_eq!(
            TelemetryLogsProfile::list_filter(&params).unwrap(),
            [r#"kind = "TELEMETRY_RESOURCE_KIND_LOGS""#]
        );
    }
}
