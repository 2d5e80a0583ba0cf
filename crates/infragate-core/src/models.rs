//! The internal resource graph.
//!
//! Every resource carries a backend-assigned `resource_id`, kind-specific
//! scalars and zero or more relation edges to other resources. An edge
//! submitted by the adapter is a stub that carries only the target id; the
//! backend returns edges populated one level deep.

pub mod enums;
pub mod host;
pub mod instance;
pub mod os;
pub mod provider;
pub mod region;
pub mod schedule;
pub mod site;
pub mod telemetry;
pub mod workload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ResourceKind;

pub use host::HostResource;
pub use instance::InstanceResource;
pub use os::OperatingSystemResource;
pub use provider::ProviderResource;
pub use region::RegionResource;
pub use schedule::{RepeatedScheduleResource, ScheduleTarget, SingleScheduleResource};
pub use site::SiteResource;
pub use telemetry::{ProfileTarget, TelemetryGroupResource, TelemetryProfileResource};
pub use workload::{WorkloadMemberResource, WorkloadResource};

/// Server-assigned bookkeeping timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

macro_rules! resource_union {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Tagged union over all internal resource kinds.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $($variant($ty)),+
        }

        impl Resource {
            pub fn kind(&self) -> ResourceKind {
                match self {
                    $(Resource::$variant(_) => ResourceKind::$variant),+
                }
            }

            pub fn resource_id(&self) -> &str {
                match self {
                    $(Resource::$variant(r) => &r.resource_id),+
                }
            }

            pub fn set_resource_id(&mut self, id: impl Into<String>) {
                let id = id.into();
                match self {
                    $(Resource::$variant(r) => r.resource_id = id),+
                }
            }

            pub fn timestamps(&self) -> Option<Timestamps> {
                match self {
                    $(Resource::$variant(r) => r.timestamps),+
                }
            }

            pub fn set_timestamps(&mut self, timestamps: Option<Timestamps>) {
                match self {
                    $(Resource::$variant(r) => r.timestamps = timestamps),+
                }
            }

            /// The zero-valued record of `kind`.
            pub fn default_of(kind: ResourceKind) -> Self {
                match kind {
                    $(ResourceKind::$variant => Resource::$variant(<$ty>::default())),+
                }
            }

            /// Serialize the inner record.
            pub fn to_body(&self) -> serde_json::Result<serde_json::Value> {
                match self {
                    $(Resource::$variant(r) => serde_json::to_value(r)),+
                }
            }

            /// Deserialize an inner record of the given kind.
            pub fn from_body(
                kind: ResourceKind,
                body: serde_json::Value,
            ) -> serde_json::Result<Self> {
                match kind {
                    $(ResourceKind::$variant => {
                        serde_json::from_value(body).map(Resource::$variant)
                    }),+
                }
            }
        }

        $(
            impl From<$ty> for Resource {
                fn from(r: $ty) -> Self {
                    Resource::$variant(r)
                }
            }
        )+
    };
}

resource_union! {
    Region(RegionResource),
    Site(SiteResource),
    Host(HostResource),
    Instance(InstanceResource),
    OperatingSystem(OperatingSystemResource),
    SingleSchedule(SingleScheduleResource),
    RepeatedSchedule(RepeatedScheduleResource),
    Workload(WorkloadResource),
    WorkloadMember(WorkloadMemberResource),
    Provider(ProviderResource),
    TelemetryGroup(TelemetryGroupResource),
    TelemetryProfile(TelemetryProfileResource),
}

impl Resource {
    /// Display name, for kinds that have one.
    pub fn name(&self) -> &str {
        match self {
            Resource::Region(r) => &r.name,
            Resource::Site(r) => &r.name,
            Resource::Host(r) => &r.name,
            Resource::Instance(r) => &r.name,
            Resource::OperatingSystem(r) => &r.name,
            Resource::SingleSchedule(r) => &r.name,
            Resource::RepeatedSchedule(r) => &r.name,
            Resource::Workload(r) => &r.name,
            Resource::Provider(r) => &r.name,
            Resource::TelemetryGroup(r) => &r.name,
            Resource::WorkloadMember(_) | Resource::TelemetryProfile(_) => "",
        }
    }
}
