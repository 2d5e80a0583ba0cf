//! Resource kinds and backend-assigned resource identifiers.
//!
//! Identifiers have the shape `<prefix>-<8 lowercase hex digits>`, where
//! the prefix names the kind (e.g. `host-1a2b3c4d`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Length of the hex suffix of every resource id.
const SUFFIX_LEN: usize = 8;

/// Discriminator over the internal resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Region,
    Site,
    Host,
    Instance,
    OperatingSystem,
    SingleSchedule,
    RepeatedSchedule,
    Workload,
    WorkloadMember,
    Provider,
    TelemetryGroup,
    TelemetryProfile,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 12] = [
        ResourceKind::Region,
        ResourceKind::Site,
        ResourceKind::Host,
        ResourceKind::Instance,
        ResourceKind::OperatingSystem,
        ResourceKind::SingleSchedule,
        ResourceKind::RepeatedSchedule,
        ResourceKind::Workload,
        ResourceKind::WorkloadMember,
        ResourceKind::Provider,
        ResourceKind::TelemetryGroup,
        ResourceKind::TelemetryProfile,
    ];

    /// Id prefix used for resources of this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Site => "site",
            Self::Host => "host",
            Self::Instance => "inst",
            Self::OperatingSystem => "os",
            Self::SingleSchedule => "singlesche",
            Self::RepeatedSchedule => "repeatedsche",
            Self::Workload => "workload",
            Self::WorkloadMember => "workloadmember",
            Self::Provider => "provider",
            Self::TelemetryGroup => "telemetrygroup",
            Self::TelemetryProfile => "telemetryprofile",
        }
    }

    /// Stable storage name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Site => "site",
            Self::Host => "host",
            Self::Instance => "instance",
            Self::OperatingSystem => "operating_system",
            Self::SingleSchedule => "single_schedule",
            Self::RepeatedSchedule => "repeated_schedule",
            Self::Workload => "workload",
            Self::WorkloadMember => "workload_member",
            Self::Provider => "provider",
            Self::TelemetryGroup => "telemetry_group",
            Self::TelemetryProfile => "telemetry_profile",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.prefix() == prefix)
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceIdError {
    #[error("malformed resource id {0:?}")]
    Malformed(String),

    #[error("resource id {id:?} does not identify a {expected}")]
    WrongKind { id: String, expected: ResourceKind },
}

/// A well-formed resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    kind: ResourceKind,
    value: String,
}

impl ResourceId {
    /// Parse an id of any kind.
    pub fn parse(raw: &str) -> Result<Self, ResourceIdError> {
        let malformed = || ResourceIdError::Malformed(raw.to_owned());
        let (prefix, suffix) = raw.split_once('-').ok_or_else(malformed)?;
        let kind = ResourceKind::from_prefix(prefix).ok_or_else(malformed)?;
        let hex_ok = suffix.len() == SUFFIX_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !hex_ok {
            return Err(malformed());
        }
        Ok(Self {
            kind,
            value: raw.to_owned(),
        })
    }

    /// Parse an id and require it to identify a resource of `kind`.
    pub fn parse_kind(kind: ResourceKind, raw: &str) -> Result<Self, ResourceIdError> {
        let id = Self::parse(raw)?;
        if id.kind != kind {
            return Err(ResourceIdError::WrongKind {
                id: raw.to_owned(),
                expected: kind,
            });
        }
        Ok(id)
    }

    /// Generate a fresh random id for a new resource.
    pub fn generate(kind: ResourceKind) -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self {
            kind,
            value: format!("{}-{}", kind.prefix(), &hex[..SUFFIX_LEN]),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
