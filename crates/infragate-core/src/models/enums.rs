//! Enumerations shared by the internal resources.
//!
//! Every enum has a stable string form used both by the backend and on the
//! wire (e.g. `HOST_STATE_ONBOARDED`).

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            pub fn parse(text: &str) -> Option<Self> {
                match text {
                    $( $text => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn is_unspecified(self) -> bool {
                self == Self::default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Lifecycle state of a host.
    pub enum HostState {
        #[default]
        Unspecified => "HOST_STATE_UNSPECIFIED",
        Deleted => "HOST_STATE_DELETED",
        Error => "HOST_STATE_ERROR",
        Onboarded => "HOST_STATE_ONBOARDED",
        Registered => "HOST_STATE_REGISTERED",
        Untrusted => "HOST_STATE_UNTRUSTED",
    }
}

string_enum! {
    pub enum PowerState {
        #[default]
        Unspecified => "POWER_STATE_UNSPECIFIED",
        On => "POWER_STATE_ON",
        Off => "POWER_STATE_OFF",
    }
}

string_enum! {
    pub enum InstanceState {
        #[default]
        Unspecified => "INSTANCE_STATE_UNSPECIFIED",
        Running => "INSTANCE_STATE_RUNNING",
        Deleted => "INSTANCE_STATE_DELETED",
        Untrusted => "INSTANCE_STATE_UNTRUSTED",
    }
}

string_enum! {
    pub enum InstanceKind {
        #[default]
        Unspecified => "INSTANCE_KIND_UNSPECIFIED",
        Metal => "INSTANCE_KIND_METAL",
    }
}

string_enum! {
    pub enum SecurityFeature {
        #[default]
        Unspecified => "SECURITY_FEATURE_UNSPECIFIED",
        None => "SECURITY_FEATURE_NONE",
        SecureBootAndFullDiskEncryption => "SECURITY_FEATURE_SECURE_BOOT_AND_FULL_DISK_ENCRYPTION",
    }
}

string_enum! {
    pub enum OsType {
        #[default]
        Unspecified => "OS_TYPE_UNSPECIFIED",
        Mutable => "OS_TYPE_MUTABLE",
        Immutable => "OS_TYPE_IMMUTABLE",
    }
}

string_enum! {
    pub enum OsProviderKind {
        #[default]
        Unspecified => "OS_PROVIDER_KIND_UNSPECIFIED",
        Infra => "OS_PROVIDER_KIND_INFRA",
        Lenovo => "OS_PROVIDER_KIND_LENOVO",
    }
}

string_enum! {
    /// Purpose of a maintenance schedule.
    pub enum ScheduleStatus {
        #[default]
        Unspecified => "SCHEDULE_STATUS_UNSPECIFIED",
        Maintenance => "SCHEDULE_STATUS_MAINTENANCE",
        Shipping => "SCHEDULE_STATUS_SHIPPING",
        OsUpdate => "SCHEDULE_STATUS_OS_UPDATE",
        FirmwareUpdate => "SCHEDULE_STATUS_FIRMWARE_UPDATE",
        ClusterUpdate => "SCHEDULE_STATUS_CLUSTER_UPDATE",
    }
}

string_enum! {
    pub enum WorkloadKind {
        #[default]
        Unspecified => "WORKLOAD_KIND_UNSPECIFIED",
        Cluster => "WORKLOAD_KIND_CLUSTER",
    }
}

string_enum! {
    pub enum WorkloadMemberKind {
        #[default]
        Unspecified => "WORKLOAD_MEMBER_KIND_UNSPECIFIED",
        ClusterNode => "WORKLOAD_MEMBER_KIND_CLUSTER_NODE",
    }
}

string_enum! {
    pub enum ProviderKind {
        #[default]
        Unspecified => "PROVIDER_KIND_UNSPECIFIED",
        Baremetal => "PROVIDER_KIND_BAREMETAL",
    }
}

string_enum! {
    pub enum ProviderVendor {
        #[default]
        Unspecified => "PROVIDER_VENDOR_UNSPECIFIED",
        LenovoLxca => "PROVIDER_VENDOR_LENOVO_LXCA",
        LenovoLoca => "PROVIDER_VENDOR_LENOVO_LOCA",
    }
}

string_enum! {
    /// Distinguishes logs from metrics telemetry groups and profiles.
    pub enum TelemetryKind {
        #[default]
        Unspecified => "TELEMETRY_RESOURCE_KIND_UNSPECIFIED",
        Metrics => "TELEMETRY_RESOURCE_KIND_METRICS",
        Logs => "TELEMETRY_RESOURCE_KIND_LOGS",
    }
}

string_enum! {
    pub enum CollectorKind {
        #[default]
        Unspecified => "COLLECTOR_KIND_UNSPECIFIED",
        Host => "COLLECTOR_KIND_HOST",
        Cluster => "COLLECTOR_KIND_CLUSTER",
    }
}

string_enum! {
    pub enum SeverityLevel {
        #[default]
        Unspecified => "SEVERITY_LEVEL_UNSPECIFIED",
        Critical => "SEVERITY_LEVEL_CRITICAL",
        Error => "SEVERITY_LEVEL_ERROR",
        Warn => "SEVERITY_LEVEL_WARN",
        Info => "SEVERITY_LEVEL_INFO",
        Debug => "SEVERITY_LEVEL_DEBUG",
    }
}
