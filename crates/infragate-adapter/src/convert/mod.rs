//! Per-kind conversion between wire records and internal resources.
//!
//! Writes (`to_internal`) map scalars 1:1, turn set relation ids into edge
//! stubs and validate; read-only wire fields are ignored. Reads
//! (`from_internal`) echo every scalar and relation id and expand nested
//! related records while `depth > 0`.

pub mod host;
pub mod instance;
pub mod os;
pub mod provider;
pub mod region;
pub mod schedule;
pub mod site;
pub mod telemetry;
pub mod workload;

use infragate_core::id::{ResourceId, ResourceKind};
use infragate_core::metadata::{self, MetadataItem};
use infragate_core::models::Timestamps;
use infragate_core::models::enums::{
    CollectorKind, HostState, InstanceKind, InstanceState, OsProviderKind, OsType, PowerState,
    ProviderKind, ProviderVendor, ScheduleStatus, SecurityFeature, SeverityLevel, WorkloadKind,
    WorkloadMemberKind,
};

use crate::error::ConvertError;
use crate::presence::{self, Presence};
use crate::wire;

/// String-valued enums carried on the wire.
pub(crate) trait WireEnum: Copy + Default {
    fn from_wire(text: &str) -> Option<Self>;
    fn to_wire(self) -> &'static str;
}

macro_rules! wire_enum {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl WireEnum for $ty {
                fn from_wire(text: &str) -> Option<Self> {
                    <$ty>::parse(text)
                }

                fn to_wire(self) -> &'static str {
                    self.as_str()
                }
            }
        )+
    };
}

wire_enum!(
    CollectorKind,
    HostState,
    InstanceKind,
    InstanceState,
    OsProviderKind,
    OsType,
    PowerState,
    ProviderKind,
    ProviderVendor,
    ScheduleStatus,
    SecurityFeature,
    SeverityLevel,
    WorkloadKind,
    WorkloadMemberKind,
);

/// Absent and empty values map to the unspecified variant.
pub(crate) fn enum_in<E: WireEnum>(
    field: &'static str,
    value: &Option<String>,
) -> Result<E, ConvertError> {
    match value.as_deref() {
        None | Some("") => Ok(E::default()),
        Some(text) => E::from_wire(text).ok_or_else(|| ConvertError::InvalidEnum {
            field,
            value: text.to_owned(),
        }),
    }
}

pub(crate) fn enum_out<E: WireEnum>(value: E) -> Option<String> {
    Some(value.to_wire().to_owned())
}

pub(crate) fn text_in(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub(crate) fn text_out(value: &str) -> Option<String> {
    Some(value.to_owned())
}

pub(crate) fn list_in(value: &Option<Vec<String>>) -> Vec<String> {
    value.clone().unwrap_or_default()
}

pub(crate) fn list_out(value: &[String]) -> Option<Vec<String>> {
    Some(value.to_vec())
}

pub(crate) fn parse_id(
    field: &'static str,
    kind: ResourceKind,
    raw: &str,
) -> Result<ResourceId, ConvertError> {
    ResourceId::parse_kind(kind, raw).map_err(|source| ConvertError::InvalidId { field, source })
}

/// The target of a relation edge, when the wire id is set. A set id must
/// identify a resource of `kind`.
pub(crate) fn relation_in(
    field: &'static str,
    kind: ResourceKind,
    value: &Option<String>,
) -> Result<Option<ResourceId>, ConvertError> {
    match presence::classify(value.as_deref()) {
        Presence::Unset => Ok(None),
        Presence::Set(raw) => parse_id(field, kind, raw).map(Some),
    }
}

/// Id of a backend-assigned resource, omitted when empty.
pub(crate) fn id_out(resource_id: &str) -> Option<String> {
    presence::classify(Some(resource_id)).value().map(str::to_owned)
}

/// Expand a nested related record one level down, or not at all at depth 0.
pub(crate) fn nested<T, W>(
    edge: Option<&T>,
    depth: u8,
    convert: impl FnOnce(&T, u8) -> Result<W, ConvertError>,
) -> Result<Option<Box<W>>, ConvertError> {
    match (edge, depth.checked_sub(1)) {
        (Some(inner), Some(next)) => convert(inner, next).map(|w| Some(Box::new(w))),
        _ => Ok(None),
    }
}

pub(crate) fn metadata_in(value: &Option<Vec<MetadataItem>>) -> Result<String, ConvertError> {
    let items = value.as_deref().unwrap_or_default();
    for (i, item) in items.iter().enumerate() {
        if item.key.trim().is_empty() {
            return Err(ConvertError::InvalidValue {
                field: "metadata",
                reason: "keys must not be empty".into(),
            });
        }
        if items[..i].iter().any(|earlier| earlier.key == item.key) {
            return Err(ConvertError::InvalidValue {
                field: "metadata",
                reason: format!("duplicate key {:?}", item.key),
            });
        }
    }
    Ok(metadata::encode(items)?)
}

pub(crate) fn metadata_out(raw: &str) -> Result<Option<Vec<MetadataItem>>, ConvertError> {
    Ok(Some(metadata::decode(raw)?))
}

/// Inherited metadata is decoded only when the backend rendered it, and is
/// the empty sequence otherwise.
pub(crate) fn inherited_out(
    rendered: Option<&str>,
) -> Result<Option<Vec<MetadataItem>>, ConvertError> {
    let items = match rendered {
        Some(raw) => metadata::decode(raw)?,
        None => Vec::new(),
    };
    Ok(Some(items))
}

pub(crate) fn timestamps_out(timestamps: Option<Timestamps>) -> Option<wire::Timestamps> {
    timestamps.map(|t| wire::Timestamps {
        created_at: Some(t.created_at),
        updated_at: Some(t.updated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_reject_unknown_values() {
        let state: HostState = enum_in("desiredState", &None).unwrap();
        assert!(state.is_unspecified());
        let state: HostState =
            enum_in("desiredState", &Some("HOST_STATE_ONBOARDED".into())).unwrap();
        assert_eq!(state, HostState::Onboarded);
        let err = enum_in::<HostState>("desiredState", &Some("ONBOARDED".into())).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidEnum { field: "desiredState", .. }));
    }

    #[test]
    fn relation_ids_follow_presence() {
        assert_eq!(relation_in("siteId", ResourceKind::Site, &None).unwrap(), None);
        assert_eq!(relation_in("siteId", ResourceKind::Site, &Some(String::new())).unwrap(), None);
        assert!(relation_in("siteId", ResourceKind::Site, &Some(" ".into())).is_err());
        assert!(relation_in("siteId", ResourceKind::Site, &Some("host-0000abcd".into())).is_err());
        let id = relation_in("siteId", ResourceKind::Site, &Some("site-0000abcd".into()))
            .unwrap()
            .unwrap();
        assert_eq!(id.as_str(), "site-0000abcd");
    }

    #[test]
    fn nested_stops_at_depth_zero() {
        let expanded = nested(Some(&1u8), 1, |v, next| Ok((*v, next))).unwrap();
        assert_eq!(expanded, Some(Box::new((1, 0))));
        let stopped = nested(Some(&1u8), 0, |v, next| Ok((*v, next))).unwrap();
        assert_eq!(stopped, None);
    }

    #[test]
    fn metadata_keys_are_checked() {
        let dup = Some(vec![MetadataItem::new("a", "1"), MetadataItem::new("a", "2")]);
        assert!(metadata_in(&dup).is_err());
        let blank = Some(vec![MetadataItem::new(" ", "1")]);
        assert!(metadata_in(&blank).is_err());
        assert_eq!(metadata_in(&None).unwrap(), "");
    }

    #[test]
    fn inherited_metadata_is_never_omitted() {
        assert_eq!(inherited_out(None).unwrap(), Some(Vec::new()));
        assert!(inherited_out(Some("{oops")).is_err());
    }
}
