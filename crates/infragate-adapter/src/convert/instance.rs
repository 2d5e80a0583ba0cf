use infragate_core::id::ResourceKind;
use infragate_core::models::{HostResource, InstanceResource, OperatingSystemResource};

use super::{
    enum_in, enum_out, host, id_out, nested, os, relation_in, text_in, text_out, timestamps_out,
};
use crate::error::ConvertError;
use crate::relation::{self, Requirement};
use crate::wire::Instance;

/// A new instance must name the host it runs on and the OS it should run.
pub fn validate_create(wire: &Instance) -> Result<(), ConvertError> {
    relation::validate_exclusive(&[("hostId", wire.host_id.as_deref())], Requirement::Required)?;
    relation::validate_exclusive(&[("osId", wire.os_id.as_deref())], Requirement::Required)?;
    Ok(())
}

/// The running OS and the instance status are observed, not requested.
pub fn to_internal(wire: &Instance) -> Result<InstanceResource, ConvertError> {
    Ok(InstanceResource {
        name: text_in(&wire.name),
        kind: enum_in("kind", &wire.kind)?,
        desired_state: enum_in("desiredState", &wire.desired_state)?,
        security_feature: enum_in("securityFeature", &wire.security_feature)?,
        host: relation_in("hostId", ResourceKind::Host, &wire.host_id)?
            .map(|id| HostResource::stub(id.as_str())),
        desired_os: relation_in("osId", ResourceKind::OperatingSystem, &wire.os_id)?
            .map(|id| OperatingSystemResource::stub(id.as_str())),
        ..Default::default()
    })
}

pub fn from_internal(inst: &InstanceResource, depth: u8) -> Result<Instance, ConvertError> {
    Ok(Instance {
        resource_id: id_out(&inst.resource_id),
        name: text_out(&inst.name),
        kind: enum_out(inst.kind),
        desired_state: enum_out(inst.desired_state),
        current_state: enum_out(inst.current_state),
        security_feature: enum_out(inst.security_feature),
        instance_status: text_out(&inst.instance_status),
        host_id: inst.host.as_ref().map(|h| h.resource_id.clone()),
        host: nested(inst.host.as_deref(), depth, |h, d| host::from_internal(h, None, d))?,
        os_id: inst.desired_os.as_ref().map(|o| o.resource_id.clone()),
        desired_os: nested(inst.desired_os.as_deref(), depth, |o, _| os::from_internal(o))?,
        current_os_id: inst.current_os.as_ref().map(|o| o.resource_id.clone()),
        current_os: nested(inst.current_os.as_deref(), depth, |o, _| os::from_internal(o))?,
        timestamps: timestamps_out(inst.timestamps),
    })
}

#[cfg(test)]
mod tests {
    use infragate_core::models::enums::InstanceState;

    use super::*;

    #[test]
    fn create_requires_host_and_os() {
        let wire = Instance {
            host_id: Some("host-0000abcd".into()),
            ..Default::default()
        };
        assert!(matches!(
            validate_create(&wire),
            Err(ConvertError::MissingRelation { fields }) if fields == ["osId"]
        ));
        let wire = Instance {
            os_id: Some("os-0000abcd".into()),
            ..wire
        };
        assert!(validate_create(&wire).is_ok());
    }

    #[test]
    fn instance_round_trip_ignores_observed_state() {
        let wire = Instance {
            name: Some("vm-1".into()),
            kind: Some("INSTANCE_KIND_METAL".into()),
            desired_state: Some("INSTANCE_STATE_RUNNING".into()),
            current_state: Some("INSTANCE_STATE_UNTRUSTED".into()),
            host_id: Some("host-0000abcd".into()),
            os_id: Some("os-0000abcd".into()),
            current_os_id: Some("os-0000ffff".into()),
            ..Default::default()
        };
        let internal = to_internal(&wire).unwrap();
        assert_eq!(internal.desired_state, InstanceState::Running);
        assert!(internal.current_state.is_unspecified());
        assert!(internal.current_os.is_none());

        let back = from_internal(&internal, 1).unwrap();
        assert_eq!(back.name, wire.name);
        assert_eq!(back.kind, wire.kind);
        assert_eq!(back.desired_state, wire.desired_state);
        assert_eq!(back.host_id, wire.host_id);
        assert_eq!(back.os_id, wire.os_id);
        assert_eq!(back.host.unwrap().resource_id, wire.host_id);
        assert_eq!(back.current_os_id, None);
    }

    #[test]
    fn os_id_must_name_an_os() {
        let wire = Instance {
            os_id: Some("host-0000abcd".into()),
            ..Default::default()
        };
        assert!(matches!(
            to_internal(&wire),
            Err(ConvertError::InvalidId { field: "osId", .. })
        ));
    }
}
