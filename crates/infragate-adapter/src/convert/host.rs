use infragate_core::id::ResourceKind;
use infragate_core::models::enums::HostState;
use infragate_core::models::{HostResource, SiteResource};
use uuid::Uuid;

use super::{
    enum_in, enum_out, id_out, inherited_out, instance, metadata_in, metadata_out, nested,
    relation_in, site, text_in, text_out, timestamps_out,
};
use crate::error::ConvertError;
use crate::page::narrow;
use crate::relation;
use crate::wire::{Host, HostRegister};

fn uuid_in(value: &Option<String>) -> Result<String, ConvertError> {
    let raw = text_in(value);
    if raw.is_empty() {
        return Ok(raw);
    }
    Uuid::parse_str(&raw)
        .map(|uuid| uuid.to_string())
        .map_err(|e| ConvertError::InvalidValue {
            field: "uuid",
            reason: e.to_string(),
        })
}

/// Current states, status and hardware inventory are reported by the
/// infrastructure itself and never taken from the caller.
pub fn to_internal(wire: &Host) -> Result<HostResource, ConvertError> {
    Ok(HostResource {
        name: text_in(&wire.name),
        uuid: uuid_in(&wire.uuid)?,
        serial_number: text_in(&wire.serial_number),
        hostname: text_in(&wire.hostname),
        note: text_in(&wire.note),
        desired_state: enum_in("desiredState", &wire.desired_state)?,
        desired_power_state: enum_in("desiredPowerState", &wire.desired_power_state)?,
        site: relation_in("siteId", ResourceKind::Site, &wire.site_id)?
            .map(|id| SiteResource::stub(id.as_str())),
        metadata: metadata_in(&wire.metadata)?,
        ..Default::default()
    })
}

pub fn from_internal(
    host: &HostResource,
    rendered: Option<&str>,
    depth: u8,
) -> Result<Host, ConvertError> {
    Ok(Host {
        resource_id: id_out(&host.resource_id),
        name: text_out(&host.name),
        uuid: text_out(&host.uuid),
        serial_number: text_out(&host.serial_number),
        hostname: text_out(&host.hostname),
        note: text_out(&host.note),
        desired_state: enum_out(host.desired_state),
        current_state: enum_out(host.current_state),
        desired_power_state: enum_out(host.desired_power_state),
        current_power_state: enum_out(host.current_power_state),
        host_status: text_out(&host.host_status),
        cpu_cores: Some(narrow("cpuCores", host.cpu_cores)?),
        memory_bytes: Some(host.memory_bytes),
        site_id: host.site.as_ref().map(|s| s.resource_id.clone()),
        site: nested(host.site.as_deref(), depth, |s, d| site::from_internal(s, None, d))?,
        instance: nested(host.instance.as_deref(), depth, instance::from_internal)?,
        metadata: metadata_out(&host.metadata)?,
        inherited_metadata: inherited_out(rendered)?,
        timestamps: timestamps_out(host.timestamps),
    })
}

fn registered_state(auto_onboard: Option<bool>) -> HostState {
    if auto_onboard.unwrap_or(false) {
        HostState::Onboarded
    } else {
        HostState::Registered
    }
}

/// A host announced before it is onboarded. At least one hardware
/// identifier is required.
pub fn register_to_internal(wire: &HostRegister) -> Result<HostResource, ConvertError> {
    relation::require_any(&[
        ("uuid", wire.uuid.as_deref()),
        ("serialNumber", wire.serial_number.as_deref()),
    ])?;
    Ok(HostResource {
        name: text_in(&wire.name),
        uuid: uuid_in(&wire.uuid)?,
        serial_number: text_in(&wire.serial_number),
        desired_state: registered_state(wire.auto_onboard),
        ..Default::default()
    })
}

/// Rename and re-register a known host. Identifiers are immutable here.
pub fn registration_update_to_internal(wire: &HostRegister) -> HostResource {
    HostResource {
        name: text_in(&wire.name),
        desired_state: registered_state(wire.auto_onboard),
        ..Default::default()
    }
}
