use infragate_core::id::ResourceKind;
use infragate_core::models::{InstanceResource, WorkloadMemberResource, WorkloadResource};

use super::{
    enum_in, enum_out, id_out, instance, nested, parse_id, text_in, text_out, timestamps_out,
};
use crate::error::ConvertError;
use crate::relation::{self, Requirement};
use crate::wire::{Workload, WorkloadMember};

/// Members are a derived view and are not accepted on writes.
pub fn workload_to_internal(wire: &Workload) -> Result<WorkloadResource, ConvertError> {
    Ok(WorkloadResource {
        kind: enum_in("kind", &wire.kind)?,
        name: text_in(&wire.name),
        external_id: text_in(&wire.external_id),
        status: text_in(&wire.status),
        ..Default::default()
    })
}

pub fn workload_from_internal(
    workload: &WorkloadResource,
    depth: u8,
) -> Result<Workload, ConvertError> {
    let members = workload
        .members
        .iter()
        .map(|m| member_from_internal(m, depth.saturating_sub(1)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Workload {
        resource_id: id_out(&workload.resource_id),
        kind: enum_out(workload.kind),
        name: text_out(&workload.name),
        external_id: text_out(&workload.external_id),
        status: text_out(&workload.status),
        members: Some(members),
        timestamps: timestamps_out(workload.timestamps),
    })
}

fn required_id(
    field: &'static str,
    kind: ResourceKind,
    value: &Option<String>,
) -> Result<String, ConvertError> {
    let Some((_, raw)) =
        relation::validate_exclusive(&[(field, value.as_deref())], Requirement::Required)?
    else {
        return Err(ConvertError::MissingField(field));
    };
    Ok(parse_id(field, kind, raw)?.to_string())
}

pub fn validate_member(wire: &WorkloadMember) -> Result<(), ConvertError> {
    for candidate in [
        ("workloadId", wire.workload_id.as_deref()),
        ("instanceId", wire.instance_id.as_deref()),
    ] {
        relation::validate_exclusive(&[candidate], Requirement::Required)?;
    }
    Ok(())
}

pub fn member_to_internal(wire: &WorkloadMember) -> Result<WorkloadMemberResource, ConvertError> {
    let workload = required_id("workloadId", ResourceKind::Workload, &wire.workload_id)?;
    let instance = required_id("instanceId", ResourceKind::Instance, &wire.instance_id)?;
    Ok(WorkloadMemberResource {
        kind: enum_in("kind", &wire.kind)?,
        workload: Some(WorkloadResource::stub(workload)),
        instance: Some(InstanceResource::stub(instance)),
        ..Default::default()
    })
}

pub fn member_from_internal(
    member: &WorkloadMemberResource,
    depth: u8,
) -> Result<WorkloadMember, ConvertError> {
    Ok(WorkloadMember {
        resource_id: id_out(&member.resource_id),
        kind: enum_out(member.kind),
        workload_id: member.workload.as_ref().map(|w| w.resource_id.clone()),
        instance_id: member.instance.as_ref().map(|i| i.resource_id.clone()),
        instance: nested(member.instance.as_deref(), depth, instance::from_internal)?,
        timestamps: timestamps_out(member.timestamps),
    })
}
