use infragate_core::id::ResourceKind;
use infragate_core::models::RegionResource;

use super::{
    id_out, inherited_out, metadata_in, metadata_out, nested, relation_in, text_in, text_out,
    timestamps_out,
};
use crate::error::ConvertError;
use crate::wire::Region;

pub fn to_internal(wire: &Region) -> Result<RegionResource, ConvertError> {
    Ok(RegionResource {
        name: text_in(&wire.name),
        parent_region: relation_in("parentId", ResourceKind::Region, &wire.parent_id)?
            .map(|id| RegionResource::stub(id.as_str())),
        metadata: metadata_in(&wire.metadata)?,
        ..Default::default()
    })
}

/// `totalSites` is left unset; it is only filled by region listings that
/// ask for it.
pub fn from_internal(
    region: &RegionResource,
    rendered: Option<&str>,
    depth: u8,
) -> Result<Region, ConvertError> {
    Ok(Region {
        resource_id: id_out(&region.resource_id),
        name: text_out(&region.name),
        parent_id: region.parent_region.as_ref().map(|p| p.resource_id.clone()),
        parent_region: nested(region.parent_region.as_deref(), depth, |p, d| {
            from_internal(p, None, d)
        })?,
        metadata: metadata_out(&region.metadata)?,
        inherited_metadata: inherited_out(rendered)?,
        total_sites: None,
        timestamps: timestamps_out(region.timestamps),
    })
}
