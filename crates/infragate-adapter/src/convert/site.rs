use infragate_core::id::ResourceKind;
use infragate_core::models::{RegionResource, SiteResource};

use super::{
    id_out, inherited_out, list_in, list_out, metadata_in, metadata_out, nested, region,
    relation_in, text_in, text_out, timestamps_out,
};
use crate::error::ConvertError;
use crate::wire::Site;

/// Coordinates are degrees scaled by 10^7.
const LAT_LIMIT: i32 = 900_000_000;
const LNG_LIMIT: i32 = 1_800_000_000;

fn coordinate(field: &'static str, value: Option<i32>, limit: i32) -> Result<i32, ConvertError> {
    let value = value.unwrap_or(0);
    if (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(ConvertError::InvalidValue {
            field,
            reason: format!("{value} is outside ±{limit}"),
        })
    }
}

pub fn to_internal(wire: &Site) -> Result<SiteResource, ConvertError> {
    Ok(SiteResource {
        name: text_in(&wire.name),
        region: relation_in("regionId", ResourceKind::Region, &wire.region_id)?
            .map(|id| RegionResource::stub(id.as_str())),
        address: text_in(&wire.address),
        site_lat: coordinate("siteLat", wire.site_lat, LAT_LIMIT)?,
        site_lng: coordinate("siteLng", wire.site_lng, LNG_LIMIT)?,
        dns_servers: list_in(&wire.dns_servers),
        metadata: metadata_in(&wire.metadata)?,
        ..Default::default()
    })
}

pub fn from_internal(
    site: &SiteResource,
    rendered: Option<&str>,
    depth: u8,
) -> Result<Site, ConvertError> {
    Ok(Site {
        resource_id: id_out(&site.resource_id),
        name: text_out(&site.name),
        region_id: site.region.as_ref().map(|r| r.resource_id.clone()),
        region: nested(site.region.as_deref(), depth, |r, d| region::from_internal(r, None, d))?,
        address: text_out(&site.address),
        site_lat: Some(site.site_lat),
        site_lng: Some(site.site_lng),
        dns_servers: list_out(&site.dns_servers),
        metadata: metadata_out(&site.metadata)?,
        inherited_metadata: inherited_out(rendered)?,
        timestamps: timestamps_out(site.timestamps),
    })
}
