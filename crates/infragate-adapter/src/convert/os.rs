use infragate_core::models::OperatingSystemResource;

use super::{enum_in, enum_out, id_out, list_in, list_out, text_in, text_out, timestamps_out};
use crate::error::ConvertError;
use crate::wire::OperatingSystem;

fn sha256_in(value: &Option<String>) -> Result<String, ConvertError> {
    let digest = text_in(value);
    let well_formed = digest.len() == 64
        && digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if digest.is_empty() || well_formed {
        Ok(digest)
    } else {
        Err(ConvertError::InvalidValue {
            field: "sha256",
            reason: "expected 64 lowercase hex characters".into(),
        })
    }
}

pub fn to_internal(wire: &OperatingSystem) -> Result<OperatingSystemResource, ConvertError> {
    Ok(OperatingSystemResource {
        name: text_in(&wire.name),
        architecture: text_in(&wire.architecture),
        kernel_command: text_in(&wire.kernel_command),
        update_sources: list_in(&wire.update_sources),
        image_url: text_in(&wire.image_url),
        image_id: text_in(&wire.image_id),
        sha256: sha256_in(&wire.sha256)?,
        profile_name: text_in(&wire.profile_name),
        profile_version: text_in(&wire.profile_version),
        installed_packages: text_in(&wire.installed_packages),
        security_feature: enum_in("securityFeature", &wire.security_feature)?,
        os_type: enum_in("osType", &wire.os_type)?,
        os_provider: enum_in("osProvider", &wire.os_provider)?,
        ..Default::default()
    })
}

pub fn from_internal(os: &OperatingSystemResource) -> Result<OperatingSystem, ConvertError> {
    Ok(OperatingSystem {
        resource_id: id_out(&os.resource_id),
        name: text_out(&os.name),
        architecture: text_out(&os.architecture),
        kernel_command: text_out(&os.kernel_command),
        update_sources: list_out(&os.update_sources),
        image_url: text_out(&os.image_url),
        image_id: text_out(&os.image_id),
        sha256: text_out(&os.sha256),
        profile_name: text_out(&os.profile_name),
        profile_version: text_out(&os.profile_version),
        installed_packages: text_out(&os.installed_packages),
        security_feature: enum_out(os.security_feature),
        os_type: enum_out(os.os_type),
        os_provider: enum_out(os.os_provider),
        timestamps: timestamps_out(os.timestamps),
    })
}
