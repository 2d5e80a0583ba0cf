use infragate_core::models::ProviderResource;

use super::{enum_in, enum_out, id_out, list_in, list_out, text_in, text_out, timestamps_out};
use crate::error::ConvertError;
use crate::wire::Provider;

fn required(field: &'static str, value: &Option<String>) -> Result<String, ConvertError> {
    let text = text_in(value);
    if text.trim().is_empty() {
        return Err(ConvertError::MissingField(field));
    }
    Ok(text)
}

pub fn to_internal(wire: &Provider) -> Result<ProviderResource, ConvertError> {
    let config = text_in(&wire.config);
    if !config.is_empty() {
        serde_json::from_str::<serde_json::Value>(&config).map_err(|e| ConvertError::InvalidValue {
            field: "config",
            reason: e.to_string(),
        })?;
    }
    Ok(ProviderResource {
        provider_kind: enum_in("providerKind", &wire.provider_kind)?,
        provider_vendor: enum_in("providerVendor", &wire.provider_vendor)?,
        name: required("name", &wire.name)?,
        api_endpoint: required("apiEndpoint", &wire.api_endpoint)?,
        api_credentials: list_in(&wire.api_credentials),
        config,
        ..Default::default()
    })
}

pub fn from_internal(provider: &ProviderResource) -> Result<Provider, ConvertError> {
    Ok(Provider {
        resource_id: id_out(&provider.resource_id),
        provider_kind: enum_out(provider.provider_kind),
        provider_vendor: enum_out(provider.provider_vendor),
        name: text_out(&provider.name),
        api_endpoint: text_out(&provider.api_endpoint),
        api_credentials: list_out(&provider.api_credentials),
        config: text_out(&provider.config),
        timestamps: timestamps_out(provider.timestamps),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> Provider {
        Provider {
            provider_kind: Some("PROVIDER_KIND_BAREMETAL".into()),
            provider_vendor: Some("PROVIDER_VENDOR_LENOVO_LXCA".into()),
            name: Some("lxca-1".into()),
            api_endpoint: Some("https://lxca.example/api".into()),
            api_credentials: Some(vec!["vault://lxca".into()]),
            config: Some(r#"{"autoProvision":true}"#.into()),
            ..Default::default()
        }
    }

    #[test]
    fn provider_round_trip() {
        let wire = provider();
        let back = from_internal(&to_internal(&wire).unwrap()).unwrap();
        assert_eq!(back.provider_kind, wire.provider_kind);
        assert_eq!(back.provider_vendor, wire.provider_vendor);
        assert_eq!(back.name, wire.name);
        assert_eq!(back.api_endpoint, wire.api_endpoint);
        assert_eq!(back.api_credentials, wire.api_credentials);
        assert_eq!(back.config, wire.config);
    }

    #[test]
    fn endpoint_is_required() {
        let wire = Provider {
            api_endpoint: None,
            ..provider()
        };
        assert!(matches!(
            to_internal(&wire),
            Err(ConvertError::MissingField("apiEndpoint"))
        ));
    }

    #[test]
    fn config_must_be_json() {
        let wire = Provider {
            config: Some("{autoProvision".into()),
            ..provider()
        };
        assert!(matches!(
            to_internal(&wire),
            Err(ConvertError::InvalidValue { field: "config", .. })
        ));
    }
}
