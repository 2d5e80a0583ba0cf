//! Environment configuration.
//!
//! Every setting has a default; `INFRAGATE_*` variables override them.

use std::str::FromStr;

use infragate_adapter::AdapterConfig;
use infragate_inventory::DbConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub db: DbConfig,
    pub adapter: AdapterConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let db = &mut config.db;
        text(&lookup, "INFRAGATE_DB_URL", &mut db.url);
        text(&lookup, "INFRAGATE_DB_NAMESPACE", &mut db.namespace);
        text(&lookup, "INFRAGATE_DB_DATABASE", &mut db.database);
        text(&lookup, "INFRAGATE_DB_USERNAME", &mut db.username);
        text(&lookup, "INFRAGATE_DB_PASSWORD", &mut db.password);

        let adapter = &mut config.adapter;
        number(&lookup, "INFRAGATE_DEFAULT_PAGE_SIZE", &mut adapter.default_page_size)?;
        number(&lookup, "INFRAGATE_MAX_PAGE_SIZE", &mut adapter.max_page_size)?;
        number(&lookup, "INFRAGATE_MAX_LOCATION_RESULTS", &mut adapter.max_location_results)?;
        number(&lookup, "INFRAGATE_NESTING_DEPTH", &mut adapter.nesting_depth)?;
        number(&lookup, "INFRAGATE_BACKEND_TIMEOUT_SECS", &mut adapter.backend_timeout_secs)?;

        if adapter.default_page_size == 0 || adapter.default_page_size > adapter.max_page_size {
            return Err(ConfigError::Invalid {
                var: "INFRAGATE_DEFAULT_PAGE_SIZE",
                value: adapter.default_page_size.to_string(),
            });
        }
        Ok(config)
    }
}

fn text(lookup: &impl Fn(&str) -> Option<String>, var: &str, slot: &mut String) {
    if let Some(value) = lookup(var) {
        *slot = value;
    }
}

fn number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    slot: &mut T,
) -> Result<(), ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(());
    };
    *slot = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })?;
    Ok(())
}
