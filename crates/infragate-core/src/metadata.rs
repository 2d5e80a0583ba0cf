//! Resource metadata: an ordered sequence of key/value items stored by the
//! backend as a JSON string.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Decode a stored metadata blob. The empty string is the empty sequence.
pub fn decode(raw: &str) -> Result<Vec<MetadataItem>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Encode metadata for storage. The empty sequence encodes to `""`.
pub fn encode(items: &[MetadataItem]) -> Result<String, serde_json::Error> {
    if items.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string(items)
}
