//! Adapter configuration.

/// Configuration for the inventory adapter.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Page size used when a list request does not name one (default: 20).
    pub default_page_size: u32,
    /// Largest page size a caller may request (default: 100).
    pub max_page_size: u32,
    /// Per-kind result cap of the location hierarchy query (default: 100).
    pub max_location_results: u32,
    /// How many levels of nested related resources reads expand
    /// (default: 2). At 0 only related ids are returned.
    pub nesting_depth: u8,
    /// Deadline applied to each backend call when the request context
    /// carries none, in seconds (default: 30).
    pub backend_timeout_secs: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            max_location_results: 100,
            nesting_depth: 2,
            backend_timeout_secs: 30,
        }
    }
}
