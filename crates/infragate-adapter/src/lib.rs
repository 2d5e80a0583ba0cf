//! infragate adapter: translation and partial-update engine between the
//! public wire schema and the internal inventory resource graph.
//!
//! The adapter stores nothing. Every operation converts the caller's wire
//! payload, issues a small constant number of backend calls through an
//! [`InventoryClient`](infragate_core::inventory::InventoryClient) and
//! converts the result back.

pub mod config;
pub mod context;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod filter;
pub mod hierarchy;
pub mod page;
pub mod presence;
pub mod relation;
pub mod service;
pub mod wire;

pub use config::AdapterConfig;
pub use context::RequestContext;
pub use dispatch::{ApiKind, ApiResource, Request, Response, WireResource};
pub use error::ConvertError;
pub use page::ListEnvelope;
pub use service::InventoryAdapter;
