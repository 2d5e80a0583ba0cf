//! infragate core: the internal resource graph shared by the adapter and
//! its inventory backend.
//!
//! This crate provides:
//! - Resource kinds and identifiers ([`id::ResourceKind`], [`id::ResourceId`])
//! - The strongly-typed internal resources ([`models::Resource`])
//! - Field masks submitted with updates ([`field_mask::FieldMask`])
//! - Filter expression tokens shared by producers and evaluators ([`query`])
//! - The backend contract ([`inventory::InventoryClient`])
//! - Error kinds ([`error::InfraError`])

pub mod error;
pub mod field_mask;
pub mod id;
pub mod inventory;
pub mod metadata;
pub mod models;
pub mod query;

pub use error::{InfraError, InfraResult};
pub use field_mask::FieldMask;
pub use id::{ResourceId, ResourceIdError, ResourceKind};
pub use models::Resource;
