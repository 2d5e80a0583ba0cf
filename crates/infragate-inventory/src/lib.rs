//! infragate inventory: a SurrealDB-backed implementation of the
//! [`InventoryClient`](infragate_core::inventory::InventoryClient) contract.
//!
//! This crate provides:
//! - Start-up: connect, migrate, open the store ([`connect`], [`open`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The resource store ([`SurrealInventory`])
//! - Filter expression evaluation ([`filter::Predicate`])
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod filter;
mod graph;
mod schema;
mod store;

pub use connection::{DbConfig, connect, open};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
pub use store::SurrealInventory;
