//! Postgres schema introspection for code generators.
//!
//! This crate provides:
//! - A [`SchemaLoader`] operation set that generator frameworks drive
//! - [`PgLoader`], which answers it from the Postgres system catalogs
//! - Translation of native type spellings into canonical [`TypeDescriptor`]s
//! - Result-shape discovery for ad-hoc queries
//! - [`introspect`], which snapshots a whole schema in one call
//!
//! Every statement runs through [`TracedConn`], so `RUST_LOG=pgload=debug`
//! shows what the loader asked the catalog.
//!
//! ```ignore
//! use pgload::{LoaderConfig, LoaderRegistry};
//!
//! let registry = LoaderRegistry::with_postgres(LoaderConfig::from_env()?);
//! let loader = registry.get("postgres")?;
//! let schema = pgload::introspect(loader, &client, "public").await?;
//! for table in schema.iter_tables() {
//!     println!("{} ({} columns)", table.table.name, table.columns.len());
//! }
//! ```

pub mod catalog;
mod config;
mod error;
mod introspect;
mod loader;
pub mod postgres;
mod traced;

pub use config::{LoaderConfig, QueryShapeStrategy};
pub use error::Error;
pub use introspect::introspect;
pub use loader::{LoaderRegistry, SchemaLoader};
pub use postgres::PgLoader;
pub use traced::{BoxFuture, Connection, ConnectionExt, TracedConn};

// Re-export the data model for convenience
pub use pgload_schema::*;

pub type Result<T> = std::result::Result<T, Error>;
