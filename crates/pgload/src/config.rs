//! Loader configuration.
//!
//! Defaults match what a generator wants most of the time: the `public`
//! schema, user columns only, and query shapes discovered through a
//! temporary view. [`LoaderConfig::from_env`] reads overrides from the
//! environment (and `.env`).

use crate::{Error, Result};
use std::str::FromStr;

/// How the shape of an ad-hoc query is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryShapeStrategy {
    /// Materialize the query as a temporary view and list its columns like a table.
    #[default]
    TransientView,
    /// Prepare the query and read the result metadata of the statement.
    Describe,
}

impl FromStr for QueryShapeStrategy {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "view" | "transient-view" => Ok(QueryShapeStrategy::TransientView),
            "describe" | "prepare" => Ok(QueryShapeStrategy::Describe),
            _ => Err(()),
        }
    }
}

/// Configuration for the Postgres loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Schema used when the caller doesn't name one.
    pub default_schema: String,
    /// Include system columns (`oid`, `ctid`, ...) in column listings.
    pub system_columns: bool,
    /// Strategy for [`crate::SchemaLoader::query_column_list`].
    pub query_shape: QueryShapeStrategy,
    /// Prefix of generated temporary view names.
    pub view_prefix: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_schema: "public".to_string(),
            system_columns: false,
            query_shape: QueryShapeStrategy::default(),
            view_prefix: "_pgload_".to_string(),
        }
    }
}

impl LoaderConfig {
    pub const SCHEMA_VAR: &'static str = "PGLOAD_SCHEMA";
    pub const SYSTEM_COLUMNS_VAR: &'static str = "PGLOAD_SYSTEM_COLUMNS";
    pub const QUERY_SHAPE_VAR: &'static str = "PGLOAD_QUERY_SHAPE";

    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }

    pub fn with_system_columns(mut self, enabled: bool) -> Self {
        self.system_columns = enabled;
        self
    }

    pub fn with_query_shape(mut self, strategy: QueryShapeStrategy) -> Self {
        self.query_shape = strategy;
        self
    }

    pub fn with_view_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.view_prefix = prefix.into();
        self
    }

    /// Read configuration from the process environment, loading `.env` first
    /// if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(schema) = lookup(Self::SCHEMA_VAR).filter(|s| !s.trim().is_empty()) {
            config.default_schema = schema.trim().to_string();
        }

        if let Some(value) = lookup(Self::SYSTEM_COLUMNS_VAR) {
            config.system_columns = parse_flag(&value).ok_or_else(|| Error::InvalidConfig {
                key: Self::SYSTEM_COLUMNS_VAR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(Self::QUERY_SHAPE_VAR) {
            config.query_shape = value.parse().map_err(|()| Error::InvalidConfig {
                key: Self::QUERY_SHAPE_VAR,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
