//! The operation set a database backend provides to the generator.
//!
//! A generator picks a backend from a [`LoaderRegistry`] built at startup and
//! calls into it through [`SchemaLoader`]; no backend is registered globally.

use crate::postgres::PgLoader;
use crate::{BoxFuture, Connection, Error, LoaderConfig, Result};
use indexmap::IndexMap;
use pgload_schema::{
    Column, Enum, EnumValue, ForeignKey, Index, IndexColumn, Proc, ProcParam, RelKind, Table,
    TypeDescriptor,
};

/// Schema discovery for one kind of database.
///
/// Every method that talks to the database takes the caller's connection, so
/// concurrent workers can each bring their own session.
pub trait SchemaLoader: Send + Sync {
    /// Backend name, e.g. `"postgres"`.
    fn name(&self) -> &'static str;

    /// Native code of a relation kind.
    fn rel_kind_code(&self, kind: RelKind) -> &'static str;

    /// Schema used when the caller doesn't name one.
    fn default_schema<'a>(&'a self, conn: &'a dyn Connection) -> BoxFuture<'a, Result<String>>;

    /// Translate a native type spelling into a canonical descriptor.
    fn parse_type(&self, native: &str, nullable: bool) -> TypeDescriptor;

    fn enum_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Enum>>>;

    fn enum_value_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        enum_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<EnumValue>>>;

    fn proc_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Proc>>>;

    fn proc_param_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        proc_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ProcParam>>>;

    /// Tables or views of a schema, flagged with whether their keys are
    /// assigned by the database.
    fn table_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        kind: RelKind,
    ) -> BoxFuture<'a, Result<Vec<Table>>>;

    /// Columns of a relation, in attribute order, with canonical types attached.
    fn column_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Column>>>;

    fn foreign_key_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ForeignKey>>>;

    fn index_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Index>>>;

    /// Columns of an index in their declared order.
    fn index_column_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
        index: &'a str,
    ) -> BoxFuture<'a, Result<Vec<IndexColumn>>>;

    /// Remove backend-specific cast annotations from query lines, recording
    /// what was removed from line `i` in `comments[i + 1]`.
    fn query_strip(&self, query: &mut [String], comments: &mut Vec<String>);

    /// Result columns of an arbitrary query.
    fn query_column_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        query: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Column>>>;
}

/// Backends available to a generator, by name.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: IndexMap<String, Box<dyn SchemaLoader>>,
}

impl LoaderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the Postgres loader under `"postgres"`.
    pub fn with_postgres(config: LoaderConfig) -> Self {
        let mut registry = Self::new();
        registry.register(PgLoader::new(config));
        registry
    }

    /// Register a loader under its own name, replacing any previous one.
    pub fn register(&mut self, loader: impl SchemaLoader + 'static) -> &mut Self {
        self.loaders
            .insert(loader.name().to_string(), Box::new(loader));
        self
    }

    /// Look up a loader by name.
    pub fn get(&self, name: &str) -> Result<&dyn SchemaLoader> {
        self.loaders
            .get(name)
            .map(|loader| &**loader)
            .ok_or_else(|| Error::UnknownLoader {
                name: name.to_string(),
            })
    }

    /// Names of all registered loaders, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(|k| k.as_str())
    }
}
