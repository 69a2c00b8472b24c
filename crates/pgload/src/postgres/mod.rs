//! The Postgres schema loader.
//!
//! [`PgLoader`] answers every [`SchemaLoader`] operation from the Postgres
//! system catalogs. The pure merging and parsing steps live in submodules so
//! they can be tested without a database.

mod index;
mod query;
mod strip;
mod tables;
pub mod types;

pub use index::{order_index_columns, qualified_table};
pub use query::{single_namespace, transient_view_name};
pub use strip::query_strip;
pub use tables::{column_from_row, group_foreign_keys, mark_manual_primary_keys};
pub use types::parse_type;

use crate::catalog;
use crate::{BoxFuture, Connection, LoaderConfig, QueryShapeStrategy, Result, SchemaLoader};
use pgload_schema::{
    Column, Enum, EnumValue, ForeignKey, Index, IndexColumn, Proc, ProcParam, RelKind, Table,
    TypeDescriptor,
};

/// Loads schema information from a Postgres database.
#[derive(Debug, Clone, Default)]
pub struct PgLoader {
    config: LoaderConfig,
}

impl PgLoader {
    pub const NAME: &'static str = "postgres";

    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl SchemaLoader for PgLoader {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rel_kind_code(&self, kind: RelKind) -> &'static str {
        kind.code()
    }

    fn default_schema<'a>(&'a self, _conn: &'a dyn Connection) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move { Ok(self.config.default_schema.clone()) })
    }

    fn parse_type(&self, native: &str, nullable: bool) -> TypeDescriptor {
        parse_type(native, nullable)
    }

    fn enum_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Enum>>> {
        Box::pin(catalog::enums(conn, schema))
    }

    fn enum_value_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        enum_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<EnumValue>>> {
        Box::pin(catalog::enum_values(conn, schema, enum_name))
    }

    fn proc_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Proc>>> {
        Box::pin(catalog::procs(conn, schema))
    }

    fn proc_param_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        proc_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ProcParam>>> {
        Box::pin(catalog::proc_params(conn, schema, proc_name))
    }

    fn table_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        kind: RelKind,
    ) -> BoxFuture<'a, Result<Vec<Table>>> {
        Box::pin(async move {
            let relations = catalog::relations(conn, schema, kind.code()).await?;

            // Sequence ownership only refines the primary key flag, so a
            // failed lookup degrades to "every key is manual".
            let sequences = match catalog::sequences(conn, schema).await {
                Ok(sequences) => sequences,
                Err(e) => {
                    tracing::warn!(%schema, error = %e, "could not list sequences");
                    Vec::new()
                }
            };

            mark_manual_primary_keys(relations, &sequences)
        })
    }

    fn column_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Column>>> {
        Box::pin(async move {
            let rows = catalog::columns(conn, schema, table, self.config.system_columns).await?;
            Ok(rows.into_iter().map(column_from_row).collect())
        })
    }

    fn foreign_key_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ForeignKey>>> {
        Box::pin(async move {
            let rows = catalog::foreign_keys(conn, schema, table).await?;
            Ok(group_foreign_keys(rows))
        })
    }

    fn index_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Index>>> {
        Box::pin(catalog::indexes(conn, schema, table))
    }

    fn index_column_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        schema: &'a str,
        table: &'a str,
        index: &'a str,
    ) -> BoxFuture<'a, Result<Vec<IndexColumn>>> {
        Box::pin(async move {
            let columns = catalog::index_columns(conn, schema, index).await?;
            let order = catalog::index_column_order(conn, schema, index).await?;
            tracing::debug!(%index, ordinals = %order.ordinals, "ordering index columns");
            order_index_columns(
                &columns,
                &order.ordinals,
                &qualified_table(schema, table),
                index,
            )
        })
    }

    fn query_strip(&self, query: &mut [String], comments: &mut Vec<String>) {
        query_strip(query, comments)
    }

    fn query_column_list<'a>(
        &'a self,
        conn: &'a dyn Connection,
        query: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Column>>> {
        Box::pin(async move {
            match self.config.query_shape {
                QueryShapeStrategy::TransientView => {
                    query::via_transient_view(
                        conn,
                        query,
                        &self.config.view_prefix,
                        self.config.system_columns,
                    )
                    .await
                }
                QueryShapeStrategy::Describe => query::via_describe(conn, query).await,
            }
        })
    }
}
