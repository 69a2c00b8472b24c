//! Whole-schema snapshots.

use crate::{Connection, Result, SchemaLoader};
use pgload_schema::{ProcInfo, RelKind, Schema, TableInfo};
use tracing::Instrument;

/// Load every table, view, enum and stored function of `schema` through
/// `loader`.
///
/// Tables come before views, each in catalog order. Index columns are in
/// their declared order. Runs one operation at a time on `conn`.
pub async fn introspect(
    loader: &dyn SchemaLoader,
    conn: &dyn Connection,
    schema: &str,
) -> Result<Schema> {
    let span = tracing::debug_span!("introspect", loader = loader.name(), %schema);
    load(loader, conn, schema).instrument(span).await
}

async fn load(loader: &dyn SchemaLoader, conn: &dyn Connection, schema: &str) -> Result<Schema> {
    let mut snapshot = Schema::new(schema);

    for kind in [RelKind::Table, RelKind::View] {
        for table in loader.table_list(conn, schema, kind).await? {
            let columns = loader.column_list(conn, schema, &table.name).await?;
            let foreign_keys = loader.foreign_key_list(conn, schema, &table.name).await?;

            let mut indexes = Vec::new();
            for index in loader.index_list(conn, schema, &table.name).await? {
                let index_columns = loader
                    .index_column_list(conn, schema, &table.name, &index.name)
                    .await?;
                indexes.push((index, index_columns));
            }

            tracing::debug!(
                table = %table.name,
                %kind,
                columns = columns.len(),
                indexes = indexes.len(),
                "loaded relation"
            );
            snapshot.tables.insert(
                table.name.clone(),
                TableInfo {
                    table,
                    columns,
                    foreign_keys,
                    indexes,
                },
            );
        }
    }

    for e in loader.enum_list(conn, schema).await? {
        let values = loader.enum_value_list(conn, schema, &e.name).await?;
        snapshot.enums.insert(e.name, values);
    }

    for proc in loader.proc_list(conn, schema).await? {
        let params = loader.proc_param_list(conn, schema, &proc.name).await?;
        let return_type = loader.parse_type(&proc.return_type, false);
        snapshot.procs.push(ProcInfo {
            proc,
            params,
            return_type,
        });
    }

    Ok(snapshot)
}
