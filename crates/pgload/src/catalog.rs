//! Catalog query layer.
//!
//! Thin functions that run one catalog query each and decode the raw rows.
//! They know nothing about canonical types; the loaders build on top of them.

use crate::{Connection, ConnectionExt, Result};
use pgload_schema::{Enum, EnumValue, Index, IndexColumn, Proc, ProcParam, Sequence};
use pgload_sql::catalog as sql;

/// A relation as listed by the catalog, before sequence enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRow {
    /// Native relkind code
    pub kind: String,
    pub name: String,
}

/// A column as listed by the catalog, before type translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub ordinal: i16,
    pub name: String,
    /// Output of `format_type`
    pub native_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub primary_key: bool,
}

/// One column pair of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRow {
    pub constraint: String,
    pub column: String,
    pub references_table: String,
    pub references_column: String,
}

/// The declared column order of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumnOrder {
    /// Space-separated attribute numbers, e.g. `"2 1 3"`
    pub ordinals: String,
}

pub async fn relations(
    conn: &dyn Connection,
    schema: &str,
    relkind: &str,
) -> Result<Vec<RelationRow>> {
    let rows = conn.traced().query(sql::RELATIONS, &[&schema, &relkind]).await?;
    rows.iter()
        .map(|row| {
            Ok(RelationRow {
                kind: row.try_get(0)?,
                name: row.try_get(1)?,
            })
        })
        .collect()
}

pub async fn sequences(conn: &dyn Connection, schema: &str) -> Result<Vec<Sequence>> {
    let rows = conn.traced().query(sql::SEQUENCES, &[&schema]).await?;
    rows.iter()
        .map(|row| {
            Ok(Sequence {
                table_name: row.try_get(0)?,
            })
        })
        .collect()
}

pub async fn enums(conn: &dyn Connection, schema: &str) -> Result<Vec<Enum>> {
    let rows = conn.traced().query(sql::ENUMS, &[&schema]).await?;
    rows.iter()
        .map(|row| Ok(Enum { name: row.try_get(0)? }))
        .collect()
}

pub async fn enum_values(
    conn: &dyn Connection,
    schema: &str,
    enum_name: &str,
) -> Result<Vec<EnumValue>> {
    let rows = conn
        .traced()
        .query(sql::ENUM_VALUES, &[&schema, &enum_name])
        .await?;
    rows.iter()
        .map(|row| {
            Ok(EnumValue {
                label: row.try_get(0)?,
                sort_order: row.try_get(1)?,
            })
        })
        .collect()
}

pub async fn procs(conn: &dyn Connection, schema: &str) -> Result<Vec<Proc>> {
    let rows = conn.traced().query(sql::PROCS, &[&schema]).await?;
    rows.iter()
        .map(|row| {
            Ok(Proc {
                name: row.try_get(0)?,
                return_type: row.try_get(1)?,
            })
        })
        .collect()
}

pub async fn proc_params(
    conn: &dyn Connection,
    schema: &str,
    proc_name: &str,
) -> Result<Vec<ProcParam>> {
    let rows = conn
        .traced()
        .query(sql::PROC_PARAMS, &[&schema, &proc_name])
        .await?;
    rows.iter()
        .map(|row| {
            Ok(ProcParam {
                param_type: row.try_get(0)?,
            })
        })
        .collect()
}

pub async fn columns(
    conn: &dyn Connection,
    schema: &str,
    table: &str,
    system_columns: bool,
) -> Result<Vec<ColumnRow>> {
    let rows = conn
        .traced()
        .query(sql::COLUMNS, &[&schema, &table, &system_columns])
        .await?;
    rows.iter()
        .map(|row| {
            Ok(ColumnRow {
                ordinal: row.try_get(0)?,
                name: row.try_get(1)?,
                native_type: row.try_get(2)?,
                not_null: row.try_get(3)?,
                default: row.try_get(4)?,
                primary_key: row.try_get(5)?,
            })
        })
        .collect()
}

pub async fn foreign_keys(
    conn: &dyn Connection,
    schema: &str,
    table: &str,
) -> Result<Vec<ForeignKeyRow>> {
    let rows = conn
        .traced()
        .query(sql::FOREIGN_KEYS, &[&schema, &table])
        .await?;
    rows.iter()
        .map(|row| {
            Ok(ForeignKeyRow {
                constraint: row.try_get(0)?,
                column: row.try_get(1)?,
                references_table: row.try_get(2)?,
                references_column: row.try_get(3)?,
            })
        })
        .collect()
}

pub async fn indexes(conn: &dyn Connection, schema: &str, table: &str) -> Result<Vec<Index>> {
    let rows = conn.traced().query(sql::INDEXES, &[&schema, &table]).await?;
    rows.iter()
        .map(|row| {
            Ok(Index {
                name: row.try_get(0)?,
                unique: row.try_get(1)?,
                primary: row.try_get(2)?,
            })
        })
        .collect()
}

pub async fn index_columns(
    conn: &dyn Connection,
    schema: &str,
    index: &str,
) -> Result<Vec<IndexColumn>> {
    let rows = conn
        .traced()
        .query(sql::INDEX_COLUMNS, &[&schema, &index])
        .await?;
    rows.iter()
        .map(|row| {
            Ok(IndexColumn {
                seq_no: row.try_get(0)?,
                column_id: row.try_get(1)?,
                name: row.try_get(2)?,
            })
        })
        .collect()
}

pub async fn index_column_order(
    conn: &dyn Connection,
    schema: &str,
    index: &str,
) -> Result<IndexColumnOrder> {
    let row = conn
        .traced()
        .query_one(sql::INDEX_COLUMN_ORDER, &[&schema, &index])
        .await?;
    Ok(IndexColumnOrder {
        ordinals: row.try_get(0)?,
    })
}

/// Session-temporary namespaces that hold a relation named `relation`.
pub async fn temp_namespaces(
    conn: &dyn Connection,
    relation: &str,
) -> std::result::Result<Vec<String>, tokio_postgres::Error> {
    let rows = conn.traced().query(sql::TEMP_NAMESPACE, &[&relation]).await?;
    rows.iter().map(|row| row.try_get(0)).collect()
}

/// Native spelling of the type with the given oid.
pub async fn format_type(conn: &dyn Connection, oid: u32) -> Result<String> {
    let row = conn.traced().query_one(sql::FORMAT_TYPE, &[&oid]).await?;
    Ok(row.try_get(0)?)
}
