//! Result shapes of ad-hoc queries.

use super::tables::column_from_row;
use crate::catalog::{self, ColumnRow};
use crate::{Connection, ConnectionExt, Error, Result};
use pgload_schema::Column;
use pgload_sql::{PG_IDENT_MAX, create_temp_view_sql};

/// A fresh, collision-free name for a transient view.
///
/// The random suffix is always kept whole; a prefix that would push the name
/// past [`PG_IDENT_MAX`] bytes is cut back to the nearest character boundary.
pub fn transient_view_name(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let mut end = prefix.len().min(PG_IDENT_MAX - suffix.len());
    while !prefix.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{suffix}", &prefix[..end])
}

/// Pick the one session namespace holding the transient view.
pub fn single_namespace(view: &str, mut found: Vec<String>) -> Result<String> {
    match found.len() {
        0 => Err(Error::TempNamespaceNotFound {
            view: view.to_string(),
        }),
        1 => Ok(found.remove(0)),
        _ => Err(Error::TempNamespaceAmbiguous {
            view: view.to_string(),
            found,
        }),
    }
}

/// Materialize `query` as a temporary view and list the view's columns.
///
/// The view is left in place; it lives in the session's temporary schema and
/// disappears with the session.
pub async fn via_transient_view(
    conn: &dyn Connection,
    query: &[String],
    view_prefix: &str,
    system_columns: bool,
) -> Result<Vec<Column>> {
    let view = transient_view_name(view_prefix);
    tracing::debug!(%view, lines = query.len(), "creating transient view");

    let sql = create_temp_view_sql(&view, query);
    conn.traced()
        .execute(&sql, &[])
        .await
        .map_err(|source| Error::CreateView {
            view: view.clone(),
            source,
        })?;

    let found = catalog::temp_namespaces(conn, &view)
        .await
        .map_err(|source| Error::TempNamespace {
            view: view.clone(),
            source,
        })?;
    let namespace = single_namespace(&view, found)?;
    tracing::debug!(%view, %namespace, "found transient view");

    let rows = catalog::columns(conn, &namespace, &view, system_columns)
        .await
        .map_err(|source| Error::QueryColumns {
            view: view.clone(),
            source: Box::new(source),
        })?;
    Ok(rows.into_iter().map(column_from_row).collect())
}

/// Prepare `query` and read the result columns from the statement metadata.
///
/// Statement metadata carries no nullability, so every column is reported
/// as nullable.
pub async fn via_describe(conn: &dyn Connection, query: &[String]) -> Result<Vec<Column>> {
    let sql = query.join("\n");
    let stmt = conn.traced().prepare(&sql).await?;

    let mut columns = Vec::with_capacity(stmt.columns().len());
    for (i, col) in stmt.columns().iter().enumerate() {
        let native_type = catalog::format_type(conn, col.type_().oid()).await?;
        columns.push(described_column(i, col.name(), native_type));
    }
    Ok(columns)
}

fn described_column(index: usize, name: &str, native_type: String) -> Column {
    let row = ColumnRow {
        ordinal: i16::try_from(index + 1).unwrap_or(i16::MAX),
        name: name.to_string(),
        native_type,
        not_null: false,
        default: None,
        primary_key: false,
    };
    column_from_row(row)
}
