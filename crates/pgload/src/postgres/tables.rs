//! Merging raw catalog rows into relation-level descriptors.

use super::types::parse_type;
use crate::catalog::{ColumnRow, ForeignKeyRow, RelationRow};
use crate::{Error, Result};
use indexmap::IndexMap;
use pgload_schema::{Column, ForeignKey, RelKind, Sequence, Table};

/// Flag each relation whose keys are not assigned by a sequence.
///
/// A relation has a manual primary key unless some sequence of the schema
/// belongs to it. Output keeps the order of `relations`.
pub fn mark_manual_primary_keys(
    relations: Vec<RelationRow>,
    sequences: &[Sequence],
) -> Result<Vec<Table>> {
    relations
        .into_iter()
        .map(|row| {
            let kind = RelKind::from_code(&row.kind)
                .ok_or_else(|| Error::UnknownRelKind { code: row.kind })?;
            let manual_primary_key = !sequences.iter().any(|s| s.table_name == row.name);
            Ok(Table {
                name: row.name,
                kind,
                manual_primary_key,
            })
        })
        .collect()
}

/// Attach a canonical type to a catalog column.
pub fn column_from_row(row: ColumnRow) -> Column {
    let nullable = !row.not_null;
    let ty = parse_type(&row.native_type, nullable);
    Column {
        ordinal: row.ordinal,
        name: row.name,
        native_type: row.native_type,
        nullable,
        default: row.default,
        primary_key: row.primary_key,
        ty,
    }
}

/// Group per-column foreign key rows by constraint, keeping the order in
/// which constraints and their column pairs were listed.
pub fn group_foreign_keys(rows: Vec<ForeignKeyRow>) -> Vec<ForeignKey> {
    let mut grouped: IndexMap<String, ForeignKey> = IndexMap::new();
    for row in rows {
        let fk = grouped
            .entry(row.constraint.clone())
            .or_insert_with(|| ForeignKey {
                name: row.constraint,
                columns: Vec::new(),
                references_table: row.references_table,
                references_columns: Vec::new(),
            });
        fk.columns.push(row.column);
        fk.references_columns.push(row.references_column);
    }
    grouped.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(kind: &str, name: &str) -> RelationRow {
        RelationRow {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    fn sequence(table_name: &str) -> Sequence {
        Sequence {
            table_name: table_name.to_string(),
        }
    }

    #[test]
    fn test_manual_primary_keys() {
        let tables = mark_manual_primary_keys(
            vec![relation("r", "orders"), relation("r", "users")],
            &[sequence("users")],
        )
        .unwrap();

        assert_eq!(
            tables,
            vec![
                Table {
                    name: "orders".to_string(),
                    kind: RelKind::Table,
                    manual_primary_key: true,
                },
                Table {
                    name: "users".to_string(),
                    kind: RelKind::Table,
                    manual_primary_key: false,
                },
            ]
        );
    }

    #[test]
    fn test_no_sequences_means_all_manual() {
        let tables =
            mark_manual_primary_keys(vec![relation("v", "active_users")], &[]).unwrap();
        assert_eq!(tables[0].kind, RelKind::View);
        assert!(tables[0].manual_primary_key);
    }

    #[test]
    fn test_unknown_relkind() {
        let err = mark_manual_primary_keys(vec![relation("m", "stats")], &[]).unwrap_err();
        assert!(matches!(err, Error::UnknownRelKind { code } if code == "m"));
    }

    #[test]
    fn test_column_from_row() {
        let column = column_from_row(ColumnRow {
            ordinal: 2,
            name: "price".to_string(),
            native_type: "numeric(10,2)".to_string(),
            not_null: false,
            default: Some("0".to_string()),
            primary_key: false,
        });
        assert!(column.nullable);
        assert_eq!(column.ty.type_name, "Float8");
        assert_eq!(column.ty.precision, 10);
        assert_eq!(column.native_type, "numeric(10,2)");
        assert_eq!(column.default.as_deref(), Some("0"));
    }

    #[test]
    fn test_group_foreign_keys() {
        let row = |constraint: &str, column: &str, table: &str, references: &str| ForeignKeyRow {
            constraint: constraint.to_string(),
            column: column.to_string(),
            references_table: table.to_string(),
            references_column: references.to_string(),
        };

        let fks = group_foreign_keys(vec![
            row("line_order_fk", "order_id", "orders", "id"),
            row("line_variant_fk", "product_id", "variants", "product_id"),
            row("line_variant_fk", "variant_no", "variants", "no"),
        ]);

        assert_eq!(fks.len(), 2);
        assert_eq!(fks[0].name, "line_order_fk");
        assert_eq!(fks[0].columns, vec!["order_id"]);
        assert_eq!(fks[1].references_table, "variants");
        assert_eq!(fks[1].columns, vec!["product_id", "variant_no"]);
        assert_eq!(fks[1].references_columns, vec!["product_id", "no"]);
    }
}
