//! Ordering index columns by their declared position.

use crate::{Error, Result};
use pgload_schema::IndexColumn;

/// Order `columns` by the space-separated attribute numbers in `ordinals`.
///
/// The result has one entry per ordinal token. A token that is not an
/// attribute number, or names no column in `columns`, fails the call; the
/// error names `table` (schema-qualified by the caller) and `index`.
pub fn order_index_columns(
    columns: &[IndexColumn],
    ordinals: &str,
    table: &str,
    index: &str,
) -> Result<Vec<IndexColumn>> {
    ordinals
        .split_whitespace()
        .map(|token| {
            let column_id: i16 = token.parse().map_err(|_| Error::InvalidIndexOrdinal {
                table: table.to_string(),
                index: index.to_string(),
                token: token.to_string(),
            })?;
            columns
                .iter()
                .find(|c| c.column_id == column_id)
                .cloned()
                .ok_or_else(|| Error::MissingIndexColumn {
                    table: table.to_string(),
                    index: index.to_string(),
                    column_id,
                })
        })
        .collect()
}

/// `schema.table`, or just `table` for an empty schema.
pub fn qualified_table(schema: &str, table: &str) -> String {
    if schema.is_empty() {
        table.to_string()
    } else {
        format!("{schema}.{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn column(seq_no: i64, column_id: i16, name: &str) -> IndexColumn {
        IndexColumn {
            seq_no,
            column_id,
            name: name.to_string(),
        }
    }

    fn abc() -> Vec<IndexColumn> {
        vec![column(1, 1, "a"), column(2, 2, "b"), column(3, 3, "c")]
    }

    fn names(columns: &[IndexColumn]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_declared_order() {
        let ordered = order_index_columns(&abc(), "2 1 3", "public.t", "t_idx").unwrap();
        assert_eq!(names(&ordered), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_repeated_ordinal() {
        let ordered = order_index_columns(&abc(), "3 3", "public.t", "t_idx").unwrap();
        assert_eq!(names(&ordered), vec!["c", "c"]);
    }

    #[test]
    fn test_empty_ordinals() {
        let ordered = order_index_columns(&abc(), "", "public.t", "t_idx").unwrap();
        assert!(ordered.is_empty());
    }

    #[test]
    fn test_expression_column_is_missing() {
        // expression index entries have attribute number 0
        let err = order_index_columns(&abc(), "1 0", "public.t", "t_lower_idx").unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not find public.t index t_lower_idx column id 0"
        );
    }

    #[test]
    fn test_invalid_token() {
        let err = order_index_columns(&abc(), "1 x", "public.t", "t_idx").unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not convert public.t index t_idx column x to int"
        );
    }

    #[test]
    fn test_qualified_table() {
        assert_eq!(qualified_table("public", "users"), "public.users");
        assert_eq!(qualified_table("", "users"), "users");
    }

    proptest! {
        #[test]
        fn prop_one_entry_per_token(ids in proptest::collection::vec(1i16..=3, 0..10)) {
            let ordinals = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let ordered = order_index_columns(&abc(), &ordinals, "public.t", "t_idx").unwrap();
            prop_assert_eq!(ordered.len(), ids.len());
            for (column, id) in ordered.iter().zip(&ids) {
                prop_assert_eq!(column.column_id, *id);
            }
        }
    }
}
