//! Catalog queries against `pg_catalog`.
//!
//! Parameters are positional; each constant documents what it binds and the
//! columns it returns.

/// Relations of one kind in a schema.
///
/// `$1` schema, `$2` relkind code. Returns `(relkind text, relname)`.
pub const RELATIONS: &str = "\
SELECT c.relkind::text, c.relname::text \
FROM pg_class c \
JOIN pg_namespace n ON n.oid = c.relnamespace \
WHERE n.nspname = $1 AND c.relkind::text = $2 \
ORDER BY c.relname";

/// Tables that own a sequence.
///
/// `$1` schema. Returns `(table name)`, one row per owned sequence.
pub const SEQUENCES: &str = "\
SELECT t.relname::text \
FROM pg_class s \
JOIN pg_depend d ON d.objid = s.oid AND d.refclassid = 'pg_class'::regclass \
JOIN pg_class t ON t.oid = d.refobjid \
JOIN pg_namespace n ON n.oid = s.relnamespace \
WHERE n.nspname = $1 AND s.relkind = 'S'";

/// Enum types in a schema.
///
/// `$1` schema. Returns `(type name)`.
pub const ENUMS: &str = "\
SELECT DISTINCT t.typname::text \
FROM pg_type t \
JOIN pg_namespace n ON n.oid = t.typnamespace \
JOIN pg_enum e ON e.enumtypid = t.oid \
WHERE n.nspname = $1 \
ORDER BY 1";

/// Labels of one enum type.
///
/// `$1` schema, `$2` type name. Returns `(label, sort order real)`.
pub const ENUM_VALUES: &str = "\
SELECT e.enumlabel::text, e.enumsortorder \
FROM pg_type t \
JOIN pg_namespace n ON n.oid = t.typnamespace \
JOIN pg_enum e ON e.enumtypid = t.oid \
WHERE n.nspname = $1 AND t.typname = $2 \
ORDER BY e.enumsortorder";

/// Plain functions in a schema.
///
/// `$1` schema. Returns `(name, result type)`.
pub const PROCS: &str = "\
SELECT p.proname::text, COALESCE(pg_get_function_result(p.oid), '') \
FROM pg_proc p \
JOIN pg_namespace n ON n.oid = p.pronamespace \
WHERE n.nspname = $1 AND p.prokind = 'f' \
ORDER BY p.proname";

/// Argument types of a function.
///
/// `$1` schema, `$2` function name. Returns `(type)`.
pub const PROC_PARAMS: &str = "\
SELECT unnest(string_to_array(oidvectortypes(p.proargtypes), ', ')) \
FROM pg_proc p \
JOIN pg_namespace n ON n.oid = p.pronamespace \
WHERE n.nspname = $1 AND p.proname = $2";

/// Columns of a relation.
///
/// `$1` schema, `$2` relation, `$3` include system columns (bool).
/// Returns `(attnum int2, name, formatted type, not null, default, primary key)`.
pub const COLUMNS: &str = "\
SELECT a.attnum, a.attname::text, format_type(a.atttypid, a.atttypmod), a.attnotnull, \
pg_get_expr(ad.adbin, ad.adrelid), COALESCE(ct.contype = 'p', false) \
FROM pg_attribute a \
JOIN pg_class c ON c.oid = a.attrelid \
JOIN pg_namespace n ON n.oid = c.relnamespace \
LEFT JOIN pg_constraint ct ON ct.conrelid = c.oid AND a.attnum = ANY(ct.conkey) AND ct.contype = 'p' \
LEFT JOIN pg_attrdef ad ON ad.adrelid = c.oid AND ad.adnum = a.attnum \
WHERE NOT a.attisdropped AND n.nspname = $1 AND c.relname = $2 AND ($3 OR a.attnum > 0) \
ORDER BY a.attnum";

/// Foreign keys of a table, one row per column pair.
///
/// `$1` schema, `$2` table. Returns `(constraint, column, referenced table,
/// referenced column)` ordered by constraint then key position.
pub const FOREIGN_KEYS: &str = "\
SELECT r.conname::text, b.attname::text, fc.relname::text, f.attname::text \
FROM pg_constraint r \
JOIN pg_class c ON c.oid = r.conrelid \
JOIN pg_namespace n ON n.oid = c.relnamespace \
JOIN pg_class fc ON fc.oid = r.confrelid \
CROSS JOIN LATERAL unnest(r.conkey, r.confkey) WITH ORDINALITY AS k(attnum, fattnum, ord) \
JOIN pg_attribute b ON b.attrelid = r.conrelid AND b.attnum = k.attnum \
JOIN pg_attribute f ON f.attrelid = r.confrelid AND f.attnum = k.fattnum \
WHERE r.contype = 'f' AND n.nspname = $1 AND c.relname = $2 \
ORDER BY r.conname, k.ord";

/// Column indexes of a table (expression-only indexes are skipped).
///
/// `$1` schema, `$2` table. Returns `(index name, unique, primary)`.
pub const INDEXES: &str = "\
SELECT ic.relname::text, i.indisunique, i.indisprimary \
FROM pg_index i \
JOIN pg_class c ON c.oid = i.indrelid \
JOIN pg_namespace n ON n.oid = c.relnamespace \
JOIN pg_class ic ON ic.oid = i.indexrelid \
WHERE i.indkey::text <> '0' AND n.nspname = $1 AND c.relname = $2 \
ORDER BY ic.relname";

/// Columns of an index, in no particular order.
///
/// `$1` schema, `$2` index. Returns `(seq no int8, attnum int2, name)`.
pub const INDEX_COLUMNS: &str = "\
SELECT row_number() OVER (), a.attnum, a.attname::text \
FROM pg_index i \
JOIN pg_class ic ON ic.oid = i.indexrelid \
JOIN pg_namespace n ON n.oid = ic.relnamespace \
JOIN pg_attribute a ON a.attrelid = i.indrelid AND a.attnum = ANY(i.indkey) AND NOT a.attisdropped \
WHERE n.nspname = $1 AND ic.relname = $2";

/// Declared column order of an index as a space-separated list of attnums.
///
/// `$1` schema, `$2` index. Returns `(ordinals text)`.
pub const INDEX_COLUMN_ORDER: &str = "\
SELECT i.indkey::text \
FROM pg_index i \
JOIN pg_class ic ON ic.oid = i.indexrelid \
JOIN pg_namespace n ON n.oid = ic.relnamespace \
WHERE n.nspname = $1 AND ic.relname = $2";

/// Session-temporary namespaces holding a relation.
///
/// `$1` relation name. Returns `(namespace)`.
pub const TEMP_NAMESPACE: &str = "\
SELECT n.nspname::text \
FROM pg_class c \
JOIN pg_namespace n ON n.oid = c.relnamespace \
WHERE n.nspname LIKE 'pg_temp%' AND c.relname = $1";

/// Native spelling of a type oid.
///
/// `$1` type oid. Returns `(formatted type)`.
pub const FORMAT_TYPE: &str = "SELECT format_type($1, NULL)";
