//! Schema types for pgload.
//!
//! This crate contains the types shared between the catalog layer (raw rows
//! read from the database) and the loaders that turn them into canonical
//! descriptors for code generation.

use indexmap::IndexMap;
use std::fmt;

/// Kind of relation to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelKind {
    /// A regular table.
    Table,
    /// A view.
    View,
}

impl RelKind {
    /// The native `pg_class.relkind` code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            RelKind::Table => "r",
            RelKind::View => "v",
        }
    }

    /// Parse a native relkind code. Returns `None` for kinds pgload doesn't load
    /// (sequences, indexes, materialized views, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "r" => Some(RelKind::Table),
            "v" => Some(RelKind::View),
            _ => None,
        }
    }
}

impl fmt::Display for RelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelKind::Table => write!(f, "table"),
            RelKind::View => write!(f, "view"),
        }
    }
}

/// Canonical type families.
///
/// Every native type spelling a loader understands maps onto one of these.
/// Each family carries its own null state, so nullability never changes the
/// family a column maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalType {
    Bool,
    Text,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bytea,
    Json,
    Jsonb,
    Date,
    Timestamp,
    Timestamptz,
    Interval,
    /// The single-byte internal `"char"` type.
    QChar,
    Bit,
    Uuid,
    /// Dedicated array representation for UUIDs.
    UuidArray,
}

impl CanonicalType {
    /// The canonical type name.
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalType::Bool => "Bool",
            CanonicalType::Text => "Text",
            CanonicalType::Int2 => "Int2",
            CanonicalType::Int4 => "Int4",
            CanonicalType::Int8 => "Int8",
            CanonicalType::Float4 => "Float4",
            CanonicalType::Float8 => "Float8",
            CanonicalType::Bytea => "Bytea",
            CanonicalType::Json => "Json",
            CanonicalType::Jsonb => "Jsonb",
            CanonicalType::Date => "Date",
            CanonicalType::Timestamp => "Timestamp",
            CanonicalType::Timestamptz => "Timestamptz",
            CanonicalType::Interval => "Interval",
            CanonicalType::QChar => "QChar",
            CanonicalType::Bit => "Bit",
            CanonicalType::Uuid => "Uuid",
            CanonicalType::UuidArray => "UuidArray",
        }
    }

    /// Literal expression for the zero value of this type.
    pub fn zero_value(&self) -> String {
        default_literal(self.name())
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zero value used for set-returning types, where the element type is not
/// spelled out at the use site.
pub const NIL_ZERO_VALUE: &str = "Default::default()";

/// Zero value of a sequence-shaped type.
pub const EMPTY_SEQUENCE_ZERO_VALUE: &str = "Vec::new()";

/// Default-construction literal for a named type.
pub fn default_literal(type_name: &str) -> String {
    format!("{type_name}::default()")
}

/// Canonical description of a column or return type.
///
/// Produced fresh for every column and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Leading precision qualifier of the native type, 0 if there was none.
    pub precision: u32,
    /// Literal expression for the zero value.
    pub zero_value: String,
    /// Canonical type name.
    pub type_name: String,
}

impl TypeDescriptor {
    /// A scalar of one of the canonical families.
    pub fn scalar(ty: CanonicalType, precision: u32) -> Self {
        Self {
            precision,
            zero_value: ty.zero_value(),
            type_name: ty.name().to_string(),
        }
    }

    /// A user-defined (enum or composite) type, already cased as an identifier.
    pub fn user_defined(type_name: impl Into<String>, precision: u32) -> Self {
        let type_name = type_name.into();
        Self {
            precision,
            zero_value: default_literal(&type_name),
            type_name,
        }
    }

    /// A sequence of `element`, as used for native array types.
    pub fn sequence_of(element: &str, precision: u32) -> Self {
        Self {
            precision,
            zero_value: EMPTY_SEQUENCE_ZERO_VALUE.to_string(),
            type_name: format!("Vec<{element}>"),
        }
    }

    /// The result of a set-returning function yielding `inner` rows.
    pub fn set_of(inner: &TypeDescriptor) -> Self {
        Self {
            precision: 0,
            zero_value: NIL_ZERO_VALUE.to_string(),
            type_name: format!("Vec<{}>", inner.type_name),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precision > 0 {
            write!(f, "{}({})", self.type_name, self.precision)
        } else {
            f.write_str(&self.type_name)
        }
    }
}

/// A relation (table or view) in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Relation name
    pub name: String,
    /// Whether this is a table or a view
    pub kind: RelKind,
    /// True unless a sequence in the schema is owned by this table, in which
    /// case generated code can leave key values to the database.
    pub manual_primary_key: bool,
}

/// A sequence, identified by the table it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub table_name: String,
}

/// A column of a relation, with its canonical type attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Attribute number (1-based for user columns, negative for system columns)
    pub ordinal: i16,
    /// Column name
    pub name: String,
    /// Native type spelling, as rendered by the database
    pub native_type: String,
    /// Whether the column allows NULL
    pub nullable: bool,
    /// Default value expression (if any)
    pub default: Option<String>,
    /// Whether this column is part of the primary key
    pub primary_key: bool,
    /// Canonical type
    pub ty: TypeDescriptor,
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    /// Constraint name
    pub name: String,
    /// Column(s) in this table
    pub columns: Vec<String>,
    /// Referenced table
    pub references_table: String,
    /// Referenced column(s), paired positionally with `columns`
    pub references_columns: Vec<String>,
}

/// An index on a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name
    pub name: String,
    /// Whether this is a unique index
    pub unique: bool,
    /// Whether this index backs the primary key
    pub primary: bool,
}

/// A column participating in an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumn {
    /// Position in the (unordered) catalog listing
    pub seq_no: i64,
    /// Attribute number of the column in its table
    pub column_id: i16,
    /// Column name
    pub name: String,
}

/// A user-defined enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
}

/// A label of an enum type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub label: String,
    pub sort_order: f32,
}

/// A stored function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proc {
    pub name: String,
    /// Native spelling of the result type, e.g. `SETOF integer`
    pub return_type: String,
}

/// A parameter of a stored function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcParam {
    /// Native spelling of the parameter type
    pub param_type: String,
}

/// Everything loaded for one relation.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub table: Table,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
    /// Indexes with their columns in declared order
    pub indexes: Vec<(Index, Vec<IndexColumn>)>,
}

impl TableInfo {
    /// Columns that make up the primary key, in attribute order.
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }
}

/// A stored function with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcInfo {
    pub proc: Proc,
    pub params: Vec<ProcParam>,
    /// Canonical result type
    pub return_type: TypeDescriptor,
}

/// A snapshot of one database schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Schema (namespace) name
    pub name: String,
    /// Tables and views, indexed by name
    pub tables: IndexMap<String, TableInfo>,
    /// Enum types with their labels
    pub enums: IndexMap<String, Vec<EnumValue>>,
    /// Stored functions
    pub procs: Vec<ProcInfo>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.get(name)
    }

    /// Iterate over all tables and views.
    pub fn iter_tables(&self) -> impl Iterator<Item = &TableInfo> {
        self.tables.values()
    }
}
