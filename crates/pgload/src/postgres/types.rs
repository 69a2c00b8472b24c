//! Native Postgres type spellings to canonical descriptors.

use pgload_schema::{CanonicalType, TypeDescriptor};
use regex::Regex;
use std::sync::LazyLock;

static PRECISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)(?:\s*,\s*\d+)?\)").expect("valid precision pattern"));

/// Prefix `pg_get_function_result` uses for set-returning functions.
pub const SETOF_PREFIX: &str = "SETOF ";

/// Suffix of array types as rendered by `format_type`.
pub const ARRAY_SUFFIX: &str = "[]";

/// Native base type names (as rendered by `format_type`, qualifiers removed)
/// and the canonical family each belongs to.
pub const NATIVE_FAMILIES: &[(&str, CanonicalType)] = &[
    ("boolean", CanonicalType::Bool),
    ("character", CanonicalType::Text),
    ("character varying", CanonicalType::Text),
    ("text", CanonicalType::Text),
    ("money", CanonicalType::Text),
    ("inet", CanonicalType::Text),
    ("smallint", CanonicalType::Int2),
    ("smallserial", CanonicalType::Int2),
    ("integer", CanonicalType::Int4),
    ("serial", CanonicalType::Int4),
    ("bigint", CanonicalType::Int8),
    ("bigserial", CanonicalType::Int8),
    ("real", CanonicalType::Float4),
    ("double precision", CanonicalType::Float8),
    ("numeric", CanonicalType::Float8),
    ("bytea", CanonicalType::Bytea),
    ("json", CanonicalType::Json),
    ("jsonb", CanonicalType::Jsonb),
    ("date", CanonicalType::Date),
    ("timestamp with time zone", CanonicalType::Timestamptz),
    ("time with time zone", CanonicalType::Timestamptz),
    ("timestamp without time zone", CanonicalType::Timestamp),
    ("time without time zone", CanonicalType::Timestamp),
    ("interval", CanonicalType::Interval),
    ("\"char\"", CanonicalType::QChar),
    ("bit", CanonicalType::Bit),
    ("uuid", CanonicalType::Uuid),
];

/// Native base types with a dedicated array family. Every other array becomes
/// a sequence of its element type.
pub const NATIVE_ARRAY_FAMILIES: &[(&str, CanonicalType)] = &[("uuid", CanonicalType::UuidArray)];

/// Look up the canonical family of a native base type name.
pub fn native_family(base: &str) -> Option<CanonicalType> {
    lookup(NATIVE_FAMILIES, base)
}

fn lookup(table: &[(&str, CanonicalType)], base: &str) -> Option<CanonicalType> {
    table
        .iter()
        .find(|(native, _)| *native == base)
        .map(|(_, ty)| *ty)
}

/// Translate a native type spelling into a canonical descriptor.
///
/// Handles `SETOF` results, `[]` arrays, and `(precision[,scale])`
/// qualifiers. Names outside the family table are treated as user-defined
/// enum or composite types and cased as identifiers.
///
/// Canonical families carry their own null state, so `nullable` does not
/// change the result; set-returning element types are always translated as
/// non-null.
pub fn parse_type(native: &str, _nullable: bool) -> TypeDescriptor {
    let native = native.trim();

    if let Some(inner) = native.strip_prefix(SETOF_PREFIX) {
        let inner = parse_type(inner, false);
        return TypeDescriptor::set_of(&inner);
    }

    let (native, is_array) = match native.strip_suffix(ARRAY_SUFFIX) {
        Some(element) => (element, true),
        None => (native, false),
    };

    let (base, precision) = parse_precision(native);

    if is_array {
        if let Some(ty) = lookup(NATIVE_ARRAY_FAMILIES, &base) {
            return TypeDescriptor::scalar(ty, precision);
        }
        let element = match native_family(&base) {
            Some(ty) => ty.name().to_string(),
            None => camel_identifier(&base),
        };
        return TypeDescriptor::sequence_of(&element, precision);
    }

    match native_family(&base) {
        Some(ty) => TypeDescriptor::scalar(ty, precision),
        None => TypeDescriptor::user_defined(camel_identifier(&base), precision),
    }
}

/// Split a `(precision[, scale])` qualifier out of a native type spelling.
///
/// The first qualifier is removed wherever it appears, so both
/// `numeric(10,2)` and `timestamp(3) with time zone` reduce to their base
/// names. Returns precision 0 when there is no qualifier.
pub fn parse_precision(native: &str) -> (String, u32) {
    let Some(caps) = PRECISION.captures(native) else {
        return (native.to_string(), 0);
    };
    let Ok(precision) = caps[1].parse::<u32>() else {
        return (native.to_string(), 0);
    };

    let qualifier = caps.get(0).map(|m| m.range()).unwrap_or_default();
    let base = format!(
        "{} {}",
        native[..qualifier.start].trim_end(),
        native[qualifier.end..].trim_start()
    );
    (base.trim().to_string(), precision)
}

/// Turn a native type name into an UpperCamelCase identifier:
/// `order_status` -> `OrderStatus`, `public.mood` -> `PublicMood`.
pub fn camel_identifier(native: &str) -> String {
    let mut out = String::with_capacity(native.len());
    for word in native
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    if out.is_empty() {
        return "Unknown".to_string();
    }
    if out.starts_with(|c: char| !c.is_alphabetic()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests;
