use super::*;
use pgload_schema::{EMPTY_SEQUENCE_ZERO_VALUE, NIL_ZERO_VALUE};
use proptest::prelude::*;

fn parsed(native: &str) -> (u32, String, String) {
    let ty = parse_type(native, false);
    (ty.precision, ty.zero_value, ty.type_name)
}

#[test]
fn test_character_varying() {
    assert_eq!(
        parsed("character varying"),
        (0, "Text::default()".to_string(), "Text".to_string())
    );
}

#[test]
fn test_numeric_with_scale() {
    let ty = parse_type("numeric(10,2)", true);
    assert_eq!(ty.precision, 10);
    assert_eq!(ty.zero_value, "Float8::default()");
    assert_eq!(ty.type_name, "Float8");
}

#[test]
fn test_precision_inside_name() {
    let ty = parse_type("timestamp(3) with time zone", false);
    assert_eq!(ty.precision, 3);
    assert_eq!(ty.type_name, "Timestamptz");

    let ty = parse_type("time(6) without time zone", false);
    assert_eq!(ty.precision, 6);
    assert_eq!(ty.type_name, "Timestamp");
}

#[test]
fn test_time_zone_families() {
    assert_eq!(parsed("timestamp with time zone").2, "Timestamptz");
    assert_eq!(parsed("timestamp without time zone").2, "Timestamp");
    assert_eq!(parsed("time with time zone").2, "Timestamptz");
    assert_eq!(parsed("time without time zone").2, "Timestamp");
}

#[test]
fn test_quoted_char() {
    assert_eq!(parsed("\"char\"").2, "QChar");
    assert_eq!(parsed("character(1)"), (1, "Text::default()".into(), "Text".into()));
}

#[test]
fn test_uuid_array_family() {
    let ty = parse_type("uuid[]", true);
    assert_eq!(ty.type_name, "UuidArray");
    assert_eq!(ty.zero_value, "UuidArray::default()");
}

#[test]
fn test_array_of_known_family() {
    let ty = parse_type("integer[]", false);
    assert_eq!(ty.type_name, "Vec<Int4>");
    assert_eq!(ty.zero_value, EMPTY_SEQUENCE_ZERO_VALUE);

    let ty = parse_type("character varying(64)[]", false);
    assert_eq!(ty.precision, 64);
    assert_eq!(ty.type_name, "Vec<Text>");
}

#[test]
fn test_user_defined() {
    let ty = parse_type("order_status", false);
    assert_eq!(ty.type_name, "OrderStatus");
    assert_eq!(ty.zero_value, "OrderStatus::default()");
    assert_eq!(ty.precision, 0);

    assert_eq!(parse_type("order_status[]", false).type_name, "Vec<OrderStatus>");
    assert_eq!(parse_type("public.mood", false).type_name, "PublicMood");
}

#[test]
fn test_setof() {
    let ty = parse_type("SETOF integer", true);
    assert_eq!(ty.precision, 0);
    assert_eq!(ty.zero_value, NIL_ZERO_VALUE);
    assert_eq!(ty.type_name, "Vec<Int4>");

    let ty = parse_type("SETOF numeric(12,4)", false);
    assert_eq!(ty.precision, 0);
    assert_eq!(ty.type_name, "Vec<Float8>");

    assert_eq!(parse_type("SETOF users", false).type_name, "Vec<Users>");
}

#[test]
fn test_parse_precision() {
    assert_eq!(parse_precision("numeric"), ("numeric".to_string(), 0));
    assert_eq!(parse_precision("numeric(10)"), ("numeric".to_string(), 10));
    assert_eq!(parse_precision("numeric(10, 2)"), ("numeric".to_string(), 10));
    assert_eq!(parse_precision("bit(8)"), ("bit".to_string(), 8));
    assert_eq!(
        parse_precision("timestamp(0) with time zone"),
        ("timestamp with time zone".to_string(), 0)
    );
    // not a numeric qualifier
    assert_eq!(parse_precision("foo(bar)"), ("foo(bar)".to_string(), 0));
}

#[test]
fn test_camel_identifier() {
    assert_eq!(camel_identifier("order_status"), "OrderStatus");
    assert_eq!(camel_identifier("public.mood"), "PublicMood");
    assert_eq!(camel_identifier("\"Weird Name\""), "WeirdName");
    assert_eq!(camel_identifier("2fa_method"), "_2faMethod");
    assert_eq!(camel_identifier("__"), "Unknown");
    assert_eq!(camel_identifier("données"), "Données");
    assert_eq!(camel_identifier("état_civil"), "ÉtatCivil");
}

#[test]
fn test_nullability_does_not_change_family() {
    for (native, _) in NATIVE_FAMILIES {
        assert_eq!(parse_type(native, true), parse_type(native, false), "{native}");
    }
}

fn known_native() -> impl Strategy<Value = (&'static str, CanonicalType)> {
    proptest::sample::select(NATIVE_FAMILIES.to_vec())
}

proptest! {
    #[test]
    fn prop_family_table(
        (native, ty) in known_native(),
        precision in proptest::option::of(1u32..1000),
    ) {
        let spelled = match precision {
            Some(p) => format!("{native}({p})"),
            None => native.to_string(),
        };
        let parsed = parse_type(&spelled, false);
        prop_assert_eq!(parsed.type_name, ty.name());
        prop_assert_eq!(parsed.zero_value, ty.zero_value());
        prop_assert_eq!(parsed.precision, precision.unwrap_or(0));
    }

    #[test]
    fn prop_setof_wraps_inner((native, ty) in known_native()) {
        let parsed = parse_type(&format!("{SETOF_PREFIX}{native}"), true);
        prop_assert_eq!(parsed.precision, 0);
        prop_assert_eq!(parsed.zero_value, NIL_ZERO_VALUE);
        prop_assert_eq!(parsed.type_name, format!("Vec<{}>", ty.name()));
    }

    #[test]
    fn prop_user_defined_is_identifier(name in "[a-z][a-z0-9_]{0,20}") {
        prop_assume!(native_family(&name).is_none());
        let parsed = parse_type(&name, false);
        prop_assert!(parsed.type_name.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert!(parsed.type_name.chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert_eq!(parsed.zero_value, format!("{}::default()", parsed.type_name));
    }
}
