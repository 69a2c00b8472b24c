use super::*;
use proptest::prelude::*;

fn lines(query: &[&str]) -> Vec<String> {
    query.iter().map(|l| l.to_string()).collect()
}

#[test]
fn test_strip_cast_alias() {
    let mut query = lines(&["SELECT id::bigint AS id,", "  name", "FROM users"]);
    let mut comments = Vec::new();
    query_strip(&mut query, &mut comments);

    assert_eq!(query, lines(&["SELECT id,", "  name", "FROM users"]));
    assert_eq!(comments, lines(&["", "::bigint AS id", "", ""]));
}

#[test]
fn test_strip_every_cast_on_a_line() {
    let mut query = lines(&["SELECT qty::int4 AS qty, note::text AS note"]);
    let mut comments = Vec::new();
    query_strip(&mut query, &mut comments);

    assert_eq!(query, lines(&["SELECT qty, note"]));
    assert_eq!(comments[1], "::int4 AS qty ::text AS note");
}

#[test]
fn test_strip_chained_casts() {
    // removing the inner cast exposes `::aa AS dd`
    let mut query = lines(&["SELECT y::aa::bb AS cc AS dd"]);
    let mut comments = Vec::new();
    query_strip(&mut query, &mut comments);
    assert_eq!(query, lines(&["SELECT y"]));
    assert_eq!(comments[1], "::bb AS cc ::aa AS dd");

    let mut again = Vec::new();
    query_strip(&mut query, &mut again);
    assert_eq!(query, lines(&["SELECT y"]));
    assert_eq!(again, lines(&["", ""]));
}

#[test]
fn test_strip_dotted_and_mixed_case() {
    let mut query = lines(&["SELECT total::pg_catalog.numeric as Total"]);
    let mut comments = Vec::new();
    query_strip(&mut query, &mut comments);

    assert_eq!(query, lines(&["SELECT total"]));
    assert_eq!(comments[1], "::pg_catalog.numeric as Total");
}

#[test]
fn test_strip_keeps_leading_comment() {
    let mut query = lines(&["SELECT 1::int AS one"]);
    let mut comments = lines(&["header", "stale", "extra"]);
    query_strip(&mut query, &mut comments);

    assert_eq!(comments, lines(&["header", "::int AS one", "extra"]));
}

#[test]
fn test_strip_single_letter_alias_is_kept() {
    let mut query = lines(&["SELECT n::int8 AS n"]);
    let mut comments = Vec::new();
    query_strip(&mut query, &mut comments);
    assert_eq!(query, lines(&["SELECT n::int8 AS n"]));
    assert_eq!(comments[1], "");
}

#[test]
fn test_strip_requires_alias() {
    let mut query = lines(&["WHERE id = $1::uuid"]);
    let mut comments = Vec::new();
    query_strip(&mut query, &mut comments);

    assert_eq!(query, lines(&["WHERE id = $1::uuid"]));
    assert_eq!(comments, lines(&["", ""]));
}

#[test]
fn test_strip_empty_query() {
    let mut query: Vec<String> = Vec::new();
    let mut comments = Vec::new();
    query_strip(&mut query, &mut comments);
    assert_eq!(comments, lines(&[""]));
}

proptest! {
    #[test]
    fn prop_strip_is_idempotent(
        query in proptest::collection::vec(
            prop_oneof![
                "[a-z ,()$0-9]{0,30}",
                "[a-z]{1,8}::[a-z][a-z0-9_.]{1,10} +AS +[a-z][a-z0-9_]{1,10}[a-z ,]{0,10}",
                "([a-z]{1,4}(::[a-z][a-z0-9_]{0,4}){1,3}( +(AS|as) +[a-z][a-z0-9_]{0,4}){0,3}[ ,]{0,2}){1,4}",
            ],
            0..8,
        ),
    ) {
        let mut once = query.clone();
        let mut comments = Vec::new();
        query_strip(&mut once, &mut comments);

        let mut twice = once.clone();
        let mut again = Vec::new();
        query_strip(&mut twice, &mut again);

        prop_assert_eq!(&twice, &once);
        prop_assert!(again.iter().all(|c| c.is_empty()));
        prop_assert_eq!(comments.len(), query.len() + 1);
    }
}
