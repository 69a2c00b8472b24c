//! SQL text for pgload.
//!
//! Quoting helpers, the statement used to materialize ad-hoc queries, and the
//! catalog queries the loaders run (see [`catalog`]).

pub mod catalog;

/// A PostgreSQL identifier wrapper.
///
/// Display writes the value escaped and quoted with double quotes.
///
/// # Example
/// ```
/// use pgload_sql::Ident;
/// assert_eq!(format!("{}", Ident("user")), "\"user\"");
/// assert_eq!(format!("{}", Ident("bla\"h")), "\"bla\"\"h\"");
/// ```
pub struct Ident<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> std::fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"")?;
        for c in self.0.as_ref().chars() {
            if c == '"' {
                write!(f, "\"\"")?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "\"")
    }
}

/// Quote a PostgreSQL identifier.
///
/// Always quotes, so reserved words and mixed-case names survive. Doubles
/// any embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("{}", Ident(name))
}

/// Longest identifier Postgres keeps without truncation.
pub const PG_IDENT_MAX: usize = 63;

/// Build the statement that materializes `query` as a session-scoped view.
///
/// The query lines are joined with newlines and wrapped in parentheses, so a
/// trailing comment on the last line can't swallow the closing parenthesis.
///
/// # Example
/// ```
/// let sql = pgload_sql::create_temp_view_sql("_pgload_1", &["SELECT 1 AS one"]);
/// assert_eq!(sql, "CREATE TEMPORARY VIEW \"_pgload_1\" AS (\nSELECT 1 AS one\n)");
/// ```
pub fn create_temp_view_sql(view: &str, query: &[impl AsRef<str>]) -> String {
    let body: Vec<&str> = query.iter().map(|l| l.as_ref()).collect();
    format!(
        "CREATE TEMPORARY VIEW {} AS (\n{}\n)",
        quote_ident(view),
        body.join("\n")
    )
}
