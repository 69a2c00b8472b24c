//! Removal of `::type AS alias` casts from query text.
//!
//! Queries handed to [`query_column_list`](crate::SchemaLoader::query_column_list)
//! often carry casts that only exist to pin the native type of a result
//! column. Generated code drops them, keeping each one as a comment on the
//! line it came from.

use regex::Regex;
use std::sync::LazyLock;

static CAST_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)::[a-z][a-z0-9_.]+\s+AS\s+[a-z][a-z0-9_.]+").expect("valid cast pattern")
});

/// Strip cast-and-alias spans from every line of `query`.
///
/// Matches are removed leftmost first until the line has none left, since a
/// removal can join the surrounding text into a new match. A stripped line is
/// therefore left unchanged by a second pass.
///
/// `comments` is index-shifted: `comments[i + 1]` receives the spans removed
/// from `query[i]` joined by a space, or an empty string if the line had
/// none. It is grown to `query.len() + 1` entries when shorter, and
/// `comments[0]` is left as is.
pub fn query_strip(query: &mut [String], comments: &mut Vec<String>) {
    if comments.len() < query.len() + 1 {
        comments.resize(query.len() + 1, String::new());
    }

    for (i, line) in query.iter_mut().enumerate() {
        let mut removed = Vec::new();
        while let Some(m) = CAST_ALIAS.find(line) {
            let range = m.range();
            removed.push(m.as_str().to_string());
            line.replace_range(range, "");
        }
        comments[i + 1] = removed.join(" ");
    }
}

#[cfg(test)]
mod tests;
