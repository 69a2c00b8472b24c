use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("could not create temporary view {view}: {source}")]
    CreateView {
        view: String,
        source: tokio_postgres::Error,
    },

    #[error("could not look up the schema of temporary view {view}: {source}")]
    TempNamespace {
        view: String,
        source: tokio_postgres::Error,
    },

    #[error("temporary view {view} not found in any session schema")]
    TempNamespaceNotFound { view: String },

    #[error("temporary view {view} found in several session schemas: {}", .found.join(", "))]
    TempNamespaceAmbiguous { view: String, found: Vec<String> },

    #[error("could not load columns of temporary view {view}: {source}")]
    QueryColumns {
        view: String,
        #[source]
        source: Box<Error>,
    },

    #[error("could not convert {table} index {index} column {token} to int")]
    InvalidIndexOrdinal {
        table: String,
        index: String,
        token: String,
    },

    #[error("could not find {table} index {index} column id {column_id}")]
    MissingIndexColumn {
        table: String,
        index: String,
        column_id: i16,
    },

    #[error("unknown relation kind {code:?}")]
    UnknownRelKind { code: String },

    #[error("no schema loader registered as {name:?}")]
    UnknownLoader { name: String },

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
