use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    /// The store could not be opened at all. Cold-start condition, never retried.
    #[error("Cannot connect to store at '{location}': {source}")]
    Connectivity {
        location: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report '{key}' not found")]
    UnknownReport { key: String },

    #[error("Section '{key}' not found")]
    UnknownSection { key: String },

    #[error("Column '{column}' not present in report result")]
    UnknownColumn { column: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PulseResult<T> = Result<T, PulseError>;
