use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single line produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line does not match the access log grammar")]
    Malformed,

    #[error("unparseable timestamp '{value}'")]
    Timestamp { value: String },

    #[error("invalid status code '{value}'")]
    Status { value: String },

    #[error("invalid response size '{value}'")]
    ResponseSize { value: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log file {path} at line {line}: {source}")]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
