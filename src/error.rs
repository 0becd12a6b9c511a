// ⚠️ Error taxonomy for the ETL run
// Transport → Decode → Storage, in the order a load can fail

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    // ========================================================================
    // TRANSPORT (nothing written yet)
    // ========================================================================
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // DECODE
    // ========================================================================
    #[error("{source_location} is not valid UTF-8: {source}")]
    Decode {
        source_location: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("malformed CSV in {source_location}: {source}")]
    Csv {
        source_location: String,
        #[source]
        source: csv::Error,
    },

    #[error("header of {source_location} does not fit table {table}: {message}")]
    Header {
        source_location: String,
        table: String,
        message: String,
    },

    // ========================================================================
    // STORAGE
    // ========================================================================
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("unknown table {0}")]
    UnknownTable(String),
}

pub type EtlResult<T> = std::result::Result<T, EtlError>;
