//! Error types for the I/O edges of the service. The aggregation core in
//! `report` has no error type; every computation there is total.

use thiserror::Error;

/// Failure to obtain raw rows from the order spreadsheet.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch order sheet: {0}")]
    Http(#[from] reqwest::Error),

    #[error("order sheet returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to read order sheet CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTtl { var: &'static str, value: String },

    #[error("unknown dashboard tab {0:?} (expected overview, details or marketing)")]
    UnknownTab(String),

    #[error("{0} lists no dashboard tabs")]
    NoTabs(&'static str),
}
