//! Error types for content fetching

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Result of a single content fetch, as delivered over the content channel.
pub type ContentFetch = Result<super::ContentRecord, ContentError>;

/// Everything that can go wrong between the content source and a record.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for {range} failed: {source}")]
    Request {
        range: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {range} returned {status}")]
    Status {
        range: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("response for {range} is not a value range: {source}")]
    Decode {
        range: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{range} has no cell at row {row}, column {col}")]
    MissingCell {
        range: &'static str,
        row: usize,
        col: usize,
    },

    #[error("base URL cannot carry a path: {0}")]
    InvalidBaseUrl(Url),

    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("content fixture {path}: {source}")]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content fixture is not a content record: {0}")]
    FixtureParse(#[from] serde_json::Error),
}
