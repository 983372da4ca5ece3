//! Errors raised while reading explain API payloads.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("invalid explain JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("explain response must be a JSON object keyed by index name")]
    NotAnObject,

    #[error("invalid explain entry for index {index}: {source}")]
    InvalidEntry {
        index: String,
        #[source]
        source: serde_json::Error,
    },
}
