//! Boundary error types. Both are recovered where they occur: callers log
//! them and keep going with in-memory or previous values.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to access session store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected weather condition: {0}")]
    UnknownCondition(String),
}
