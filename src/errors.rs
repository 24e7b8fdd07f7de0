//! Defines the custom error types for the application.
//!
//! The transcoder itself never fails; everything here belongs to the
//! I/O around it (reading input, fetching upstream, serving requests).

use crate::fetch::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("I/O Error: {1} - {0}")]
    Io(#[source] std::io::Error, String),

    #[error("JSON Deserialization Error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Fetch Error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Server Error: {0}")]
    Server(String),
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err, "IO operation failed".to_string())
    }
}
