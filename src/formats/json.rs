//! JSON input handler

use crate::errors::BridgeError;
use crate::formats::Format;
use serde_json::Value;

/// Parse any JSON value, scalars included, from raw bytes.
///
/// When the bytes do not parse and look like XML, the error says so instead
/// of reporting the raw syntax error.
pub fn parse(bytes: &[u8]) -> Result<Value, BridgeError> {
    serde_json::from_slice(bytes).map_err(|e| match Format::from_content(bytes) {
        Ok(Format::Xml) => BridgeError::InvalidInput(
            "Input looks like XML, not JSON; nothing to convert".to_string(),
        ),
        _ => BridgeError::Serde(e),
    })
}
