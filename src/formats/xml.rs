//! XML document writer

use crate::errors::BridgeError;
use crate::transcode::encode_value;
use quick_xml::escape::escape;
use serde_json::Value;
use std::io::Write;

pub const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const ROOT_TAG: &str = "root";

/// Build a complete XML document for a JSON value.
pub fn to_document(value: &Value) -> String {
    format!(
        "{}<{}>{}</{}>",
        XML_PROLOG,
        ROOT_TAG,
        encode_value(value),
        ROOT_TAG
    )
}

/// Write a JSON value as an XML document
pub fn write<W: Write>(mut writer: W, value: &Value) -> Result<(), BridgeError> {
    writer
        .write_all(to_document(value).as_bytes())
        .map_err(|e| BridgeError::Io(e, "Failed to write XML document".to_string()))?;

    writer
        .flush()
        .map_err(|e| BridgeError::Io(e, "Failed to flush XML output".to_string()))?;

    Ok(())
}

/// Build the XML body returned to clients when a request fails.
pub fn error_document(status: u16, message: &str) -> String {
    format!(
        "{}<error><status>{}</status><message>{}</message></error>",
        XML_PROLOG,
        status,
        escape(message)
    )
}
