//! Format detection and definition module.
//!
//! This module provides types and utilities for telling JSON payloads from
//! XML ones, by content or by HTTP `Content-Type`.

pub mod json;
pub mod xml;

use crate::errors::BridgeError;

/// Supported payload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON format
    Json,
    /// XML format
    Xml,
}

impl Format {
    /// Detect format from file content
    pub fn from_content(content: &[u8]) -> Result<Self, BridgeError> {
        let first = content.iter().find(|b| !b.is_ascii_whitespace());

        match first {
            None => Err(BridgeError::InvalidInput("Empty content".to_string())),
            Some(b'{') | Some(b'[') => Ok(Format::Json),
            Some(b'<') => Ok(Format::Xml),
            Some(_) => Err(BridgeError::InvalidInput(
                "Could not detect format from content. Expected JSON (starts with '{' or '[') or XML (starts with '<')".to_string()
            )),
        }
    }

    /// Detect format from an HTTP `Content-Type` header value.
    ///
    /// Parameters such as `charset` are ignored. Structured syntax suffixes
    /// (`application/vnd.api+json`, `application/atom+xml`) are honoured.
    pub fn from_content_type(header: &str) -> Option<Self> {
        let mime: mime::Mime = header.trim().parse().ok()?;

        let is_text_or_app = mime.type_() == mime::APPLICATION || mime.type_() == mime::TEXT;
        if (is_text_or_app && mime.subtype() == mime::JSON) || mime.suffix() == Some(mime::JSON) {
            Some(Format::Json)
        } else if (is_text_or_app && mime.subtype() == mime::XML)
            || mime.suffix() == Some(mime::XML)
        {
            Some(Format::Xml)
        } else {
            None
        }
    }

    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }
}
