//! Event payloads.
//!
//! The core does not interpret payloads; formatters decide how each variant
//! is written according to the declared content type.

/// The payload of an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// Raw bytes.
    Binary(Vec<u8>),
    /// Text.
    Text(String),
    /// A JSON document.
    Json(serde_json::Value),
}

impl Data {
    /// Returns the payload bytes if this is binary data.
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Data::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the text if this is text data.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Data::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the JSON document if this is JSON data.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Data::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for Data {
    fn from(value: Vec<u8>) -> Self {
        Data::Binary(value)
    }
}

impl From<&[u8]> for Data {
    fn from(value: &[u8]) -> Self {
        Data::Binary(value.to_vec())
    }
}

impl From<String> for Data {
    fn from(value: String) -> Self {
        Data::Text(value)
    }
}

impl From<&str> for Data {
    fn from(value: &str) -> Self {
        Data::Text(value.to_string())
    }
}

impl From<serde_json::Value> for Data {
    fn from(value: serde_json::Value) -> Self {
        Data::Json(value)
    }
}
