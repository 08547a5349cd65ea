//! The contract every event format implements.
//!
//! A formatter owns one serialization (JSON, Avro, ...). It never deals with
//! transport metadata: bindings map attributes to headers themselves in
//! binary mode and only hand the payload to the formatter.

use std::sync::Arc;

use crate::codec::content_type::ContentType;
use crate::error::{Error, Result};
use crate::model::{Attribute, CloudEvent, Data};

/// An encoded body and the content type to send it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// A CloudEvents event format.
///
/// Decoders only ever return events that pass [`CloudEvent::is_valid`], and
/// encoders refuse events that do not. Batch support is optional; the
/// default batch operations fail with [`Error::Unsupported`].
pub trait EventFormatter: Send + Sync {
    /// Short name used in error messages.
    fn name(&self) -> &'static str;

    /// Decodes a structured-mode body into a complete event.
    ///
    /// `extensions` are registered on the event before any member is read,
    /// so they take precedence over implicit String extensions.
    fn decode_structured(
        &self,
        body: &[u8],
        content_type: &str,
        extensions: &[Arc<Attribute>],
    ) -> Result<CloudEvent>;

    /// Decodes a binary-mode body into the payload of `event`.
    ///
    /// Attributes are left untouched; the declared data content type
    /// decides how the body is interpreted.
    fn decode_binary_data(&self, body: &[u8], event: &mut CloudEvent) -> Result<()>;

    /// Encodes a valid event as a single self-describing body.
    fn encode_structured(&self, event: &CloudEvent) -> Result<EncodedMessage>;

    /// Encodes the payload of a valid event for binary mode.
    fn encode_binary_data(&self, event: &CloudEvent) -> Result<Vec<u8>>;

    /// Decodes a batch body into events, preserving order.
    fn decode_batch(
        &self,
        _body: &[u8],
        _content_type: &str,
        _extensions: &[Arc<Attribute>],
    ) -> Result<Vec<CloudEvent>> {
        Err(Error::Unsupported {
            formatter: self.name(),
            operation: "batch decoding",
        })
    }

    /// Encodes events as one batch body.
    fn encode_batch(&self, _events: &[CloudEvent]) -> Result<EncodedMessage> {
        Err(Error::Unsupported {
            formatter: self.name(),
            operation: "batch encoding",
        })
    }

    /// Content type to assume for a payload when the event declares none.
    fn infer_data_content_type(&self, _data: &Data) -> Option<&'static str> {
        None
    }
}

/// Interprets a binary-mode body according to its declared content type.
///
/// - JSON content types yield [`Data::Json`] when the body parses, text
///   otherwise.
/// - Other text content types yield [`Data::Text`] when the body is UTF-8
///   in a UTF-8 (or unspecified) charset.
/// - Everything else, including a missing content type, stays raw bytes.
pub fn decode_data_by_content_type(body: &[u8], content_type: Option<&str>) -> Data {
    let Some(content_type) = content_type.map(ContentType::parse) else {
        return Data::Binary(body.to_vec());
    };
    if !content_type.is_text() || !content_type.is_utf8() {
        return Data::Binary(body.to_vec());
    }
    if content_type.is_json() {
        if let Ok(value) = serde_json::from_slice(body) {
            return Data::Json(value);
        }
    }
    match std::str::from_utf8(body) {
        Ok(text) => Data::Text(text.to_string()),
        Err(_) => Data::Binary(body.to_vec()),
    }
}

/// Serializes a payload for binary mode: bytes as-is, text as UTF-8, JSON
/// compactly.
pub fn encode_data(data: &Data) -> Result<Vec<u8>> {
    match data {
        Data::Binary(bytes) => Ok(bytes.clone()),
        Data::Text(text) => Ok(text.as_bytes().to_vec()),
        Data::Json(value) => {
            serde_json::to_vec(value).map_err(|e| Error::malformed("JSON", e.to_string()))
        }
    }
}
