//! Content-type classification.
//!
//! Bindings call these to decide between structured, batch and binary
//! handling before touching a body.

use std::fmt;

/// Media type prefix of structured-mode bodies (`application/cloudevents+json`, ...).
pub const STRUCTURED_MEDIA_TYPE: &str = "application/cloudevents";

/// Media type prefix of batch-mode bodies.
pub const BATCH_MEDIA_TYPE: &str = "application/cloudevents-batch";

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Returns true if `content_type` is a structured-mode CloudEvents media
/// type. Batch media types are excluded.
pub fn is_cloud_event_content_type(content_type: &str) -> bool {
    starts_with_ignore_case(content_type, STRUCTURED_MEDIA_TYPE)
        && !is_cloud_event_batch_content_type(content_type)
}

/// Returns true if `content_type` is a batch-mode CloudEvents media type.
pub fn is_cloud_event_batch_content_type(content_type: &str) -> bool {
    starts_with_ignore_case(content_type, BATCH_MEDIA_TYPE)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let text = text.trim_start().as_bytes();
    text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// A parsed `Content-Type` value.
///
/// Only the media type and the `charset` parameter are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    raw: String,
    media_type: String,
    charset: Option<String>,
}

impl ContentType {
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split(';');
        let media_type = parts
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let charset = parts.find_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"').to_string())
            } else {
                None
            }
        });

        Self {
            raw: text.to_string(),
            media_type,
            charset,
        }
    }

    /// The content type as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The lower-cased media type, without parameters.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Returns true if the charset parameter is absent or names UTF-8.
    pub fn is_utf8(&self) -> bool {
        match &self.charset {
            None => true,
            Some(cs) => cs.eq_ignore_ascii_case("utf-8") || cs.eq_ignore_ascii_case("utf8"),
        }
    }

    /// `application/json`, `text/json` or any `+json` suffix.
    pub fn is_json(&self) -> bool {
        self.media_type == JSON_MEDIA_TYPE
            || self.media_type == "text/json"
            || self.media_type.ends_with("+json")
    }

    /// Media types whose payload is text: `text/*`, JSON and XML.
    pub fn is_text(&self) -> bool {
        self.media_type.starts_with("text/")
            || self.is_json()
            || self.media_type == "application/xml"
            || self.media_type.ends_with("+xml")
    }

    pub fn is_cloud_event(&self) -> bool {
        is_cloud_event_content_type(&self.media_type)
    }

    pub fn is_cloud_event_batch(&self) -> bool {
        is_cloud_event_batch_content_type(&self.media_type)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
