//! Attribute values.
//!
//! Values are the native representations of the seven attribute types.
//! Each variant corresponds to exactly one [`AttributeType`].

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, FixedOffset, Utc};

use crate::model::AttributeType;
use crate::util::{
    DateTimeParseError, Uri, UriReference, format_timestamp_rfc3339, parse_timestamp_rfc3339,
};

/// A point in time together with the UTC offset it was expressed in.
///
/// `==` is the offset-preserving comparison: two timestamps are equal only
/// if they denote the same instant *and* carry the same offset. Use
/// [`Timestamp::same_instant`] for carriers that can only keep the instant.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Wraps a chrono timestamp.
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }

    /// Returns the current time in UTC.
    pub fn now() -> Self {
        Self(Utc::now().fixed_offset())
    }

    /// Parses an RFC 3339 timestamp, preserving its offset.
    pub fn parse(text: &str) -> Result<Self, DateTimeParseError> {
        parse_timestamp_rfc3339(text).map(Self)
    }

    /// Returns true if both timestamps denote the same instant, whatever
    /// their offsets.
    pub fn same_instant(&self, other: &Timestamp) -> bool {
        self.0.timestamp() == other.0.timestamp()
            && self.0.timestamp_subsec_nanos() == other.0.timestamp_subsec_nanos()
    }

    /// Converts to the UTC-only representation. The offset is lost.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Returns the UTC offset in minutes.
    pub fn offset_minutes(&self) -> i32 {
        crate::util::datetime::offset_minutes(&self.0)
    }

    /// Returns the underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.same_instant(other) && self.0.offset() == other.0.offset()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp_rfc3339(&self.0))
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.fixed_offset())
    }
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Opaque byte sequence.
    Binary(Vec<u8>),
    /// Boolean.
    Boolean(bool),
    /// 32-bit signed integer.
    Integer(i32),
    /// Unicode text.
    String(String),
    /// Absolute URI.
    Uri(Uri),
    /// Absolute URI or relative reference.
    UriReference(UriReference),
    /// Timestamp with offset.
    Timestamp(Timestamp),
}

impl AttributeValue {
    /// Returns the attribute type of this value.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Binary(_) => AttributeType::Binary,
            AttributeValue::Boolean(_) => AttributeType::Boolean,
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Uri(_) => AttributeType::Uri,
            AttributeValue::UriReference(_) => AttributeType::UriReference,
            AttributeValue::Timestamp(_) => AttributeType::Timestamp,
        }
    }

    /// Formats this value using the canonical text encoding of its type.
    pub fn to_canonical_string(&self) -> String {
        match self {
            AttributeValue::Binary(bytes) => BASE64.encode(bytes),
            AttributeValue::Boolean(b) => b.to_string(),
            AttributeValue::Integer(i) => i.to_string(),
            AttributeValue::String(s) => s.clone(),
            AttributeValue::Uri(uri) => uri.as_str().to_string(),
            AttributeValue::UriReference(r) => r.as_str().to_string(),
            AttributeValue::Timestamp(ts) => ts.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            AttributeValue::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            AttributeValue::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn as_uri_reference(&self) -> Option<&UriReference> {
        match self {
            AttributeValue::UriReference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            AttributeValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Binary(value)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(value: &[u8]) -> Self {
        AttributeValue::Binary(value.to_vec())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<Uri> for AttributeValue {
    fn from(value: Uri) -> Self {
        AttributeValue::Uri(value)
    }
}

impl From<UriReference> for AttributeValue {
    fn from(value: UriReference) -> Self {
        AttributeValue::UriReference(value)
    }
}

impl From<Timestamp> for AttributeValue {
    fn from(value: Timestamp) -> Self {
        AttributeValue::Timestamp(value)
    }
}

impl From<DateTime<FixedOffset>> for AttributeValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        AttributeValue::Timestamp(value.into())
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::Timestamp(value.into())
    }
}
