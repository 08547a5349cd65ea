//! The CloudEvents attribute type system.
//!
//! Every binding that maps attributes to transport metadata uses the
//! canonical text encodings defined here:
//!
//! | Type          | Canonical text                                   |
//! |---------------|--------------------------------------------------|
//! | Binary        | base64 (RFC 4648, padded)                        |
//! | Boolean       | `true` / `false` (case-sensitive)                |
//! | Integer       | decimal, 32-bit signed                           |
//! | String        | identity                                         |
//! | URI           | absolute URI                                     |
//! | URI-reference | absolute URI or relative reference               |
//! | Timestamp     | RFC 3339, offset preserved                       |

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{Error, Result};
use crate::model::{AttributeValue, Timestamp};
use crate::util::{Uri, UriReference};

/// The seven attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Binary,
    Boolean,
    Integer,
    String,
    Uri,
    UriReference,
    Timestamp,
}

impl AttributeType {
    /// Every attribute type, in declaration order.
    pub const ALL: [AttributeType; 7] = [
        AttributeType::Binary,
        AttributeType::Boolean,
        AttributeType::Integer,
        AttributeType::String,
        AttributeType::Uri,
        AttributeType::UriReference,
        AttributeType::Timestamp,
    ];

    /// Returns the type name used by the CloudEvents type system.
    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::Binary => "Binary",
            AttributeType::Boolean => "Boolean",
            AttributeType::Integer => "Integer",
            AttributeType::String => "String",
            AttributeType::Uri => "URI",
            AttributeType::UriReference => "URI-reference",
            AttributeType::Timestamp => "Timestamp",
        }
    }

    /// Looks up a type by its CloudEvents name.
    pub fn from_name(name: &str) -> Option<AttributeType> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Parses canonical text into a value of this type.
    pub fn parse(&self, text: &str) -> Result<AttributeValue> {
        let fail = |reason: String| Error::Format {
            text: text.to_string(),
            attribute_type: *self,
            reason,
        };

        match self {
            AttributeType::Binary => BASE64
                .decode(text)
                .map(AttributeValue::Binary)
                .map_err(|e| fail(e.to_string())),
            AttributeType::Boolean => match text {
                "true" => Ok(AttributeValue::Boolean(true)),
                "false" => Ok(AttributeValue::Boolean(false)),
                _ => Err(fail("expected \"true\" or \"false\"".to_string())),
            },
            AttributeType::Integer => text
                .parse::<i32>()
                .map(AttributeValue::Integer)
                .map_err(|e| fail(e.to_string())),
            AttributeType::String => {
                check_string(text).map_err(fail)?;
                Ok(AttributeValue::String(text.to_string()))
            }
            AttributeType::Uri => Uri::parse(text)
                .map(AttributeValue::Uri)
                .map_err(|e| fail(e.message)),
            AttributeType::UriReference => UriReference::parse(text)
                .map(AttributeValue::UriReference)
                .map_err(|e| fail(e.message)),
            AttributeType::Timestamp => Timestamp::parse(text)
                .map(AttributeValue::Timestamp)
                .map_err(|e| fail(e.message)),
        }
    }

    /// Formats a value of this type as canonical text.
    ///
    /// Fails only if `value` is of a different type. The `attribute` field of
    /// the resulting error is empty since no attribute is involved.
    pub fn format(&self, value: &AttributeValue) -> Result<String> {
        self.check_value(value).map_err(|_| Error::TypeMismatch {
            attribute: String::new(),
            expected: *self,
            actual: value.attribute_type(),
        })?;
        Ok(value.to_canonical_string())
    }

    /// Checks that `value` is of this type and satisfies the type's own
    /// constraints. Returns a description of the first violation.
    pub(crate) fn check_value(&self, value: &AttributeValue) -> Result<(), String> {
        if value.attribute_type() != *self {
            return Err(format!("expected {}, found {}", self, value.attribute_type()));
        }
        if let AttributeValue::String(s) = value {
            check_string(s)?;
        }
        Ok(())
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// String values must not contain control characters
/// (U+0000-U+001F, U+007F-U+009F).
fn check_string(s: &str) -> Result<(), String> {
    match s.chars().find(|c| c.is_control()) {
        Some(c) => Err(format!("control character U+{:04X} is not allowed", c as u32)),
        None => Ok(()),
    }
}
