//! Attribute descriptors.
//!
//! A descriptor names an attribute, fixes its type and kind, and optionally
//! carries a validator that is run on every assignment. Required and
//! optional descriptors are created only by the spec-version registry;
//! extension descriptors may be created by anyone.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{AttributeType, AttributeValue};

/// Names an extension may not take.
const RESERVED_NAMES: [&str; 2] = ["specversion", "data"];

/// Custom value check. Returns a description of the problem on rejection.
pub type Validator = Arc<dyn Fn(&AttributeValue) -> Result<(), String> + Send + Sync>;

/// Whether an attribute is required or optional by a spec version, or is an
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Required,
    Optional,
    Extension,
}

/// An immutable attribute descriptor.
#[derive(Clone)]
pub struct Attribute {
    name: Cow<'static, str>,
    attribute_type: AttributeType,
    kind: AttributeKind,
    validator: Option<Validator>,
}

impl Attribute {
    pub(crate) fn required(name: &'static str, attribute_type: AttributeType) -> Self {
        Self {
            name: Cow::Borrowed(name),
            attribute_type,
            kind: AttributeKind::Required,
            validator: None,
        }
    }

    pub(crate) fn optional(name: &'static str, attribute_type: AttributeType) -> Self {
        Self {
            name: Cow::Borrowed(name),
            attribute_type,
            kind: AttributeKind::Optional,
            validator: None,
        }
    }

    /// Creates an extension attribute.
    ///
    /// Extension names are non-empty and use only `a-z` and `0-9`. The names
    /// `specversion` and `data` are reserved.
    pub fn extension(name: impl Into<String>, attribute_type: AttributeType) -> Result<Self> {
        let name = name.into();
        validate_extension_name(&name)?;
        Ok(Self {
            name: Cow::Owned(name),
            attribute_type,
            kind: AttributeKind::Extension,
            validator: None,
        })
    }

    /// Attaches a validator, replacing any existing one.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&AttributeValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub(crate) fn with_shared_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.kind == AttributeKind::Required
    }

    pub fn is_extension(&self) -> bool {
        self.kind == AttributeKind::Extension
    }

    /// Parses wire text into a value of this attribute.
    ///
    /// Validator rejections are reported as format errors naming the text.
    pub fn parse(&self, text: &str) -> Result<AttributeValue> {
        let value = self.attribute_type.parse(text)?;
        self.validate(&value).map_err(|e| match e {
            Error::Validation { reason, .. } => Error::Format {
                text: text.to_string(),
                attribute_type: self.attribute_type,
                reason,
            },
            other => other,
        })?;
        Ok(value)
    }

    /// Formats a value of this attribute as canonical text.
    pub fn format(&self, value: &AttributeValue) -> Result<String> {
        self.check_type(value)?;
        Ok(value.to_canonical_string())
    }

    /// Checks a value against this attribute's type and validator.
    pub fn validate(&self, value: &AttributeValue) -> Result<()> {
        self.check_type(value)?;
        if let Err(reason) = self.attribute_type.check_value(value) {
            return Err(Error::Validation {
                attribute: self.name.to_string(),
                reason,
            });
        }
        if let Some(validator) = &self.validator {
            validator(value).map_err(|reason| Error::Validation {
                attribute: self.name.to_string(),
                reason,
            })?;
        }
        Ok(())
    }

    fn check_type(&self, value: &AttributeValue) -> Result<()> {
        let actual = value.attribute_type();
        if actual != self.attribute_type {
            return Err(Error::TypeMismatch {
                attribute: self.name.to_string(),
                expected: self.attribute_type,
                actual,
            });
        }
        Ok(())
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        let same_validator = match (&self.validator, &other.validator) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.name == other.name
            && self.attribute_type == other.attribute_type
            && self.kind == other.kind
            && same_validator
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("attribute_type", &self.attribute_type)
            .field("kind", &self.kind)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Returns true if `name` is a valid attribute name (`[a-z0-9]+`).
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn validate_extension_name(name: &str) -> Result<()> {
    if !is_valid_attribute_name(name) {
        return Err(Error::invalid_argument(
            "name",
            format!("{name:?} is not a valid attribute name (expected [a-z0-9]+)"),
        ));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(Error::invalid_argument(
            "name",
            format!("{name:?} is reserved and cannot be used as an extension"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_names() {
        assert!(Attribute::extension("comexampleextension1", AttributeType::String).is_ok());
        assert!(Attribute::extension("1abc", AttributeType::String).is_ok());
        assert!(Attribute::extension("", AttributeType::String).is_err());
        assert!(Attribute::extension("Upper", AttributeType::String).is_err());
        assert!(Attribute::extension("with_underscore", AttributeType::String).is_err());
        assert!(Attribute::extension("specversion", AttributeType::String).is_err());
        assert!(Attribute::extension("data", AttributeType::Binary).is_err());
    }

    #[test]
    fn test_parse_delegates_to_type() {
        let attr = Attribute::extension("count", AttributeType::Integer).unwrap();
        assert_eq!(attr.parse("42").unwrap(), AttributeValue::Integer(42));
        assert!(matches!(attr.parse("forty-two"), Err(Error::Format { .. })));
    }

    #[test]
    fn test_validator_runs_on_parse_and_validate() {
        let attr = Attribute::extension("percent", AttributeType::Integer)
            .unwrap()
            .with_validator(|v| match v.as_integer() {
                Some(i) if (0..=100).contains(&i) => Ok(()),
                _ => Err("must be between 0 and 100".to_string()),
            });

        assert!(attr.validate(&AttributeValue::Integer(50)).is_ok());
        assert!(matches!(
            attr.validate(&AttributeValue::Integer(150)),
            Err(Error::Validation { .. })
        ));
        // Validator failures surface as format errors when parsing
        assert!(matches!(attr.parse("150"), Err(Error::Format { .. })));
    }

    #[test]
    fn test_validate_type_mismatch() {
        let attr = Attribute::extension("flag", AttributeType::Boolean).unwrap();
        let err = attr.validate(&AttributeValue::from("true")).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                attribute: "flag".to_string(),
                expected: AttributeType::Boolean,
                actual: AttributeType::String,
            }
        );
    }

    #[test]
    fn test_format_checks_type() {
        let attr = Attribute::extension("flag", AttributeType::Boolean).unwrap();
        assert_eq!(attr.format(&AttributeValue::Boolean(false)).unwrap(), "false");
        assert!(attr.format(&AttributeValue::Integer(0)).is_err());
    }

    #[test]
    fn test_equality_compares_validator_identity() {
        let a = Attribute::extension("ext", AttributeType::String).unwrap();
        let b = Attribute::extension("ext", AttributeType::String).unwrap();
        assert_eq!(a, b);
        let c = b.clone().with_validator(|_| Ok(()));
        assert_ne!(a, c);
        assert_eq!(c, c.clone());
        assert_ne!(a, Attribute::extension("ext", AttributeType::Integer).unwrap());
    }
}
