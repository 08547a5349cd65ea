//! Error types for attribute handling, validation and formatting.

use thiserror::Error;

use crate::model::AttributeType;

/// Stable error codes, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Wire text does not parse as the declared attribute type
    Format,
    /// E002: Assigned value has the wrong native type
    TypeMismatch,
    /// E003: A custom validator rejected a well-typed value
    Validation,
    /// E004: Required attributes are not populated
    MissingRequiredAttributes,
    /// E005: Unknown spec version id
    UnknownSpecVersion,
    /// E006: Operation deliberately not supported by a formatter
    Unsupported,
    /// E007: Invalid argument or API contract violation
    InvalidArgument,
    /// E008: Body is not well-formed for its serialization format
    Malformed,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Format => "E001",
            ErrorCode::TypeMismatch => "E002",
            ErrorCode::Validation => "E003",
            ErrorCode::MissingRequiredAttributes => "E004",
            ErrorCode::UnknownSpecVersion => "E005",
            ErrorCode::Unsupported => "E006",
            ErrorCode::InvalidArgument => "E007",
            ErrorCode::Malformed => "E008",
        }
    }
}

/// Errors raised by the event core and by formatters built on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("[E001] {text:?} is not a valid {attribute_type} value: {reason}")]
    Format {
        text: String,
        attribute_type: AttributeType,
        reason: String,
    },

    #[error("[E002] attribute {attribute:?} has type {expected}, but the value is {actual}")]
    TypeMismatch {
        attribute: String,
        expected: AttributeType,
        actual: AttributeType,
    },

    #[error("[E003] value for attribute {attribute:?} rejected by validator: {reason}")]
    Validation { attribute: String, reason: String },

    #[error("[E004] missing required attributes: {}", .missing.join(", "))]
    MissingRequiredAttributes { missing: Vec<String> },

    #[error("[E005] unknown spec version: {version:?}")]
    UnknownSpecVersion { version: String },

    #[error("[E006] {formatter} does not support {operation}")]
    Unsupported {
        formatter: &'static str,
        operation: &'static str,
    },

    #[error("[E007] invalid argument {param}: {message}")]
    InvalidArgument { param: &'static str, message: String },

    #[error("[E008] malformed {format} body: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },
}

impl Error {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Format { .. } => ErrorCode::Format,
            Error::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Error::Validation { .. } => ErrorCode::Validation,
            Error::MissingRequiredAttributes { .. } => ErrorCode::MissingRequiredAttributes,
            Error::UnknownSpecVersion { .. } => ErrorCode::UnknownSpecVersion,
            Error::Unsupported { .. } => ErrorCode::Unsupported,
            Error::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Error::Malformed { .. } => ErrorCode::Malformed,
        }
    }

    pub(crate) fn invalid_argument(param: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            param,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        Error::Malformed {
            format,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::UnknownSpecVersion {
            version: "9.9".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownSpecVersion);
        assert_eq!(err.code().code(), "E005");
        assert_eq!(err.to_string(), "[E005] unknown spec version: \"9.9\"");
    }

    #[test]
    fn test_missing_attributes_message_lists_every_name() {
        let err = Error::MissingRequiredAttributes {
            missing: vec!["id".to_string(), "source".to_string()],
        };
        assert_eq!(err.to_string(), "[E004] missing required attributes: id, source");
    }

    #[test]
    fn test_type_mismatch_names_both_types() {
        let err = Error::TypeMismatch {
            attribute: "time".to_string(),
            expected: AttributeType::Timestamp,
            actual: AttributeType::String,
        };
        let msg = err.to_string();
        assert!(msg.contains("Timestamp"));
        assert!(msg.contains("String"));
        assert!(msg.contains("\"time\""));
    }
}
