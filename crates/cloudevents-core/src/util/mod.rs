//! Canonical text helpers shared by the attribute type system.

pub mod datetime;
pub mod uri;

pub use datetime::{DateTimeParseError, format_timestamp_rfc3339, parse_timestamp_rfc3339};
pub use uri::{Uri, UriParseError, UriReference};
