//! CloudEvents: a typed event envelope and the contract event formats build on.
//!
//! This crate provides the attribute type system, the four specification
//! versions, the event entity with validation, and a JSON event format.
//!
//! # Overview
//!
//! An event is bound to one spec version and carries typed attributes:
//! - **Required/optional attributes** come from the spec version
//! - **Extension attributes** are registered per event, explicitly or
//!   implicitly (unknown names become String extensions)
//! - **Values are checked on assignment**: a value of the wrong type is
//!   rejected, never converted
//!
//! # Quick Start
//!
//! ```rust
//! use cloudevents_core::{EventBuilder, EventFormatter, JsonEventFormatter};
//!
//! let event = EventBuilder::new()
//!     .id("A234-1234-1234")
//!     .source("https://example.com")
//!     .ty("com.example.test")
//!     .data_content_type("text/plain")
//!     .data("hello")
//!     .build()
//!     .unwrap();
//!
//! let formatter = JsonEventFormatter::new();
//! let encoded = formatter.encode_structured(&event).unwrap();
//! let decoded = formatter
//!     .decode_structured(&encoded.body, &encoded.content_type, &[])
//!     .unwrap();
//! assert_eq!(event, decoded);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Attribute types, values, descriptors, spec versions, events
//! - [`codec`]: The formatter contract, content types, the JSON format
//! - [`validate`]: Shared argument and completeness checks
//! - [`util`]: RFC 3339 timestamps and URI parsing
//! - [`error`]: Error types
//!
//! # Wire Modes
//!
//! Formatters handle structured and batch bodies whole. In binary mode a
//! binding maps attributes to transport metadata itself, using the
//! canonical text of each attribute type, and hands only the payload to
//! the formatter.

pub mod codec;
pub mod error;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    ContentType, EncodedMessage, EventFormatter, JsonEventFormatter, JsonFormatterOptions,
    is_cloud_event_batch_content_type, is_cloud_event_content_type,
};
pub use error::{Error, ErrorCode, Result};
pub use model::{
    Attribute, AttributeKind, AttributeType, AttributeValue, CloudEvent, Data, EventBuilder,
    SpecVersion, Timestamp,
};
pub use util::{Uri, UriReference};
pub use validate::{check_argument, check_not_none, check_valid_batch, check_valid_event};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
