//! Data model types for CloudEvents.
//!
//! This module contains the typed envelope:
//! - Attribute types and values (the CloudEvents type system)
//! - Attribute descriptors (required, optional, extension)
//! - Spec versions and their attribute sets
//! - The event entity and its payload
//! - Builders (ergonomic construction)

pub mod attribute;
pub mod attribute_type;
pub mod builder;
pub mod data;
pub mod event;
pub mod spec_version;
pub mod value;

pub use attribute::{Attribute, AttributeKind, Validator, is_valid_attribute_name};
pub use attribute_type::AttributeType;
pub use builder::EventBuilder;
pub use data::Data;
pub use event::CloudEvent;
pub use spec_version::SpecVersion;
pub use value::{AttributeValue, Timestamp};
