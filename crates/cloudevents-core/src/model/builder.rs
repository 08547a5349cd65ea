//! Builder API for ergonomic event construction.
//!
//! Setters record the first error and keep going, so a chain can be written
//! without `?` on every call. [`EventBuilder::build`] reports that error, or
//! a missing required attribute.
//!
//! # Example
//!
//! ```rust
//! use cloudevents_core::EventBuilder;
//!
//! let event = EventBuilder::new()
//!     .id("A234-1234-1234")
//!     .source("https://example.com")
//!     .ty("com.example.test")
//!     .time("2018-04-05T17:31:00Z")
//!     .data_content_type("text/plain")
//!     .data("hello")
//!     .extension("comexampleextension1", "value")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(event.id(), Some("A234-1234-1234"));
//! ```

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::spec_version::{SOURCE_ATTRIBUTE, TIME_ATTRIBUTE};
use crate::model::{Attribute, AttributeValue, CloudEvent, Data, SpecVersion, Timestamp};

/// Builder for constructing a valid [`CloudEvent`].
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: CloudEvent,
    error: Option<Error>,
}

impl EventBuilder {
    /// Creates a builder for a 1.0 event.
    pub fn new() -> Self {
        Self::with_spec_version(SpecVersion::default_version())
    }

    /// Creates a builder for an event of the given version.
    pub fn with_spec_version(spec_version: &'static SpecVersion) -> Self {
        Self {
            event: CloudEvent::with_spec_version(spec_version),
            error: None,
        }
    }

    /// Starts from an existing event.
    pub fn from_event(event: CloudEvent) -> Self {
        Self { event, error: None }
    }

    // =========================================================================
    // Required attributes
    // =========================================================================

    pub fn id(self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.apply(|e| e.set_id(id))
    }

    /// Sets a random (UUID v4) id.
    pub fn generate_id(self) -> Self {
        self.id(uuid::Uuid::new_v4().to_string())
    }

    /// Sets the source, parsed as a URI reference.
    pub fn source(self, source: &str) -> Self {
        self.apply(|e| e.set_attribute_from_string(SOURCE_ATTRIBUTE, source))
    }

    /// Sets the `type` attribute.
    pub fn ty(self, ty: impl Into<String>) -> Self {
        let ty = ty.into();
        self.apply(|e| e.set_ty(ty))
    }

    // =========================================================================
    // Optional attributes
    // =========================================================================

    /// Sets the time from RFC 3339 text.
    pub fn time(self, time: &str) -> Self {
        self.apply(|e| e.set_attribute_from_string(TIME_ATTRIBUTE, time))
    }

    pub fn timestamp(self, time: impl Into<Timestamp>) -> Self {
        let time = time.into();
        self.apply(|e| e.set_time(time))
    }

    /// Sets the time to now.
    pub fn time_now(self) -> Self {
        self.timestamp(Timestamp::now())
    }

    pub fn subject(self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        self.apply(|e| e.set_subject(subject))
    }

    pub fn data_content_type(self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        self.apply(|e| e.set_data_content_type(content_type))
    }

    pub fn data_schema(self, schema: &str) -> Self {
        self.apply(|e| e.set_data_schema(schema))
    }

    // =========================================================================
    // Extensions and raw attributes
    // =========================================================================

    /// Sets an attribute by name. Unknown names become String extensions.
    pub fn attribute(self, name: &str, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        self.apply(|e| e.set(name, value))
    }

    /// Sets a String extension.
    pub fn extension(self, name: &str, value: impl Into<String>) -> Self {
        self.attribute(name, AttributeValue::String(value.into()))
    }

    /// Sets a typed extension attribute, registering it if needed.
    pub fn typed_extension(
        self,
        attribute: &Arc<Attribute>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        let value = value.into();
        self.apply(|e| e.set_attribute(attribute, Some(value)))
    }

    // =========================================================================
    // Payload
    // =========================================================================

    pub fn data(mut self, data: impl Into<Data>) -> Self {
        self.event.set_data(data);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Builds the event, failing on the first setter error or on missing
    /// required attributes.
    pub fn build(self) -> Result<CloudEvent> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.event.validate()?;
        Ok(self.event)
    }

    /// Returns the event as built so far, without validation.
    pub fn build_unchecked(self) -> CloudEvent {
        self.event
    }

    fn apply<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut CloudEvent) -> Result<()>,
    {
        if self.error.is_none() {
            if let Err(error) = f(&mut self.event) {
                self.error = Some(error);
            }
        }
        self
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
