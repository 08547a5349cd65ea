//! The event entity.
//!
//! An event is bound to one spec version at construction. Its attributes are
//! kept in registration order (required, optional, then extensions) with the
//! descriptor stored next to each value, so type checks and validators never
//! need a second lookup.
//!
//! Assigning a value to a name the event does not know registers a String
//! extension for that name on this event only.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{Error, Result};
use crate::model::spec_version::{
    ID_ATTRIBUTE, SOURCE_ATTRIBUTE, SPEC_VERSION_ATTRIBUTE, TYPE_ATTRIBUTE,
};
use crate::model::{Attribute, AttributeType, AttributeValue, Data, SpecVersion, Timestamp};
use crate::util::UriReference;

#[derive(Debug, Clone)]
struct Entry {
    attribute: Arc<Attribute>,
    value: Option<AttributeValue>,
}

/// A CloudEvent: a typed attribute bag plus an optional payload.
#[derive(Debug, Clone)]
pub struct CloudEvent {
    spec_version: &'static SpecVersion,
    entries: Vec<Entry>,
    indices: FxHashMap<String, usize>,
    data: Option<Data>,
}

impl CloudEvent {
    /// Creates an empty 1.0 event.
    pub fn new() -> Self {
        Self::with_spec_version(SpecVersion::default_version())
    }

    /// Creates an empty event bound to `spec_version`.
    ///
    /// Every attribute of the version is registered; only `specversion` is
    /// populated.
    pub fn with_spec_version(spec_version: &'static SpecVersion) -> Self {
        let attributes = spec_version.all_attributes();
        let mut entries = Vec::with_capacity(attributes.len());
        let mut indices = FxHashMap::with_capacity_and_hasher(attributes.len(), Default::default());

        for (i, attribute) in attributes.iter().enumerate() {
            indices.insert(attribute.name().to_string(), i);
            entries.push(Entry {
                attribute: Arc::clone(attribute),
                value: None,
            });
        }

        // specversion always comes first
        if let Some(entry) = entries.first_mut() {
            entry.value = Some(AttributeValue::String(spec_version.version_id().to_string()));
        }

        Self {
            spec_version,
            entries,
            indices,
            data: None,
        }
    }

    /// Creates an empty event with pre-registered extension attributes.
    pub fn with_extensions<I>(spec_version: &'static SpecVersion, extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<Attribute>>,
    {
        let mut event = Self::with_spec_version(spec_version);
        for extension in extensions {
            event.register_extension(extension)?;
        }
        Ok(event)
    }

    /// The spec version this event is bound to.
    pub fn spec_version(&self) -> &'static SpecVersion {
        self.spec_version
    }

    /// Registers an extension attribute on this event.
    ///
    /// Registering the same descriptor twice is a no-op. Registering a
    /// different descriptor under a known name fails.
    pub fn register_extension(&mut self, attribute: Arc<Attribute>) -> Result<()> {
        if !attribute.is_extension() {
            return Err(Error::invalid_argument(
                "attribute",
                format!("{} is not an extension attribute", attribute.name()),
            ));
        }
        match self.indices.get(attribute.name()) {
            Some(&idx) if *self.entries[idx].attribute == *attribute => Ok(()),
            Some(_) => Err(Error::invalid_argument(
                "attribute",
                format!("an attribute named {:?} is already registered", attribute.name()),
            )),
            None => {
                self.push_entry(attribute, None);
                Ok(())
            }
        }
    }

    /// Looks up the descriptor registered under `name`.
    pub fn attribute(&self, name: &str) -> Option<&Arc<Attribute>> {
        self.indices.get(name).map(|&i| &self.entries[i].attribute)
    }

    /// Returns the value of the named attribute, if populated.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.indices
            .get(name)
            .and_then(|&i| self.entries[i].value.as_ref())
    }

    /// Returns the value of `attribute`, if populated.
    ///
    /// Fails if a different descriptor is registered under the same name.
    pub fn get_attribute(&self, attribute: &Attribute) -> Result<Option<&AttributeValue>> {
        match self.indices.get(attribute.name()) {
            None => Ok(None),
            Some(&idx) => {
                self.check_same_descriptor(idx, attribute)?;
                Ok(self.entries[idx].value.as_ref())
            }
        }
    }

    /// Assigns a value to the named attribute.
    pub fn set(&mut self, name: &str, value: impl Into<AttributeValue>) -> Result<()> {
        self.set_value(name, Some(value.into()))
    }

    /// Removes the value of the named attribute, returning it.
    ///
    /// The attribute stays registered.
    pub fn remove(&mut self, name: &str) -> Result<Option<AttributeValue>> {
        check_writable(name)?;
        Ok(self
            .indices
            .get(name)
            .and_then(|&i| self.entries[i].value.take()))
    }

    /// Assigns or clears the named attribute.
    ///
    /// - `None` clears the value; clearing an unknown name does nothing.
    /// - A value for an unknown name registers a String extension first, so
    ///   non-String values for unknown names fail with a type mismatch.
    /// - `specversion` is read-only.
    pub fn set_value(&mut self, name: &str, value: Option<AttributeValue>) -> Result<()> {
        check_writable(name)?;
        match (self.indices.get(name).copied(), value) {
            (Some(idx), None) => {
                self.entries[idx].value = None;
                Ok(())
            }
            (None, None) => Ok(()),
            (Some(idx), Some(value)) => {
                self.entries[idx].attribute.validate(&value)?;
                self.entries[idx].value = Some(value);
                Ok(())
            }
            (None, Some(value)) => {
                let attribute = Self::implicit_extension(name)?;
                attribute.validate(&value)?;
                self.push_entry(attribute, Some(value));
                Ok(())
            }
        }
    }

    /// Assigns or clears the value of `attribute`.
    ///
    /// Extension descriptors unknown to this event are registered first.
    pub fn set_attribute(
        &mut self,
        attribute: &Arc<Attribute>,
        value: Option<AttributeValue>,
    ) -> Result<()> {
        check_writable(attribute.name())?;
        match self.indices.get(attribute.name()).copied() {
            Some(idx) => {
                self.check_same_descriptor(idx, attribute)?;
                self.set_value(attribute.name(), value)
            }
            None if attribute.is_extension() => {
                if let Some(value) = &value {
                    attribute.validate(value)?;
                }
                self.push_entry(Arc::clone(attribute), value);
                Ok(())
            }
            None => Err(Error::invalid_argument(
                "attribute",
                format!(
                    "{} is not an attribute of spec version {}",
                    attribute.name(),
                    self.spec_version
                ),
            )),
        }
    }

    /// Parses `text` as the named attribute and assigns it.
    ///
    /// Unknown names become String extensions. This is the entry point for
    /// bindings that only see wire text.
    pub fn set_attribute_from_string(&mut self, name: &str, text: &str) -> Result<()> {
        check_writable(name)?;
        match self.indices.get(name).copied() {
            Some(idx) => {
                let value = self.entries[idx].attribute.parse(text)?;
                self.entries[idx].value = Some(value);
            }
            None => {
                let attribute = Self::implicit_extension(name)?;
                let value = attribute.parse(text)?;
                self.push_entry(attribute, Some(value));
            }
        }
        Ok(())
    }

    /// Iterates populated attributes: required, optional, then extensions,
    /// each group in registration order.
    pub fn populated_attributes(
        &self,
    ) -> impl Iterator<Item = (&Arc<Attribute>, &AttributeValue)> + Clone {
        self.entries
            .iter()
            .filter_map(|e| e.value.as_ref().map(|v| (&e.attribute, v)))
    }

    /// Iterates registered extension attributes, populated or not.
    pub fn extension_attributes(&self) -> impl Iterator<Item = &Arc<Attribute>> + Clone {
        self.entries
            .iter()
            .map(|e| &e.attribute)
            .filter(|a| a.is_extension())
    }

    /// Names of required attributes without a value.
    pub fn missing_required_attributes(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.attribute.is_required() && e.value.is_none())
            .map(|e| e.attribute.name())
            .collect()
    }

    /// Returns true if every required attribute is populated.
    pub fn is_valid(&self) -> bool {
        self.entries
            .iter()
            .all(|e| !e.attribute.is_required() || e.value.is_some())
    }

    /// Checks that every required attribute is populated.
    pub fn validate(&self) -> Result<&Self> {
        let missing = self.missing_required_attributes();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(Error::MissingRequiredAttributes {
                missing: missing.into_iter().map(str::to_string).collect(),
            })
        }
    }

    // =========================================================================
    // Well-known attributes
    // =========================================================================

    pub fn id(&self) -> Option<&str> {
        self.get(ID_ATTRIBUTE).and_then(AttributeValue::as_str)
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> Result<()> {
        self.set_value(ID_ATTRIBUTE, Some(AttributeValue::String(id.into())))
    }

    pub fn source(&self) -> Option<&UriReference> {
        self.get(SOURCE_ATTRIBUTE).and_then(AttributeValue::as_uri_reference)
    }

    pub fn set_source(&mut self, source: UriReference) -> Result<()> {
        self.set_value(SOURCE_ATTRIBUTE, Some(AttributeValue::UriReference(source)))
    }

    /// The `type` attribute.
    pub fn ty(&self) -> Option<&str> {
        self.get(TYPE_ATTRIBUTE).and_then(AttributeValue::as_str)
    }

    pub fn set_ty(&mut self, ty: impl Into<String>) -> Result<()> {
        self.set_value(TYPE_ATTRIBUTE, Some(AttributeValue::String(ty.into())))
    }

    pub fn time(&self) -> Option<&Timestamp> {
        let attribute = self.spec_version.time_attribute()?;
        self.get(attribute.name()).and_then(AttributeValue::as_timestamp)
    }

    pub fn set_time(&mut self, time: impl Into<Timestamp>) -> Result<()> {
        let attribute = role(self.spec_version.time_attribute(), "time", self.spec_version)?;
        self.set_attribute(&attribute, Some(AttributeValue::Timestamp(time.into())))
    }

    pub fn subject(&self) -> Option<&str> {
        let attribute = self.spec_version.subject_attribute()?;
        self.get(attribute.name()).and_then(AttributeValue::as_str)
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<()> {
        let attribute = role(self.spec_version.subject_attribute(), "subject", self.spec_version)?;
        self.set_attribute(&attribute, Some(AttributeValue::String(subject.into())))
    }

    /// The declared payload content type (`datacontenttype`, or
    /// `contenttype` before 0.3).
    pub fn data_content_type(&self) -> Option<&str> {
        let attribute = self.spec_version.data_content_type_attribute()?;
        self.get(attribute.name()).and_then(AttributeValue::as_str)
    }

    pub fn set_data_content_type(&mut self, content_type: impl Into<String>) -> Result<()> {
        let attribute = role(
            self.spec_version.data_content_type_attribute(),
            "data content type",
            self.spec_version,
        )?;
        self.set_attribute(&attribute, Some(AttributeValue::String(content_type.into())))
    }

    /// The payload schema (`dataschema`, or `schemaurl` before 1.0).
    pub fn data_schema(&self) -> Option<&str> {
        let attribute = self.spec_version.data_schema_attribute()?;
        match self.get(attribute.name())? {
            AttributeValue::Uri(uri) => Some(uri.as_str()),
            AttributeValue::UriReference(r) => Some(r.as_str()),
            _ => None,
        }
    }

    /// Sets the payload schema, parsing `schema` as the version's schema
    /// attribute type.
    pub fn set_data_schema(&mut self, schema: &str) -> Result<()> {
        let attribute = role(
            self.spec_version.data_schema_attribute(),
            "data schema",
            self.spec_version,
        )?;
        self.set_attribute_from_string(attribute.name(), schema)
    }

    // =========================================================================
    // Payload
    // =========================================================================

    pub fn data(&self) -> Option<&Data> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: impl Into<Data>) {
        self.data = Some(data.into());
    }

    pub fn clear_data(&mut self) {
        self.data = None;
    }

    pub fn take_data(&mut self) -> Option<Data> {
        self.data.take()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn implicit_extension(name: &str) -> Result<Arc<Attribute>> {
        let attribute = Attribute::extension(name, AttributeType::String)?;
        trace!(attribute = name, "registering implicit String extension");
        Ok(Arc::new(attribute))
    }

    fn push_entry(&mut self, attribute: Arc<Attribute>, value: Option<AttributeValue>) {
        self.indices.insert(attribute.name().to_string(), self.entries.len());
        self.entries.push(Entry { attribute, value });
    }

    fn check_same_descriptor(&self, idx: usize, attribute: &Attribute) -> Result<()> {
        if *self.entries[idx].attribute != *attribute {
            return Err(Error::invalid_argument(
                "attribute",
                format!(
                    "descriptor for {:?} differs from the one registered on this event",
                    attribute.name()
                ),
            ));
        }
        Ok(())
    }
}

impl Default for CloudEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Events are equal when they share a spec version, the same populated
/// attribute values (in any registration order) and the same payload.
impl PartialEq for CloudEvent {
    fn eq(&self, other: &Self) -> bool {
        self.spec_version == other.spec_version
            && self.data == other.data
            && self.populated_attributes().count() == other.populated_attributes().count()
            && self
                .populated_attributes()
                .all(|(attr, value)| other.get(attr.name()) == Some(value))
    }
}

fn check_writable(name: &str) -> Result<()> {
    if name == SPEC_VERSION_ATTRIBUTE {
        return Err(Error::invalid_argument(
            "name",
            "specversion is fixed when the event is created",
        ));
    }
    Ok(())
}

fn role(
    attribute: Option<&Arc<Attribute>>,
    role: &str,
    spec_version: &SpecVersion,
) -> Result<Arc<Attribute>> {
    attribute.cloned().ok_or_else(|| {
        Error::invalid_argument(
            "attribute",
            format!("spec version {spec_version} has no {role} attribute"),
        )
    })
}
