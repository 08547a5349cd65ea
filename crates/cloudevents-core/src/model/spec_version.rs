//! The CloudEvents specification versions.
//!
//! Exactly four versions exist, each built once on first use and immutable
//! afterwards. Every version owns its own attribute descriptors:
//!
//! | Version | Optional attributes                                                |
//! |---------|--------------------------------------------------------------------|
//! | 0.1     | `eventtypeversion`, `time`, `schemaurl` (URI), `contenttype`       |
//! | 0.2     | `time`, `schemaurl`, `contenttype`                                 |
//! | 0.3     | `datacontenttype`, `datacontentencoding`, `schemaurl`, `subject`, `time` |
//! | 1.0     | `datacontenttype`, `dataschema` (URI), `subject`, `time`           |
//!
//! `specversion`, `id`, `source` and `type` are required by all versions.

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::attribute::Validator;
use crate::model::{Attribute, AttributeType, AttributeValue};

pub const SPEC_VERSION_ATTRIBUTE: &str = "specversion";
pub const ID_ATTRIBUTE: &str = "id";
pub const SOURCE_ATTRIBUTE: &str = "source";
pub const TYPE_ATTRIBUTE: &str = "type";
pub const TIME_ATTRIBUTE: &str = "time";
pub const SUBJECT_ATTRIBUTE: &str = "subject";

lazy_static! {
    static ref NON_EMPTY: Validator = Arc::new(|value: &AttributeValue| match value.as_str() {
        Some("") => Err("must be a non-empty string".to_string()),
        _ => Ok(()),
    });

    /// CloudEvents 0.1.
    pub static ref V0_1: SpecVersion = SpecVersion::new(
        "0.1",
        vec![
            Attribute::optional("eventtypeversion", AttributeType::String),
            Attribute::optional(TIME_ATTRIBUTE, AttributeType::Timestamp),
            Attribute::optional("schemaurl", AttributeType::Uri),
            non_empty(Attribute::optional("contenttype", AttributeType::String)),
        ],
        Roles {
            data_content_type: Some("contenttype"),
            data_schema: Some("schemaurl"),
            subject: None,
        },
    );

    /// CloudEvents 0.2.
    pub static ref V0_2: SpecVersion = SpecVersion::new(
        "0.2",
        vec![
            Attribute::optional(TIME_ATTRIBUTE, AttributeType::Timestamp),
            Attribute::optional("schemaurl", AttributeType::UriReference),
            non_empty(Attribute::optional("contenttype", AttributeType::String)),
        ],
        Roles {
            data_content_type: Some("contenttype"),
            data_schema: Some("schemaurl"),
            subject: None,
        },
    );

    /// CloudEvents 0.3.
    pub static ref V0_3: SpecVersion = SpecVersion::new(
        "0.3",
        vec![
            non_empty(Attribute::optional("datacontenttype", AttributeType::String)),
            Attribute::optional("datacontentencoding", AttributeType::String),
            Attribute::optional("schemaurl", AttributeType::UriReference),
            non_empty(Attribute::optional(SUBJECT_ATTRIBUTE, AttributeType::String)),
            Attribute::optional(TIME_ATTRIBUTE, AttributeType::Timestamp),
        ],
        Roles {
            data_content_type: Some("datacontenttype"),
            data_schema: Some("schemaurl"),
            subject: Some(SUBJECT_ATTRIBUTE),
        },
    );

    /// CloudEvents 1.0, the default version.
    pub static ref V1_0: SpecVersion = SpecVersion::new(
        "1.0",
        vec![
            non_empty(Attribute::optional("datacontenttype", AttributeType::String)),
            Attribute::optional("dataschema", AttributeType::Uri),
            non_empty(Attribute::optional(SUBJECT_ATTRIBUTE, AttributeType::String)),
            Attribute::optional(TIME_ATTRIBUTE, AttributeType::Timestamp),
        ],
        Roles {
            data_content_type: Some("datacontenttype"),
            data_schema: Some("dataschema"),
            subject: Some(SUBJECT_ATTRIBUTE),
        },
    );
}

fn non_empty(attribute: Attribute) -> Attribute {
    attribute.with_shared_validator(NON_EMPTY.clone())
}

/// Names of the attributes playing version-dependent roles.
struct Roles {
    data_content_type: Option<&'static str>,
    data_schema: Option<&'static str>,
    subject: Option<&'static str>,
}

/// A CloudEvents specification version and its attribute set.
pub struct SpecVersion {
    version_id: &'static str,
    /// Required attributes followed by optional ones, in registration order.
    attributes: Vec<Arc<Attribute>>,
    required_count: usize,
    indices: FxHashMap<String, usize>,
    roles: Roles,
}

impl SpecVersion {
    fn new(version_id: &'static str, optional: Vec<Attribute>, roles: Roles) -> Self {
        let required = [
            Attribute::required(SPEC_VERSION_ATTRIBUTE, AttributeType::String),
            non_empty(Attribute::required(ID_ATTRIBUTE, AttributeType::String)),
            Attribute::required(SOURCE_ATTRIBUTE, AttributeType::UriReference),
            non_empty(Attribute::required(TYPE_ATTRIBUTE, AttributeType::String)),
        ];
        let required_count = required.len();

        let attributes: Vec<Arc<Attribute>> = required
            .into_iter()
            .chain(optional)
            .map(Arc::new)
            .collect();

        let mut indices = FxHashMap::with_capacity_and_hasher(attributes.len(), Default::default());
        for (i, attr) in attributes.iter().enumerate() {
            indices.insert(attr.name().to_string(), i);
        }

        Self {
            version_id,
            attributes,
            required_count,
            indices,
            roles,
        }
    }

    /// Returns the version with the given id, if it is one of the four known
    /// versions.
    pub fn from_version_id(version_id: &str) -> Option<&'static SpecVersion> {
        match version_id {
            "0.1" => Some(&*V0_1),
            "0.2" => Some(&*V0_2),
            "0.3" => Some(&*V0_3),
            "1.0" => Some(&*V1_0),
            _ => None,
        }
    }

    /// Returns the default version (1.0).
    pub fn default_version() -> &'static SpecVersion {
        &*V1_0
    }

    /// Returns all known versions, oldest first.
    pub fn all() -> [&'static SpecVersion; 4] {
        [&*V0_1, &*V0_2, &*V0_3, &*V1_0]
    }

    /// The version id, e.g. `"1.0"`.
    pub fn version_id(&self) -> &'static str {
        self.version_id
    }

    /// Required attributes, `specversion` first.
    pub fn required_attributes(&self) -> &[Arc<Attribute>] {
        &self.attributes[..self.required_count]
    }

    /// Optional attributes, in registration order.
    pub fn optional_attributes(&self) -> &[Arc<Attribute>] {
        &self.attributes[self.required_count..]
    }

    /// Required then optional attributes.
    pub fn all_attributes(&self) -> &[Arc<Attribute>] {
        &self.attributes
    }

    /// Looks up a required or optional attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Arc<Attribute>> {
        self.indices.get(name).map(|&i| &self.attributes[i])
    }

    pub fn spec_version_attribute(&self) -> &Arc<Attribute> {
        &self.attributes[0]
    }

    pub fn id_attribute(&self) -> &Arc<Attribute> {
        &self.attributes[1]
    }

    pub fn source_attribute(&self) -> &Arc<Attribute> {
        &self.attributes[2]
    }

    pub fn type_attribute(&self) -> &Arc<Attribute> {
        &self.attributes[3]
    }

    /// The attribute declaring the payload content type
    /// (`contenttype` before 0.3, `datacontenttype` after).
    pub fn data_content_type_attribute(&self) -> Option<&Arc<Attribute>> {
        self.roles.data_content_type.and_then(|name| self.attribute(name))
    }

    /// The attribute referencing the payload schema
    /// (`schemaurl` before 1.0, `dataschema` in 1.0).
    pub fn data_schema_attribute(&self) -> Option<&Arc<Attribute>> {
        self.roles.data_schema.and_then(|name| self.attribute(name))
    }

    /// The `subject` attribute, absent before 0.3.
    pub fn subject_attribute(&self) -> Option<&Arc<Attribute>> {
        self.roles.subject.and_then(|name| self.attribute(name))
    }

    pub fn time_attribute(&self) -> Option<&Arc<Attribute>> {
        self.attribute(TIME_ATTRIBUTE)
    }
}

impl PartialEq for SpecVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version_id == other.version_id
    }
}

impl Eq for SpecVersion {}

impl fmt::Debug for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecVersion")
            .field("version_id", &self.version_id)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version_id)
    }
}
