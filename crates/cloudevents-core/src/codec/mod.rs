//! Event formats and content-type classification.
//!
//! [`EventFormatter`] is the contract every format implements;
//! [`JsonEventFormatter`] is the CloudEvents JSON format.

pub mod content_type;
pub mod formatter;
pub mod json;

pub use content_type::{
    BATCH_MEDIA_TYPE, ContentType, JSON_MEDIA_TYPE, STRUCTURED_MEDIA_TYPE,
    is_cloud_event_batch_content_type, is_cloud_event_content_type,
};
pub use formatter::{EncodedMessage, EventFormatter, decode_data_by_content_type, encode_data};
pub use json::{
    JSON_BATCH_CONTENT_TYPE, JSON_EVENT_CONTENT_TYPE, JsonEventFormatter, JsonFormatterOptions,
};
