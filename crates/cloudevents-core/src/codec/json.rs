//! The CloudEvents JSON event format.
//!
//! Structured bodies are single JSON objects; batch bodies are arrays of
//! them. Boolean and Integer attributes are written as JSON booleans and
//! numbers, every other attribute as its canonical string.
//!
//! Members are written in attribute order: required, optional, then
//! extensions. An inferred content type follows them and the payload comes
//! last.
//!
//! Payload rules:
//! - Binary payloads are written to `data_base64`. Spec version 0.3 has no
//!   `data_base64`; there the base64 text goes to `data` and
//!   `datacontentencoding` is set to `base64`.
//! - Text and JSON payloads are written to `data`. Text without a declared
//!   content type is written with `text/plain` so it decodes as text again.
//! - On decode, `data` stays a JSON document when the declared content type
//!   is JSON or absent; otherwise it must be a string.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::codec::content_type::ContentType;
use crate::codec::formatter::{
    EncodedMessage, EventFormatter, decode_data_by_content_type, encode_data,
};
use crate::error::{Error, Result};
use crate::model::spec_version::SPEC_VERSION_ATTRIBUTE;
use crate::model::{Attribute, AttributeType, AttributeValue, CloudEvent, Data, SpecVersion};
use crate::validate::{check_valid_batch, check_valid_event};

/// Content type of structured JSON bodies.
pub const JSON_EVENT_CONTENT_TYPE: &str = "application/cloudevents+json; charset=utf-8";

/// Content type of batch JSON bodies.
pub const JSON_BATCH_CONTENT_TYPE: &str = "application/cloudevents-batch+json; charset=utf-8";

const DATA_MEMBER: &str = "data";
const DATA_BASE64_MEMBER: &str = "data_base64";
/// 0.3 marks base64 payloads in `data` with this attribute. The format owns
/// it: it is written for binary payloads and consumed on decode.
const DATA_CONTENT_ENCODING: &str = "datacontentencoding";
const BASE64_ENCODING: &str = "base64";
const TEXT_MEDIA_TYPE: &str = "text/plain";

const FORMAT: &str = "JSON";

/// Options for [`JsonEventFormatter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormatterOptions {
    /// Indent encoded bodies.
    pub pretty: bool,

    /// Write an inferred data content type into structured bodies when the
    /// event declares none (`application/json` for JSON payloads). Text
    /// payloads always get `text/plain`.
    pub infer_data_content_type: bool,
}

impl JsonFormatterOptions {
    /// Creates default (compact, non-inferring) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// The JSON event format, including batch mode.
#[derive(Debug, Clone, Default)]
pub struct JsonEventFormatter {
    options: JsonFormatterOptions,
}

impl JsonEventFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: JsonFormatterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &JsonFormatterOptions {
        &self.options
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        let result = if self.options.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        result.map_err(|e| Error::malformed(FORMAT, e.to_string()))
    }

    fn parse_body(&self, body: &[u8], content_type: &str) -> Result<Value> {
        let content_type = ContentType::parse(content_type);
        if !content_type.is_utf8() {
            return Err(Error::invalid_argument(
                "content_type",
                format!("unsupported charset {:?}", content_type.charset().unwrap_or_default()),
            ));
        }
        serde_json::from_slice(body).map_err(|e| Error::malformed(FORMAT, e.to_string()))
    }

    fn encode_object(&self, event: &CloudEvent) -> Map<String, Value> {
        let base64_in_data = uses_content_encoding(event.spec_version());

        let mut object = Map::new();
        for (attribute, value) in event.populated_attributes() {
            if base64_in_data && attribute.name() == DATA_CONTENT_ENCODING {
                continue;
            }
            object.insert(attribute.name().to_string(), attribute_to_json(value));
        }

        if event.data_content_type().is_none() {
            let inferred = match event.data() {
                Some(Data::Text(_)) => Some(TEXT_MEDIA_TYPE),
                Some(data) if self.options.infer_data_content_type => {
                    self.infer_data_content_type(data)
                }
                _ => None,
            };
            if let (Some(inferred), Some(attribute)) =
                (inferred, event.spec_version().data_content_type_attribute())
            {
                object.insert(attribute.name().to_string(), Value::String(inferred.to_string()));
            }
        }

        match event.data() {
            None => {}
            Some(Data::Binary(bytes)) if base64_in_data => {
                object.insert(
                    DATA_CONTENT_ENCODING.to_string(),
                    Value::String(BASE64_ENCODING.to_string()),
                );
                object.insert(DATA_MEMBER.to_string(), Value::String(BASE64.encode(bytes)));
            }
            Some(Data::Binary(bytes)) => {
                object.insert(DATA_BASE64_MEMBER.to_string(), Value::String(BASE64.encode(bytes)));
            }
            Some(Data::Text(text)) => {
                object.insert(DATA_MEMBER.to_string(), Value::String(text.clone()));
            }
            Some(Data::Json(value)) => {
                object.insert(DATA_MEMBER.to_string(), value.clone());
            }
        }
        object
    }
}

impl EventFormatter for JsonEventFormatter {
    fn name(&self) -> &'static str {
        "JsonEventFormatter"
    }

    fn decode_structured(
        &self,
        body: &[u8],
        content_type: &str,
        extensions: &[Arc<Attribute>],
    ) -> Result<CloudEvent> {
        let value = self.parse_body(body, content_type)?;
        let Value::Object(object) = value else {
            return Err(Error::malformed(FORMAT, "structured body must be a JSON object"));
        };
        let event = decode_object(object, extensions)?;
        debug!(
            spec_version = %event.spec_version(),
            attributes = event.populated_attributes().count(),
            "decoded structured event"
        );
        Ok(event)
    }

    fn decode_binary_data(&self, body: &[u8], event: &mut CloudEvent) -> Result<()> {
        if body.is_empty() {
            event.clear_data();
            return Ok(());
        }
        let data = decode_data_by_content_type(body, event.data_content_type());
        event.set_data(data);
        Ok(())
    }

    fn encode_structured(&self, event: &CloudEvent) -> Result<EncodedMessage> {
        check_valid_event(event)?;
        let object = self.encode_object(event);
        let body = self.serialize(&Value::Object(object))?;
        debug!(
            spec_version = %event.spec_version(),
            bytes = body.len(),
            "encoded structured event"
        );
        Ok(EncodedMessage {
            body,
            content_type: JSON_EVENT_CONTENT_TYPE.to_string(),
        })
    }

    fn encode_binary_data(&self, event: &CloudEvent) -> Result<Vec<u8>> {
        check_valid_event(event)?;
        match event.data() {
            None => Ok(Vec::new()),
            Some(data) => encode_data(data),
        }
    }

    fn decode_batch(
        &self,
        body: &[u8],
        content_type: &str,
        extensions: &[Arc<Attribute>],
    ) -> Result<Vec<CloudEvent>> {
        let value = self.parse_body(body, content_type)?;
        let Value::Array(elements) = value else {
            return Err(Error::malformed(FORMAT, "batch body must be a JSON array"));
        };

        let mut events = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let Value::Object(object) = element else {
                return Err(Error::malformed(
                    FORMAT,
                    format!("batch element {index} is not a JSON object"),
                ));
            };
            events.push(decode_object(object, extensions)?);
        }
        debug!(events = events.len(), "decoded batch");
        Ok(events)
    }

    fn encode_batch(&self, events: &[CloudEvent]) -> Result<EncodedMessage> {
        check_valid_batch(events)?;
        let elements = events
            .iter()
            .map(|event| Value::Object(self.encode_object(event)))
            .collect();
        let body = self.serialize(&Value::Array(elements))?;
        debug!(events = events.len(), bytes = body.len(), "encoded batch");
        Ok(EncodedMessage {
            body,
            content_type: JSON_BATCH_CONTENT_TYPE.to_string(),
        })
    }

    fn infer_data_content_type(&self, data: &Data) -> Option<&'static str> {
        match data {
            Data::Text(_) => Some(TEXT_MEDIA_TYPE),
            Data::Json(_) => Some("application/json"),
            Data::Binary(_) => None,
        }
    }
}

fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Boolean(b) => Value::Bool(*b),
        AttributeValue::Integer(i) => Value::Number(Number::from(*i)),
        other => Value::String(other.to_canonical_string()),
    }
}

/// Spec versions that carry base64 payloads in `data` (0.3).
fn uses_content_encoding(spec_version: &SpecVersion) -> bool {
    spec_version.attribute(DATA_CONTENT_ENCODING).is_some()
}

/// Builds an event from one JSON object. The result is always valid.
fn decode_object(object: Map<String, Value>, extensions: &[Arc<Attribute>]) -> Result<CloudEvent> {
    let spec_version = match object.get(SPEC_VERSION_ATTRIBUTE) {
        Some(Value::String(id)) => {
            SpecVersion::from_version_id(id).ok_or_else(|| Error::UnknownSpecVersion {
                version: id.clone(),
            })?
        }
        None | Some(Value::Null) => {
            return Err(Error::MissingRequiredAttributes {
                missing: vec![SPEC_VERSION_ATTRIBUTE.to_string()],
            });
        }
        Some(other) => {
            return Err(Error::malformed(
                FORMAT,
                format!("specversion must be a string, found {other}"),
            ));
        }
    };

    let mut event = CloudEvent::with_extensions(spec_version, extensions.iter().cloned())?;

    // Members are visited in wire order so extensions register in that order
    let mut data = None;
    let mut data_base64 = None;
    for (name, value) in object {
        match name.as_str() {
            SPEC_VERSION_ATTRIBUTE => {}
            DATA_MEMBER => data = Some(value).filter(|v| !v.is_null()),
            DATA_BASE64_MEMBER => data_base64 = Some(value).filter(|v| !v.is_null()),
            _ => decode_attribute(&mut event, &name, value)?,
        }
    }

    match (data, data_base64) {
        (Some(_), Some(_)) => {
            return Err(Error::malformed(
                FORMAT,
                "data and data_base64 must not both be present",
            ));
        }
        (None, Some(encoded)) => {
            event.set_data(decode_base64_member(DATA_BASE64_MEMBER, encoded)?);
        }
        (Some(data), None) if has_base64_content_encoding(&event) => {
            event.remove(DATA_CONTENT_ENCODING)?;
            event.set_data(decode_base64_member(DATA_MEMBER, data)?);
        }
        (Some(data), None) => {
            let payload = decode_data_member(&event, data)?;
            event.set_data(payload);
        }
        (None, None) => {}
    }

    event.validate()?;
    Ok(event)
}

fn decode_attribute(event: &mut CloudEvent, name: &str, value: Value) -> Result<()> {
    let attribute_type = event.attribute(name).map(|a| a.attribute_type());
    match (value, attribute_type) {
        (Value::Null, _) => Ok(()),
        (Value::String(text), _) => event.set_attribute_from_string(name, &text),
        (Value::Bool(b), None) => {
            let attribute = Arc::new(Attribute::extension(name, AttributeType::Boolean)?);
            event.set_attribute(&attribute, Some(AttributeValue::Boolean(b)))
        }
        (Value::Bool(b), Some(_)) => event.set(name, b),
        (Value::Number(n), None) => {
            let value = json_integer(&n)?;
            let attribute = Arc::new(Attribute::extension(name, AttributeType::Integer)?);
            event.set_attribute(&attribute, Some(value))
        }
        (Value::Number(n), Some(AttributeType::Integer)) => event.set(name, json_integer(&n)?),
        (Value::Number(_), Some(expected)) => Err(Error::TypeMismatch {
            attribute: name.to_string(),
            expected,
            actual: AttributeType::Integer,
        }),
        (Value::Array(_) | Value::Object(_), _) => Err(Error::malformed(
            FORMAT,
            format!("attribute {name:?} must be a string, boolean or number"),
        )),
    }
}

fn json_integer(n: &Number) -> Result<AttributeValue> {
    n.as_i64()
        .and_then(|i| i32::try_from(i).ok())
        .map(AttributeValue::Integer)
        .ok_or_else(|| Error::Format {
            text: n.to_string(),
            attribute_type: AttributeType::Integer,
            reason: "not a 32-bit signed integer".to_string(),
        })
}

fn has_base64_content_encoding(event: &CloudEvent) -> bool {
    event
        .get(DATA_CONTENT_ENCODING)
        .and_then(AttributeValue::as_str)
        .is_some_and(|encoding| encoding.eq_ignore_ascii_case(BASE64_ENCODING))
}

fn decode_data_member(event: &CloudEvent, data: Value) -> Result<Data> {
    let is_json = event
        .data_content_type()
        .is_none_or(|ct| ContentType::parse(ct).is_json());
    match data {
        data if is_json => Ok(Data::Json(data)),
        Value::String(text) => Ok(Data::Text(text)),
        _ => Err(Error::malformed(
            FORMAT,
            "data must be a string for non-JSON content types",
        )),
    }
}

fn decode_base64_member(member: &str, value: Value) -> Result<Data> {
    let Value::String(encoded) = value else {
        return Err(Error::malformed(FORMAT, format!("{member} must be a string")));
    };
    BASE64
        .decode(encoded.as_bytes())
        .map(Data::Binary)
        .map_err(|e| Error::malformed(FORMAT, format!("{member} is not valid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::model::EventBuilder;
    use crate::model::spec_version::{V0_3, V1_0};

    const CT: &str = "application/cloudevents+json";

    fn sample_event() -> CloudEvent {
        EventBuilder::new()
            .id("A234-1234-1234")
            .source("https://example.com")
            .ty("com.example.test")
            .time("2018-04-05T17:31:00Z")
            .data_content_type("text/plain")
            .data("hello")
            .extension("comexampleextension1", "value")
            .build()
            .unwrap()
    }

    fn encode(event: &CloudEvent) -> Value {
        let encoded = JsonEventFormatter::new().encode_structured(event).unwrap();
        serde_json::from_slice(&encoded.body).unwrap()
    }

    fn decode(value: Value) -> Result<CloudEvent> {
        JsonEventFormatter::new().decode_structured(value.to_string().as_bytes(), CT, &[])
    }

    #[test]
    fn test_structured_roundtrip() {
        let event = sample_event();
        let formatter = JsonEventFormatter::new();
        let encoded = formatter.encode_structured(&event).unwrap();
        assert_eq!(encoded.content_type, JSON_EVENT_CONTENT_TYPE);

        let decoded = formatter
            .decode_structured(&encoded.body, &encoded.content_type, &[])
            .unwrap();
        assert_eq!(decoded, event);
        assert_eq!(decoded.id(), Some("A234-1234-1234"));
        assert_eq!(decoded.time().unwrap().to_string(), "2018-04-05T17:31:00Z");
        assert_eq!(decoded.data(), Some(&Data::Text("hello".to_string())));
        assert_eq!(
            decoded.get("comexampleextension1"),
            Some(&AttributeValue::from("value"))
        );
    }

    #[test]
    fn test_structured_layout() {
        assert_eq!(
            encode(&sample_event()),
            json!({
                "specversion": "1.0",
                "id": "A234-1234-1234",
                "source": "https://example.com",
                "type": "com.example.test",
                "time": "2018-04-05T17:31:00Z",
                "datacontenttype": "text/plain",
                "comexampleextension1": "value",
                "data": "hello"
            })
        );
    }

    #[test]
    fn test_members_follow_attribute_order() {
        let value = encode(&sample_event());
        let names: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [
                "specversion",
                "id",
                "source",
                "type",
                "datacontenttype",
                "time",
                "comexampleextension1",
                "data"
            ]
        );

        let body = json!({
            "specversion": "1.0", "id": "1", "source": "/s", "type": "t",
            "zeta": "z", "alpha": "a"
        });
        let event = decode(body).unwrap();
        let extensions: Vec<&str> = event.extension_attributes().map(|a| a.name()).collect();
        assert_eq!(extensions, ["zeta", "alpha"]);
    }

    #[test]
    fn test_typed_extensions_use_json_kinds() {
        let count = Arc::new(Attribute::extension("count", AttributeType::Integer).unwrap());
        let mut event = sample_event();
        event.set_attribute(&count, Some(7.into())).unwrap();
        let flag = Arc::new(Attribute::extension("flag", AttributeType::Boolean).unwrap());
        event.set_attribute(&flag, Some(true.into())).unwrap();

        let value = encode(&event);
        assert_eq!(value["count"], json!(7));
        assert_eq!(value["flag"], json!(true));

        // Without descriptors the JSON kinds pick the types
        let decoded = decode(value).unwrap();
        assert_eq!(decoded.attribute("count").unwrap().attribute_type(), AttributeType::Integer);
        assert_eq!(decoded.get("flag"), Some(&AttributeValue::Boolean(true)));
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_supplied_extensions_take_precedence() {
        let level = Arc::new(Attribute::extension("level", AttributeType::Integer).unwrap());
        let body = json!({
            "specversion": "1.0", "id": "1", "source": "/s", "type": "t", "level": "3"
        });
        let event = JsonEventFormatter::new()
            .decode_structured(body.to_string().as_bytes(), CT, &[level])
            .unwrap();
        assert_eq!(event.get("level"), Some(&AttributeValue::Integer(3)));
    }

    #[test]
    fn test_binary_payload_uses_data_base64() {
        let mut event = sample_event();
        event.set_data_content_type("application/octet-stream").unwrap();
        event.set_data(vec![0u8, 1, 2, 255]);

        let value = encode(&event);
        assert_eq!(value["data_base64"], json!("AAEC/w=="));
        assert!(value.get("data").is_none());
        assert_eq!(decode(value).unwrap(), event);
    }

    #[test]
    fn test_json_payload() {
        let mut event = sample_event();
        event.set_data_content_type("application/json").unwrap();
        event.set_data(json!({"temperature": 21, "unit": "C"}));

        let value = encode(&event);
        assert_eq!(value["data"], json!({"temperature": 21, "unit": "C"}));
        assert_eq!(decode(value).unwrap(), event);
    }

    #[test]
    fn test_missing_content_type_implies_json() {
        let body = json!({
            "specversion": "1.0", "id": "1", "source": "/s", "type": "t", "data": [1, 2, 3]
        });
        let event = decode(body).unwrap();
        assert_eq!(event.data(), Some(&Data::Json(json!([1, 2, 3]))));
    }

    #[test]
    fn test_text_content_type_requires_string_data() {
        let body = json!({
            "specversion": "1.0", "id": "1", "source": "/s", "type": "t",
            "datacontenttype": "text/plain", "data": {"a": 1}
        });
        assert!(matches!(decode(body), Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_data_and_data_base64_conflict() {
        let body = json!({
            "specversion": "1.0", "id": "1", "source": "/s", "type": "t",
            "data": "x", "data_base64": "eA=="
        });
        assert!(matches!(decode(body), Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_0_3_base64_content_encoding() {
        let body = json!({
            "specversion": "0.3", "id": "1", "source": "/s", "type": "t",
            "datacontentencoding": "base64", "data": "aGVsbG8="
        });
        let event = decode(body).unwrap();
        assert_eq!(event.spec_version(), &*V0_3);
        assert_eq!(event.data(), Some(&Data::Binary(b"hello".to_vec())));
        assert!(event.get("datacontentencoding").is_none());
    }

    #[test]
    fn test_0_3_binary_payload_uses_data_with_content_encoding() {
        let event = EventBuilder::with_spec_version(&V0_3)
            .id("1")
            .source("/s")
            .ty("t")
            .data(vec![1u8, 2, 3])
            .build()
            .unwrap();

        let value = encode(&event);
        assert_eq!(value["data"], json!("AQID"));
        assert_eq!(value["datacontentencoding"], json!("base64"));
        assert!(value.get("data_base64").is_none());
        assert_eq!(decode(value).unwrap(), event);

        // Text payloads in 0.3 stay plain
        let mut text = event.clone();
        text.set_data("hello");
        let value = encode(&text);
        assert_eq!(value["data"], json!("hello"));
        assert!(value.get("datacontentencoding").is_none());
    }

    #[test]
    fn test_decode_errors() {
        let formatter = JsonEventFormatter::new();
        assert!(matches!(
            formatter.decode_structured(b"{not json", CT, &[]),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            formatter.decode_structured(b"[]", CT, &[]),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            decode(json!({"specversion": "9.9", "id": "1", "source": "/s", "type": "t"})),
            Err(Error::UnknownSpecVersion { ref version }) if version == "9.9"
        ));
        assert!(matches!(
            decode(json!({"id": "1", "source": "/s", "type": "t"})),
            Err(Error::MissingRequiredAttributes { .. })
        ));
        assert_eq!(
            decode(json!({"specversion": "1.0", "id": "1", "type": "t"})).unwrap_err(),
            Error::MissingRequiredAttributes {
                missing: vec!["source".to_string()]
            }
        );
        let with = |name: &str, value: Value| {
            let mut body = json!({"specversion": "1.0", "id": "1", "source": "/s", "type": "t"});
            body[name] = value;
            decode(body)
        };
        assert!(matches!(with("time", json!("noon")), Err(Error::Format { .. })));
        assert!(matches!(with("nested", json!({"a": 1})), Err(Error::Malformed { .. })));
        assert!(matches!(with("big", json!(1u64 << 40)), Err(Error::Format { .. })));
        assert!(matches!(
            formatter.decode_structured(b"{}", "application/cloudevents+json; charset=latin1", &[]),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_null_members_are_ignored() {
        let event = decode(json!({
            "specversion": "1.0", "id": "1", "source": "/s", "type": "t",
            "subject": null, "data": null
        }))
        .unwrap();
        assert_eq!(event.subject(), None);
        assert_eq!(event.data(), None);
    }

    #[test]
    fn test_encode_requires_valid_event() {
        let formatter = JsonEventFormatter::new();
        let event = CloudEvent::with_spec_version(&V1_0);
        assert!(matches!(
            formatter.encode_structured(&event),
            Err(Error::MissingRequiredAttributes { .. })
        ));
        assert!(formatter.encode_binary_data(&event).is_err());
    }

    #[test]
    fn test_offset_is_preserved() {
        let mut event = sample_event();
        event.set_attribute_from_string("time", "2018-04-05T18:31:00+01:00").unwrap();
        let value = encode(&event);
        assert_eq!(value["time"], json!("2018-04-05T18:31:00+01:00"));
        assert_eq!(decode(value).unwrap().time(), event.time());
    }

    #[test]
    fn test_infer_data_content_type() {
        let formatter = JsonEventFormatter::with_options(JsonFormatterOptions {
            infer_data_content_type: true,
            ..JsonFormatterOptions::default()
        });
        let event = EventBuilder::new()
            .id("1")
            .source("/s")
            .ty("t")
            .data(json!({"a": 1}))
            .build()
            .unwrap();
        let encoded = formatter.encode_structured(&event).unwrap();
        let value: Value = serde_json::from_slice(&encoded.body).unwrap();
        assert_eq!(value["datacontenttype"], json!("application/json"));

        // Off by default
        assert!(encode(&event).get("datacontenttype").is_none());
    }

    #[test]
    fn test_text_without_content_type_stays_text() {
        let event = EventBuilder::new()
            .id("1")
            .source("/s")
            .ty("t")
            .data("hello")
            .build()
            .unwrap();
        let value = encode(&event);
        assert_eq!(value["datacontenttype"], json!("text/plain"));
        assert_eq!(value["data"], json!("hello"));

        let decoded = decode(value).unwrap();
        assert_eq!(decoded.data(), Some(&Data::Text("hello".to_string())));
        assert_eq!(decoded.data_content_type(), Some("text/plain"));
    }

    #[test]
    fn test_pretty_output() {
        let formatter = JsonEventFormatter::with_options(JsonFormatterOptions::pretty());
        let encoded = formatter.encode_structured(&sample_event()).unwrap();
        assert!(encoded.body.contains(&b'\n'));
    }

    #[test]
    fn test_binary_mode_data() {
        let formatter = JsonEventFormatter::new();
        let event = sample_event();
        assert_eq!(formatter.encode_binary_data(&event).unwrap(), b"hello");

        let mut target = CloudEvent::new();
        target.set_data_content_type("application/json").unwrap();
        formatter.decode_binary_data(br#"{"a":true}"#, &mut target).unwrap();
        assert_eq!(target.data(), Some(&Data::Json(json!({"a": true}))));
        // Attributes are untouched and not validated
        assert!(!target.is_valid());

        formatter.decode_binary_data(b"", &mut target).unwrap();
        assert_eq!(target.data(), None);
    }

    #[test]
    fn test_batch_empty() {
        let formatter = JsonEventFormatter::new();
        let encoded = formatter.encode_batch(&[]).unwrap();
        assert_eq!(encoded.body, b"[]");
        assert_eq!(encoded.content_type, JSON_BATCH_CONTENT_TYPE);
        let decoded = formatter.decode_batch(&encoded.body, &encoded.content_type, &[]).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_batch_preserves_order() {
        let formatter = JsonEventFormatter::new();
        let first = sample_event();
        let mut second = sample_event();
        second.set_id("B234-1234-1234").unwrap();
        second.set_data(json!({"n": 2}));
        second.set_data_content_type("application/json").unwrap();

        let events = vec![first, second];
        let encoded = formatter.encode_batch(&events).unwrap();
        let decoded = formatter.decode_batch(&encoded.body, &encoded.content_type, &[]).unwrap();
        assert_eq!(decoded, events);
    }

    #[test]
    fn test_batch_errors() {
        let formatter = JsonEventFormatter::new();
        assert!(matches!(
            formatter.decode_batch(b"{}", JSON_BATCH_CONTENT_TYPE, &[]),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            formatter.decode_batch(b"[1]", JSON_BATCH_CONTENT_TYPE, &[]),
            Err(Error::Malformed { .. })
        ));
        assert!(matches!(
            formatter.encode_batch(&[sample_event(), CloudEvent::new()]),
            Err(Error::MissingRequiredAttributes { .. })
        ));
    }

    #[test]
    #[traced_test]
    fn test_decode_is_logged() {
        let formatter = JsonEventFormatter::new();
        let encoded = formatter.encode_structured(&sample_event()).unwrap();
        formatter.decode_structured(&encoded.body, CT, &[]).unwrap();
        assert!(logs_contain("encoded structured event"));
        assert!(logs_contain("decoded structured event"));
        assert!(logs_contain("spec_version=1.0"));
    }
}
