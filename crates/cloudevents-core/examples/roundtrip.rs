//! Builds an event, encodes it as structured JSON and decodes it back.
//!
//! Pass a file path to decode a structured or batch JSON body instead.

use std::env;
use std::fs;

use cloudevents_core::{
    CloudEvent, EventBuilder, EventFormatter, JsonEventFormatter, JsonFormatterOptions,
};

fn print_event(event: &CloudEvent) {
    println!("CloudEvent {}", event.spec_version());
    for (attribute, value) in event.populated_attributes() {
        let kind = if attribute.is_extension() { " (extension)" } else { "" };
        println!(
            "  {:<24} {:<14} {}{}",
            attribute.name(),
            attribute.attribute_type().name(),
            value,
            kind
        );
    }
    match event.data() {
        Some(data) => println!("  data: {:?}", data),
        None => println!("  data: <none>"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let formatter = JsonEventFormatter::with_options(JsonFormatterOptions::pretty());

    if let Some(path) = env::args().nth(1) {
        let body = fs::read(&path)?;
        let trimmed = body.iter().find(|b| !b.is_ascii_whitespace());
        let events = if trimmed == Some(&b'[') {
            formatter.decode_batch(&body, "application/cloudevents-batch+json", &[])?
        } else {
            vec![formatter.decode_structured(&body, "application/cloudevents+json", &[])?]
        };
        for event in &events {
            print_event(event);
        }
        return Ok(());
    }

    let event = EventBuilder::new()
        .generate_id()
        .source("https://example.com")
        .ty("com.example.test")
        .time_now()
        .data_content_type("text/plain")
        .data("hello")
        .extension("comexampleextension1", "value")
        .build()?;

    let encoded = formatter.encode_structured(&event)?;
    println!("Content-Type: {}", encoded.content_type);
    println!("{}", String::from_utf8_lossy(&encoded.body));

    let decoded = formatter.decode_structured(&encoded.body, &encoded.content_type, &[])?;
    print_event(&decoded);
    assert_eq!(decoded, event);
    Ok(())
}
