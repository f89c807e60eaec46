//! Test fixtures: form bodies and a minimal PNG blob.

use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// A submission that passes every rule.
pub fn valid_fields() -> [(&'static str, &'static str); 4] {
    [
        ("fullName", "Jane Doe"),
        ("email", "jane@x.com"),
        ("phoneNumber", "1234567890"),
        ("password", "Abcdef12"),
    ]
}

pub fn multipart_form(fields: &[(&str, &str)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(name.to_string(), value.to_string())
        })
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(create_minimal_png())
        .file_name(file_name.to_string())
        .mime_type("image/png")
}

pub fn json_body(fields: &[(&str, &str)]) -> Value {
    let map = fields
        .iter()
        .map(|(name, value)| (name.to_string(), json!(value)))
        .collect::<serde_json::Map<String, Value>>();
    Value::Object(map)
}

/// (field, rule) pairs from a validation error body, in order.
pub fn error_pairs(body: &Value) -> Vec<(String, String)> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| {
            (
                e["field"].as_str().expect("field").to_string(),
                e["rule"].as_str().expect("rule").to_string(),
            )
        })
        .collect()
}
