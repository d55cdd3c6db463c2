//! Unit tests for value coercion and the tagged wire representation.

use rstest::rstest;
use serde_json::json;

use super::{PropertyType, PropertyValue};

#[rstest]
#[case("worker-7", PropertyValue::string("worker-7"))]
#[case("", PropertyValue::string(""))]
fn coerces_strings(#[case] raw: &str, #[case] expected: PropertyValue) {
    assert_eq!(
        PropertyValue::coerce(raw, PropertyType::String),
        Some(expected)
    );
}

#[rstest]
#[case("0", 0)]
#[case("-12", -12)]
#[case("9007199254740993", 9_007_199_254_740_993)]
fn coerces_integers(#[case] raw: &str, #[case] expected: i64) {
    assert_eq!(
        PropertyValue::coerce(raw, PropertyType::Integer),
        Some(PropertyValue::integer(expected))
    );
}

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("False", false)]
fn coerces_booleans(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(
        PropertyValue::coerce(raw, PropertyType::Boolean),
        Some(PropertyValue::boolean(expected))
    );
}

#[rstest]
#[case("four", PropertyType::Integer)]
#[case("12.5", PropertyType::Integer)]
#[case("yes", PropertyType::Boolean)]
#[case("[1, 2]", PropertyType::Structured)]
#[case("{\"image\": \"x\"}", PropertyType::Structured)]
fn rejects_malformed_input(#[case] raw: &str, #[case] ty: PropertyType) {
    assert_eq!(PropertyValue::coerce(raw, ty), None);
}

#[test]
fn coerces_structured_values_with_variant_tag() {
    let raw = r#"{"variant": "docker", "image": "sdk:2.0", "pull": true}"#;
    let Some(PropertyValue::Structured { variant, fields }) =
        PropertyValue::coerce(raw, PropertyType::Structured)
    else {
        panic!("expected a structured value");
    };
    assert_eq!(variant, "docker");
    assert_eq!(fields.get("image"), Some(&json!("sdk:2.0")));
    assert_eq!(fields.get("pull"), Some(&json!(true)));
    assert!(!fields.contains_key("variant"));
}

#[test]
fn wire_representation_is_type_tagged() {
    let value = PropertyValue::integer(4);
    let encoded = serde_json::to_value(&value).expect("serializes");
    assert_eq!(encoded, json!({"type": "integer", "value": 4}));

    let decoded: PropertyValue = serde_json::from_value(encoded).expect("deserializes");
    assert_eq!(decoded, value);
}

#[test]
fn unknown_structured_variant_round_trips_verbatim() {
    let payload = json!({
        "type": "structured",
        "variant": "experimental_runner",
        "fields": {"mode": "turbo", "threads": 8}
    });
    let decoded: PropertyValue = serde_json::from_value(payload.clone()).expect("deserializes");
    assert_eq!(
        serde_json::to_value(&decoded).expect("serializes"),
        payload
    );
}
