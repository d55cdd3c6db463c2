//! Wire round-trip coverage across every supported property type.

use std::sync::Arc;

use anyhow::{Result, ensure};
use rstest::rstest;
use serde_json::json;

use facet_config::codec::{DecodeMode, decode, encode};
use facet_config::{
    CompositeConfig, Facet, FacetId, FacetRegistry, PropertyDescriptor, PropertyValue,
};

fn registry() -> Result<Arc<FacetRegistry>> {
    let mut registry = FacetRegistry::new();
    registry.register(
        Facet::builder("kitchen_sink")
            .property(PropertyDescriptor::string("text"))
            .property(PropertyDescriptor::integer("count"))
            .property(PropertyDescriptor::boolean("flag"))
            .property(PropertyDescriptor::structured("provisioning"))
            .build()?,
    )?;
    Ok(Arc::new(registry))
}

fn structured_sample() -> PropertyValue {
    let serde_json::Value::Object(fields) = json!({
        "image": "sdk:2.0",
        "env": {"LOG": "debug"},
        "ports": [50051, 50052]
    }) else {
        unreachable!("literal is an object");
    };
    PropertyValue::structured("docker", fields)
}

#[rstest]
#[case("text", PropertyValue::string("hello worker"))]
#[case("text", PropertyValue::string(""))]
#[case("count", PropertyValue::integer(i64::MIN))]
#[case("count", PropertyValue::integer(i64::MAX))]
#[case("flag", PropertyValue::boolean(false))]
#[case("provisioning", structured_sample())]
fn every_type_survives_the_wire(#[case] name: &str, #[case] value: PropertyValue) -> Result<()> {
    let registry = registry()?;
    let facet = FacetId::new("kitchen_sink");

    let mut config = CompositeConfig::for_facet(&registry, &facet)?;
    config.set(name, value.clone())?;

    let payload = encode(&config, &[facet.clone()])?;
    let received = decode(&registry, &payload, DecodeMode::Strict)?.config;

    ensure!(received.get(name)? == Some(&value));
    ensure!(received.as_facet(&facet)? == config.as_facet(&facet)?);
    Ok(())
}

#[test]
fn unset_properties_do_not_travel() -> Result<()> {
    let registry = registry()?;
    let facet = FacetId::new("kitchen_sink");
    let mut config = CompositeConfig::for_facet(&registry, &facet)?;
    config.set("text", PropertyValue::string("only me"))?;

    let payload = encode(&config, &[facet])?;
    let parsed: serde_json::Value = serde_json::from_str(&payload)?;
    let properties = parsed["properties"].as_object().expect("object");
    ensure!(properties.len() == 1);
    ensure!(properties.contains_key("text"));
    Ok(())
}

#[test]
fn re_encoding_a_decoded_config_is_stable() -> Result<()> {
    let registry = registry()?;
    let facet = FacetId::new("kitchen_sink");
    let mut config = CompositeConfig::for_facet(&registry, &facet)?;
    config.set("provisioning", structured_sample())?;
    config.set("count", PropertyValue::integer(3))?;

    let first = encode(&config, &[facet.clone()])?;
    let received = decode(&registry, &first, DecodeMode::Strict)?.config;
    let second = encode(&received, &[facet])?;
    ensure!(first == second);
    Ok(())
}
