//! Unit tests for option binding: ordering, policies, and coercion
//! reporting.

use std::sync::Arc;

use rstest::{fixture, rstest};

use crate::facet::{Facet, FacetId, PropertyDescriptor};
use crate::value::PropertyValue;
use crate::{BindOptions, FacetError, FacetRegistry, UnknownKeys, bind, parse_flag_tokens};

#[fixture]
fn registry() -> Arc<FacetRegistry> {
    let mut registry = FacetRegistry::new();
    registry
        .register(
            Facet::builder("pipeline")
                .property(PropertyDescriptor::string("app_name"))
                .property(PropertyDescriptor::integer("parallelism"))
                .property(PropertyDescriptor::boolean("streaming"))
                .build()
                .expect("facet builds"),
        )
        .expect("registers");
    Arc::new(registry)
}

#[rstest]
fn last_write_wins(registry: Arc<FacetRegistry>) {
    let outcome = bind(
        &registry,
        &FacetId::new("pipeline"),
        [("parallelism", "1"), ("parallelism", "2")],
        BindOptions::default(),
    )
    .expect("binds");
    let config = outcome.into_result().expect("no entry failures");
    assert_eq!(
        config.get("parallelism").expect("gets"),
        Some(&PropertyValue::integer(2))
    );
}

#[rstest]
fn coercion_failures_are_collected_without_aborting(registry: Arc<FacetRegistry>) {
    let outcome = bind(
        &registry,
        &FacetId::new("pipeline"),
        [
            ("parallelism", "four"),
            ("app_name", "wordcount"),
            ("streaming", "maybe"),
        ],
        BindOptions::default(),
    )
    .expect("binds");

    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.errors.iter().all(|e| matches!(
        &**e,
        FacetError::TypeCoercion { .. }
    )));
    // The well-formed entry still bound.
    assert_eq!(
        outcome.config.get("app_name").expect("gets"),
        Some(&PropertyValue::string("wordcount"))
    );

    let err = outcome.into_result().expect_err("strict interpretation");
    assert!(matches!(&*err, FacetError::Aggregate(agg) if agg.len() == 2));
}

#[rstest]
fn unknown_keys_reject_by_default(registry: Arc<FacetRegistry>) {
    let outcome = bind(
        &registry,
        &FacetId::new("pipeline"),
        [("job_id", "j-1")],
        BindOptions::default(),
    )
    .expect("binds");
    assert!(
        matches!(outcome.errors.as_slice(), [e] if matches!(&**e, FacetError::UnknownProperty { name } if name == "job_id"))
    );
}

#[rstest]
fn unknown_keys_can_be_ignored(registry: Arc<FacetRegistry>) {
    let outcome = bind(
        &registry,
        &FacetId::new("pipeline"),
        [("job_id", "j-1"), ("app_name", "wordcount")],
        BindOptions {
            unknown_keys: UnknownKeys::Ignore,
            ..BindOptions::default()
        },
    )
    .expect("binds");
    let config = outcome.into_result().expect("no entry failures");
    assert_eq!(
        config.get("app_name").expect("gets"),
        Some(&PropertyValue::string("wordcount"))
    );
}

#[rstest]
fn bare_flag_binds_true_with_implicit_booleans(registry: Arc<FacetRegistry>) {
    let pairs = parse_flag_tokens(["--streaming", "--app_name=wordcount"]);
    let outcome = bind(&registry, &FacetId::new("pipeline"), pairs, BindOptions::lenient())
        .expect("binds");
    let config = outcome.into_result().expect("no entry failures");
    assert_eq!(
        config.get("streaming").expect("gets"),
        Some(&PropertyValue::boolean(true))
    );
    assert_eq!(
        config.get("app_name").expect("gets"),
        Some(&PropertyValue::string("wordcount"))
    );
}

#[rstest]
fn bare_flag_without_implicit_booleans_is_a_coercion_error(registry: Arc<FacetRegistry>) {
    let pairs = parse_flag_tokens(["--streaming"]);
    let outcome = bind(
        &registry,
        &FacetId::new("pipeline"),
        pairs,
        BindOptions::default(),
    )
    .expect("binds");
    assert!(
        matches!(outcome.errors.as_slice(), [e] if matches!(&**e, FacetError::TypeCoercion { name, .. } if name == "streaming"))
    );
}

#[test]
fn parse_flag_tokens_splits_at_first_equals() {
    let pairs = parse_flag_tokens(["--filter=a=b", "plain"]);
    assert_eq!(
        pairs,
        vec![
            (String::from("filter"), String::from("a=b")),
            (String::from("plain"), String::new()),
        ]
    );
}
