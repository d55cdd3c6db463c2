//! Unit tests for facet declaration: builder structural checks.

use rstest::rstest;

use crate::value::{PropertyType, PropertyValue};
use crate::{Facet, FacetError, PropertyDescriptor};

#[rstest]
#[case(PropertyDescriptor::integer("retries"), PropertyType::Integer)]
#[case(PropertyDescriptor::boolean("retries"), PropertyType::Boolean)]
fn duplicate_property_with_conflicting_type_fails_build(
    #[case] redeclaration: PropertyDescriptor,
    #[case] second: PropertyType,
) {
    let err = Facet::builder("pipeline")
        .property(PropertyDescriptor::string("retries"))
        .property(redeclaration)
        .build()
        .expect_err("must conflict");
    assert!(matches!(
        &*err,
        FacetError::PropertyTypeConflict {
            name,
            first: PropertyType::String,
            second: got,
        } if name == "retries" && *got == second
    ));
}

#[test]
fn duplicate_property_with_matching_type_builds() {
    Facet::builder("pipeline")
        .property(PropertyDescriptor::string("retries"))
        .property(PropertyDescriptor::string("retries"))
        .build()
        .expect("identical redeclaration merges into one slot later");
}

#[rstest]
#[case(
    PropertyDescriptor::integer("parallelism").default_value(PropertyValue::string("four")),
    PropertyType::Integer,
    PropertyType::String
)]
#[case(
    PropertyDescriptor::boolean("streaming").default_value(PropertyValue::integer(1)),
    PropertyType::Boolean,
    PropertyType::Integer
)]
fn literal_default_must_inhabit_the_declared_type(
    #[case] descriptor: PropertyDescriptor,
    #[case] expected: PropertyType,
    #[case] actual: PropertyType,
) {
    let name = descriptor.name().to_owned();
    let err = Facet::builder("pipeline")
        .property(descriptor)
        .build()
        .expect_err("must mismatch");
    assert!(matches!(
        &*err,
        FacetError::TypeMismatch {
            name: got_name,
            expected: got_expected,
            actual: got_actual,
        } if *got_name == name && *got_expected == expected && *got_actual == actual
    ));
}

#[test]
fn matching_literal_default_builds() {
    Facet::builder("pipeline")
        .property(
            PropertyDescriptor::integer("parallelism").default_value(PropertyValue::integer(1)),
        )
        .build()
        .expect("facet builds");
}
