//! Primary error enum for facet composition flows.

use thiserror::Error;

use crate::value::PropertyType;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while declaring, composing, binding, validating, or
/// transmitting facet configurations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacetError {
    /// A facet identity was re-registered with a different structural
    /// definition. Identical redefinitions are a no-op instead.
    #[error("facet '{id}' is already registered with a different definition")]
    DuplicateFacet {
        /// Identity of the conflicting facet.
        id: String,
    },

    /// Registering a facet would close a cycle in the extends-graph.
    #[error("cyclic facet inheritance detected: {cycle}")]
    CyclicInheritance {
        /// Chain of facet identities participating in the cycle.
        cycle: String,
    },

    /// A facet identity is not present in the registry.
    #[error("unknown facet '{id}'")]
    UnknownFacet {
        /// The unresolved identity.
        id: String,
    },

    /// A property name is not part of the bound facet set.
    #[error("unknown property '{name}'")]
    UnknownProperty {
        /// The unresolved property name.
        name: String,
    },

    /// Two facets declare the same property name with different types.
    #[error("property '{name}' is declared as {first} and as {second}")]
    PropertyTypeConflict {
        /// The colliding property name.
        name: String,
        /// Type seen first.
        first: PropertyType,
        /// Conflicting type seen second.
        second: PropertyType,
    },

    /// A value does not inhabit the property's declared type.
    #[error("property '{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        /// The property being set.
        name: String,
        /// The declared type.
        expected: PropertyType,
        /// The type of the rejected value.
        actual: PropertyType,
    },

    /// A raw input string could not be coerced to the declared type.
    #[error("cannot parse '{raw}' as {expected} for property '{name}'")]
    TypeCoercion {
        /// The property being bound.
        name: String,
        /// The offending raw input.
        raw: String,
        /// The declared type.
        expected: PropertyType,
    },

    /// Computed defaults formed a dependency cycle.
    #[error("cyclic default evaluation: {trail}")]
    DefaultCycle {
        /// Chain of property names participating in the cycle.
        trail: String,
    },

    /// A required property has neither an explicit value nor a default.
    #[error("required property '{name}' has no value")]
    MissingRequiredValue {
        /// The unset property.
        name: String,
    },

    /// A registered validation rule rejected the configuration.
    #[error("validation failed for '{key}': {message}")]
    Validation {
        /// Configuration key that failed validation.
        key: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// The wire payload could not be read or written.
    #[error("wire payload error: {source}")]
    Payload {
        /// Underlying serialization failure.
        #[source]
        source: Box<serde_json::Error>,
    },

    /// Multiple errors occurred during a single operation.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

impl From<serde_json::Error> for FacetError {
    fn from(source: serde_json::Error) -> Self {
        Self::Payload {
            source: Box::new(source),
        }
    }
}
