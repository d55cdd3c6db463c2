//! Facet declarations: identity, property descriptors, and default policies.
//!
//! A facet is a named, independently declarable set of configuration
//! properties. Modules declare their facets through [`Facet::builder`] and
//! register them with a [`crate::FacetRegistry`]; composition happens later,
//! when a [`crate::CompositeConfig`] is built for a facet and its ancestry.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::composite::DefaultContext;
use crate::value::{PropertyType, PropertyValue};
use crate::{FacetError, FacetResult};

#[cfg(test)]
mod tests;

/// Identity of a facet, conventionally namespaced (`"dataflow.pipeline"`).
///
/// Cheap to clone; compares and orders by name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FacetId(Arc<str>);

impl FacetId {
    /// Create an identity from a facet name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The facet name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FacetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for FacetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a property obtains a value when none has been set explicitly.
#[derive(Clone)]
pub enum DefaultPolicy {
    /// No default; absence is acceptable.
    Optional,
    /// No default; validation reports the property when it is left unset.
    Required,
    /// A literal default value.
    Literal(PropertyValue),
    /// A default computed at first read, possibly from sibling properties.
    Computed(DefaultProvider),
}

impl fmt::Debug for DefaultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional => f.write_str("Optional"),
            Self::Required => f.write_str("Required"),
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

// Structural equality drives idempotent re-registration. Closures cannot be
// compared structurally, so computed providers compare by pointer identity:
// two modules sharing one provider instance count as the same declaration.
impl PartialEq for DefaultPolicy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Optional, Self::Optional) | (Self::Required, Self::Required) => true,
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

type ProviderFn = dyn Fn(&DefaultContext<'_>) -> FacetResult<PropertyValue> + Send + Sync;

/// A computed default: a shared closure evaluated against the configuration
/// the property belongs to.
#[derive(Clone)]
pub struct DefaultProvider(Arc<ProviderFn>);

impl DefaultProvider {
    /// Wrap a closure as a default provider.
    pub fn new<F>(provider: F) -> Self
    where
        F: Fn(&DefaultContext<'_>) -> FacetResult<PropertyValue> + Send + Sync + 'static,
    {
        Self(Arc::new(provider))
    }

    pub(crate) fn evaluate(&self, ctx: &DefaultContext<'_>) -> FacetResult<PropertyValue> {
        (self.0)(ctx)
    }
}

/// Metadata for a single declared property.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    value_type: PropertyType,
    description: Option<String>,
    hidden: bool,
    default: DefaultPolicy,
}

impl PropertyDescriptor {
    /// Declare a property of the given type.
    pub fn new(name: impl Into<String>, value_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            value_type,
            description: None,
            hidden: false,
            default: DefaultPolicy::Optional,
        }
    }

    /// Declare a string property.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, PropertyType::String)
    }

    /// Declare an integer property.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Integer)
    }

    /// Declare a boolean property.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Boolean)
    }

    /// Declare a structured (polymorphic) property.
    pub fn structured(name: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Structured)
    }

    /// Attach description text used by documentation generation.
    #[must_use]
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Exclude the property from generated documentation. Hidden properties
    /// remain present in every runtime operation, including serialization.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the property required: validation reports it when no value is
    /// set and no default applies.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.default = DefaultPolicy::Required;
        self
    }

    /// Give the property a literal default value.
    #[must_use]
    pub fn default_value(mut self, value: PropertyValue) -> Self {
        self.default = DefaultPolicy::Literal(value);
        self
    }

    /// Give the property a computed default, evaluated at first read.
    #[must_use]
    pub fn default_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&DefaultContext<'_>) -> FacetResult<PropertyValue> + Send + Sync + 'static,
    {
        self.default = DefaultPolicy::Computed(DefaultProvider::new(provider));
        self
    }

    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value type.
    #[must_use]
    pub const fn value_type(&self) -> PropertyType {
        self.value_type
    }

    /// Description text, when declared.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the property is excluded from generated documentation.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The default policy.
    #[must_use]
    pub const fn default_policy(&self) -> &DefaultPolicy {
        &self.default
    }
}

/// A declared facet: identity, metadata, parents, and properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Facet {
    id: FacetId,
    description: Option<String>,
    hidden: bool,
    extends: Vec<FacetId>,
    properties: Vec<PropertyDescriptor>,
}

impl Facet {
    /// Start declaring a facet.
    pub fn builder(id: impl Into<FacetId>) -> FacetBuilder {
        FacetBuilder {
            facet: Self {
                id: id.into(),
                description: None,
                hidden: false,
                extends: Vec::new(),
                properties: Vec::new(),
            },
        }
    }

    /// The facet identity.
    #[must_use]
    pub const fn id(&self) -> &FacetId {
        &self.id
    }

    /// Facet-level description text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the whole facet is excluded from generated documentation.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Parent facets this facet extends, in declaration order.
    #[must_use]
    pub fn extends(&self) -> &[FacetId] {
        &self.extends
    }

    /// Properties declared directly by this facet, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Look up a directly declared property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }
}

/// Builder for [`Facet`] declarations.
pub struct FacetBuilder {
    facet: Facet,
}

impl FacetBuilder {
    /// Attach facet-level description text.
    #[must_use]
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.facet.description = Some(text.into());
        self
    }

    /// Exclude the whole facet from generated documentation.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.facet.hidden = true;
        self
    }

    /// Declare a parent facet. Parents need not be registered yet; ancestry
    /// resolution reports them until they are.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<FacetId>) -> Self {
        self.facet.extends.push(parent.into());
        self
    }

    /// Declare a property.
    #[must_use]
    pub fn property(mut self, descriptor: PropertyDescriptor) -> Self {
        self.facet.properties.push(descriptor);
        self
    }

    /// Finish the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::PropertyTypeConflict`] when the facet declares
    /// the same property name twice with different types, and
    /// [`FacetError::TypeMismatch`] when a literal default does not inhabit
    /// the declared type.
    pub fn build(self) -> FacetResult<Facet> {
        for (index, descriptor) in self.facet.properties.iter().enumerate() {
            if let Some(previous) = self
                .facet
                .properties
                .iter()
                .take(index)
                .find(|p| p.name() == descriptor.name())
                && previous.value_type() != descriptor.value_type()
            {
                return Err(Arc::new(FacetError::PropertyTypeConflict {
                    name: descriptor.name().to_owned(),
                    first: previous.value_type(),
                    second: descriptor.value_type(),
                }));
            }
            if let DefaultPolicy::Literal(value) = descriptor.default_policy()
                && value.property_type() != descriptor.value_type()
            {
                return Err(Arc::new(FacetError::TypeMismatch {
                    name: descriptor.name().to_owned(),
                    expected: descriptor.value_type(),
                    actual: value.property_type(),
                }));
            }
        }
        Ok(self.facet)
    }
}
