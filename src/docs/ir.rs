//! Intermediate representation (IR) types for facet documentation.

use serde::Serialize;

use crate::facet::{DefaultPolicy, FacetId, PropertyDescriptor};
use crate::registry::FacetRegistry;
use crate::value::PropertyType;
use crate::{FacetError, FacetResult};
use std::sync::Arc;

/// Documentation for one facet: its own metadata plus every property
/// visible through it, inherited properties included.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetDocs {
    /// IR schema version, from [`super::DOCS_IR_VERSION`].
    pub ir_version: String,
    /// Facet identity.
    pub facet: String,
    /// Facet-level description text, when declared.
    pub description: Option<String>,
    /// Documented properties in ancestry order, hidden ones excluded.
    pub properties: Vec<PropertyDocs>,
}

/// Documentation for a single property.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertyDocs {
    /// Property name.
    pub name: String,
    /// Declared value type.
    pub value_type: PropertyType,
    /// Description text, when declared.
    pub description: Option<String>,
    /// Which facet in the ancestry declared the property.
    pub declared_by: String,
    /// Whether validation demands a value.
    pub required: bool,
    /// Rendered default, when one applies.
    pub default: Option<DefaultDisplay>,
}

/// Display form of a property default.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum DefaultDisplay {
    /// A literal default, rendered for display.
    Literal(String),
    /// A default computed at runtime.
    Computed,
}

impl FacetDocs {
    /// Generate documentation for one facet and its ancestry.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownFacet`] when the facet or an ancestor is
    /// unregistered, or when the facet is hidden from documentation.
    pub fn for_facet(registry: &FacetRegistry, id: &FacetId) -> FacetResult<Self> {
        let facet = registry
            .get(id)
            .filter(|facet| !facet.is_hidden())
            .ok_or_else(|| Arc::new(FacetError::unknown_facet(id.as_str())))?;

        let mut properties = Vec::new();
        for ancestor_id in registry.resolve_ancestry(id)? {
            let Some(ancestor) = registry.get(&ancestor_id) else {
                continue;
            };
            for descriptor in ancestor.properties() {
                if descriptor.is_hidden()
                    || properties
                        .iter()
                        .any(|doc: &PropertyDocs| doc.name == descriptor.name())
                {
                    continue;
                }
                properties.push(PropertyDocs::from_descriptor(descriptor, &ancestor_id));
            }
        }

        Ok(Self {
            ir_version: String::from(super::DOCS_IR_VERSION),
            facet: id.to_string(),
            description: facet.description().map(str::to_owned),
            properties,
        })
    }

    /// Generate documentation for every documentable facet in the registry,
    /// ordered by identity. Hidden facets are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownFacet`] when a facet's ancestry does not
    /// resolve, which happens for facets whose parents were never
    /// registered.
    pub fn for_registry(registry: &FacetRegistry) -> FacetResult<Vec<Self>> {
        registry
            .iter()
            .filter(|facet| !facet.is_hidden())
            .map(|facet| Self::for_facet(registry, facet.id()))
            .collect()
    }
}

impl PropertyDocs {
    fn from_descriptor(descriptor: &PropertyDescriptor, declared_by: &FacetId) -> Self {
        let (required, default) = match descriptor.default_policy() {
            DefaultPolicy::Optional => (false, None),
            DefaultPolicy::Required => (true, None),
            DefaultPolicy::Literal(value) => {
                (false, Some(DefaultDisplay::Literal(value.to_string())))
            }
            DefaultPolicy::Computed(_) => (false, Some(DefaultDisplay::Computed)),
        };
        Self {
            name: descriptor.name().to_owned(),
            value_type: descriptor.value_type(),
            description: descriptor.description().map(str::to_owned),
            declared_by: declared_by.to_string(),
            required,
            default,
        }
    }
}
