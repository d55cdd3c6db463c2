//! Narrowed facet views over a composite configuration's slots.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::facet::FacetId;
use crate::value::PropertyValue;
use crate::{FacetError, FacetResult};

use super::CompositeConfig;

/// Read-only view exposing only the properties of one facet (and its
/// ancestors) drawn from the underlying configuration's slots.
///
/// Used when a component should see only the facet it cares about even
/// though the full configuration carries more.
#[derive(Debug)]
pub struct FacetView<'a> {
    facet: FacetId,
    config: &'a CompositeConfig,
    names: BTreeSet<String>,
}

impl<'a> FacetView<'a> {
    pub(super) const fn new(
        facet: FacetId,
        config: &'a CompositeConfig,
        names: BTreeSet<String>,
    ) -> Self {
        Self {
            facet,
            config,
            names,
        }
    }

    /// The facet this view is narrowed to.
    #[must_use]
    pub const fn facet(&self) -> &FacetId {
        &self.facet
    }

    /// Property names visible through the view, in lexical order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    fn check_visible(&self, name: &str) -> FacetResult<()> {
        if self.names.contains(name) {
            Ok(())
        } else {
            Err(Arc::new(FacetError::unknown_property(name)))
        }
    }

    /// Read the explicitly set value of a visible property.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] for names outside the view,
    /// including names the full configuration carries for other facets.
    pub fn get(&self, name: &str) -> FacetResult<Option<&PropertyValue>> {
        self.check_visible(name)?;
        self.config.get(name)
    }

    /// The effective value (explicit, else default) of a visible property.
    ///
    /// # Errors
    ///
    /// As for [`CompositeConfig::effective_value`], plus
    /// [`FacetError::UnknownProperty`] for names outside the view.
    pub fn effective_value(&self, name: &str) -> FacetResult<Option<PropertyValue>> {
        self.check_visible(name)?;
        self.config.effective_value(name)
    }
}

// Value equality of two views: same visible names, same explicit values.
// This is the round-trip contract for the wire codec.
impl PartialEq for FacetView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
            && self
                .names
                .iter()
                .all(|name| self.config.value_of(name) == other.config.value_of(name))
    }
}

/// Mutable counterpart of [`FacetView`]. Mutations write through to the
/// shared slots of the underlying configuration.
#[derive(Debug)]
pub struct FacetViewMut<'a> {
    facet: FacetId,
    config: &'a mut CompositeConfig,
    names: BTreeSet<String>,
}

impl<'a> FacetViewMut<'a> {
    pub(super) const fn new(
        facet: FacetId,
        config: &'a mut CompositeConfig,
        names: BTreeSet<String>,
    ) -> Self {
        Self {
            facet,
            config,
            names,
        }
    }

    /// The facet this view is narrowed to.
    #[must_use]
    pub const fn facet(&self) -> &FacetId {
        &self.facet
    }

    fn check_visible(&self, name: &str) -> FacetResult<()> {
        if self.names.contains(name) {
            Ok(())
        } else {
            Err(Arc::new(FacetError::unknown_property(name)))
        }
    }

    /// Read the explicitly set value of a visible property.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] for names outside the view.
    pub fn get(&self, name: &str) -> FacetResult<Option<&PropertyValue>> {
        self.check_visible(name)?;
        self.config.get(name)
    }

    /// Set a visible property; the write lands in the shared slot.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] for names outside the view
    /// and [`FacetError::TypeMismatch`] for values of the wrong type.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> FacetResult<()> {
        self.check_visible(name)?;
        self.config.set(name, value)
    }

    /// The effective value (explicit, else default) of a visible property.
    ///
    /// # Errors
    ///
    /// As for [`CompositeConfig::effective_value`], plus
    /// [`FacetError::UnknownProperty`] for names outside the view.
    pub fn effective_value(&self, name: &str) -> FacetResult<Option<PropertyValue>> {
        self.check_visible(name)?;
        self.config.effective_value(name)
    }
}
