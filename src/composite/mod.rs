//! Composite configurations: the runtime union of one or more facets'
//! properties into a single typed property bag.
//!
//! A [`CompositeConfig`] is created once for a requested facet set, mutated
//! through its accessors while options are bound, and conceptually frozen
//! once validated. It carries no internal locking; once frozen it is safe to
//! read from multiple threads, and any later mutation needs external
//! synchronisation supplied by the caller.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::facet::{DefaultPolicy, FacetId, PropertyDescriptor};
use crate::registry::FacetRegistry;
use crate::value::PropertyValue;
use crate::{FacetError, FacetResult};

mod view;

pub use view::{FacetView, FacetViewMut};


#[derive(Clone, Debug)]
struct Slot {
    descriptor: PropertyDescriptor,
    value: Option<PropertyValue>,
}

/// Aggregation of an arbitrary facet set into one read/write property bag.
///
/// Every property reachable through any requested facet owns exactly one
/// slot: facets that independently declare an identically-named,
/// identically-typed property share a slot rather than collide, which is how
/// cross-cutting concerns such as worker identity attach to every
/// specialised configuration without duplication.
#[derive(Clone, Debug)]
pub struct CompositeConfig {
    registry: Arc<FacetRegistry>,
    requested: Vec<FacetId>,
    bound: BTreeSet<FacetId>,
    slots: BTreeMap<String, Slot>,
}

impl CompositeConfig {
    /// Build a configuration exposing the union of properties from `id` and
    /// all its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownFacet`] when the facet or an ancestor is
    /// unregistered and [`FacetError::PropertyTypeConflict`] when two facets
    /// in the set declare the same property name with different types.
    pub fn for_facet(registry: &Arc<FacetRegistry>, id: &FacetId) -> FacetResult<Self> {
        Self::for_facets(registry, std::slice::from_ref(id))
    }

    /// Build a configuration over an explicit set of facets (each with its
    /// ancestors). An empty set yields an empty configuration.
    ///
    /// # Errors
    ///
    /// As for [`Self::for_facet`].
    pub fn for_facets(registry: &Arc<FacetRegistry>, ids: &[FacetId]) -> FacetResult<Self> {
        let mut config = Self {
            registry: Arc::clone(registry),
            requested: Vec::new(),
            bound: BTreeSet::new(),
            slots: BTreeMap::new(),
        };
        for id in ids {
            config.compose(id)?;
        }
        Ok(config)
    }

    /// Union another facet (and its ancestors) into this configuration.
    /// Existing slots and their values are untouched; shared property names
    /// with matching types merge into the existing slot.
    ///
    /// # Errors
    ///
    /// As for [`Self::for_facet`].
    pub fn compose(&mut self, id: &FacetId) -> FacetResult<()> {
        let registry = Arc::clone(&self.registry);
        let ancestry = registry.resolve_ancestry(id)?;
        for facet_id in &ancestry {
            if !self.bound.insert(facet_id.clone()) {
                continue;
            }
            let facet = registry
                .get(facet_id)
                .ok_or_else(|| Arc::new(FacetError::unknown_facet(facet_id.as_str())))?;
            for descriptor in facet.properties() {
                self.add_slot(descriptor)?;
            }
        }
        if !self.requested.contains(id) {
            self.requested.push(id.clone());
        }
        Ok(())
    }

    fn add_slot(&mut self, descriptor: &PropertyDescriptor) -> FacetResult<()> {
        if let Some(existing) = self.slots.get(descriptor.name()) {
            if existing.descriptor.value_type() == descriptor.value_type() {
                return Ok(());
            }
            return Err(Arc::new(FacetError::PropertyTypeConflict {
                name: descriptor.name().to_owned(),
                first: existing.descriptor.value_type(),
                second: descriptor.value_type(),
            }));
        }
        self.slots.insert(
            descriptor.name().to_owned(),
            Slot {
                descriptor: descriptor.clone(),
                value: None,
            },
        );
        Ok(())
    }

    /// The registry this configuration was built against.
    #[must_use]
    pub const fn registry(&self) -> &Arc<FacetRegistry> {
        &self.registry
    }

    /// The facets the caller explicitly requested, in composition order.
    #[must_use]
    pub fn requested_facets(&self) -> &[FacetId] {
        &self.requested
    }

    /// Every facet bound into this configuration, ancestors included.
    pub fn bound_facets(&self) -> impl Iterator<Item = &FacetId> {
        self.bound.iter()
    }

    /// Every property name in the bag, in lexical order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    fn slot(&self, name: &str) -> FacetResult<&Slot> {
        self.slots
            .get(name)
            .ok_or_else(|| Arc::new(FacetError::unknown_property(name)))
    }

    /// The descriptor governing a property.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] when the name is not part of
    /// the bound facet set.
    pub fn descriptor(&self, name: &str) -> FacetResult<&PropertyDescriptor> {
        Ok(&self.slot(name)?.descriptor)
    }

    /// Read the explicitly set value of a property. Returns `None` when the
    /// property has not been set; defaults are not consulted (see
    /// [`Self::effective_value`]).
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] when the name is not part of
    /// the bound facet set.
    pub fn get(&self, name: &str) -> FacetResult<Option<&PropertyValue>> {
        Ok(self.slot(name)?.value.as_ref())
    }

    /// Set a property to an explicit value.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] when the name is not part of
    /// the bound facet set and [`FacetError::TypeMismatch`] when the value
    /// does not inhabit the declared type.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> FacetResult<()> {
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| Arc::new(FacetError::unknown_property(name)))?;
        if value.property_type() != slot.descriptor.value_type() {
            return Err(Arc::new(FacetError::TypeMismatch {
                name: name.to_owned(),
                expected: slot.descriptor.value_type(),
                actual: value.property_type(),
            }));
        }
        slot.value = Some(value);
        Ok(())
    }

    /// The explicitly set value if present, else the property's default:
    /// a literal, or a computed provider evaluated against this
    /// configuration. Properties with no applicable default yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] for names outside the bound
    /// facet set, [`FacetError::DefaultCycle`] when computed defaults form a
    /// dependency cycle, and any error raised by a provider itself.
    pub fn effective_value(&self, name: &str) -> FacetResult<Option<PropertyValue>> {
        let trail = RefCell::new(Vec::new());
        self.effective_with_trail(name, &trail)
    }

    fn effective_with_trail(
        &self,
        name: &str,
        trail: &RefCell<Vec<String>>,
    ) -> FacetResult<Option<PropertyValue>> {
        let slot = self.slot(name)?;
        if let Some(value) = &slot.value {
            return Ok(Some(value.clone()));
        }
        match slot.descriptor.default_policy() {
            DefaultPolicy::Optional | DefaultPolicy::Required => Ok(None),
            DefaultPolicy::Literal(value) => Ok(Some(value.clone())),
            DefaultPolicy::Computed(provider) => {
                if trail.borrow().iter().any(|visited| visited == name) {
                    let mut chain = trail.borrow().clone();
                    chain.push(name.to_owned());
                    return Err(Arc::new(FacetError::DefaultCycle {
                        trail: chain.join(" -> "),
                    }));
                }
                trail.borrow_mut().push(name.to_owned());
                let ctx = DefaultContext {
                    config: self,
                    trail,
                };
                let computed = provider.evaluate(&ctx);
                trail.borrow_mut().pop();
                let value = computed?;
                if value.property_type() != slot.descriptor.value_type() {
                    return Err(Arc::new(FacetError::TypeMismatch {
                        name: name.to_owned(),
                        expected: slot.descriptor.value_type(),
                        actual: value.property_type(),
                    }));
                }
                Ok(Some(value))
            }
        }
    }

    /// A read-only view narrowed to `id` and its ancestors, drawing from the
    /// same underlying slots.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownFacet`] when `id` is not bound into this
    /// configuration.
    pub fn as_facet(&self, id: &FacetId) -> FacetResult<FacetView<'_>> {
        let names = self.view_names(id)?;
        Ok(FacetView::new(id.clone(), self, names))
    }

    /// A mutable view narrowed to `id` and its ancestors. Mutations through
    /// the view are visible through the full configuration and vice versa;
    /// the view is not a copy.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownFacet`] when `id` is not bound into this
    /// configuration.
    pub fn as_facet_mut(&mut self, id: &FacetId) -> FacetResult<FacetViewMut<'_>> {
        let names = self.view_names(id)?;
        Ok(FacetViewMut::new(id.clone(), self, names))
    }

    fn view_names(&self, id: &FacetId) -> FacetResult<BTreeSet<String>> {
        if !self.bound.contains(id) {
            return Err(Arc::new(FacetError::unknown_facet(id.as_str())));
        }
        let mut names = BTreeSet::new();
        for facet_id in self.registry.resolve_ancestry(id)? {
            let facet = self
                .registry
                .get(&facet_id)
                .ok_or_else(|| Arc::new(FacetError::unknown_facet(facet_id.as_str())))?;
            for descriptor in facet.properties() {
                names.insert(descriptor.name().to_owned());
            }
        }
        Ok(names)
    }

    pub(crate) fn value_of(&self, name: &str) -> Option<&PropertyValue> {
        self.slots.get(name).and_then(|slot| slot.value.as_ref())
    }
}

/// Evaluation context handed to computed default providers.
///
/// Providers read sibling properties through [`DefaultContext::effective`],
/// which re-enters default resolution with cycle tracking.
pub struct DefaultContext<'a> {
    config: &'a CompositeConfig,
    trail: &'a RefCell<Vec<String>>,
}

impl DefaultContext<'_> {
    /// The effective value of a sibling property.
    ///
    /// # Errors
    ///
    /// As for [`CompositeConfig::effective_value`]; in particular,
    /// [`FacetError::DefaultCycle`] when providers depend on each other
    /// circularly.
    pub fn effective(&self, name: &str) -> FacetResult<Option<PropertyValue>> {
        self.config.effective_with_trail(name, self.trail)
    }

    /// The explicitly set value of a sibling property, defaults not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownProperty`] for names outside the bound
    /// facet set.
    pub fn get(&self, name: &str) -> FacetResult<Option<&PropertyValue>> {
        self.config.get(name)
    }
}
