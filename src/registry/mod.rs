//! The facet registry: every declared facet, keyed by identity.
//!
//! Modules register their facets during process start-up; the registry is
//! then shared immutably (typically behind an [`std::sync::Arc`]) with the
//! components that build, bind, and decode composite configurations.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;

use crate::facet::{Facet, FacetId};
use crate::{FacetError, FacetResult};


/// Registry of declared facets.
///
/// Parents may be declared before they are registered; such facets stay
/// unresolvable (ancestry resolution reports [`FacetError::UnknownFacet`])
/// until the parent arrives. A registration whose extends-edges would close
/// a cycle is rejected outright and the candidate is not added, so no facet
/// on the cycle ever becomes resolvable.
#[derive(Debug, Default)]
pub struct FacetRegistry {
    facets: BTreeMap<FacetId, Facet>,
}

impl FacetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            facets: BTreeMap::new(),
        }
    }

    /// Register a facet definition.
    ///
    /// Re-registering a structurally identical definition is a no-op, which
    /// tolerates independent modules declaring the same facet when loaded
    /// more than once.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::DuplicateFacet`] when the identity exists with
    /// a different definition, [`FacetError::CyclicInheritance`] when the
    /// registration would close an inheritance cycle, and
    /// [`FacetError::PropertyTypeConflict`] when the facet redeclares an
    /// ancestor's property with a conflicting type.
    pub fn register(&mut self, facet: Facet) -> FacetResult<()> {
        if let Some(existing) = self.facets.get(facet.id()) {
            if *existing == facet {
                debug!(facet = %facet.id(), "identical facet re-registration ignored");
                return Ok(());
            }
            return Err(Arc::new(FacetError::DuplicateFacet {
                id: facet.id().to_string(),
            }));
        }
        self.check_cycle(&facet)?;
        self.check_ancestor_conflicts(&facet)?;
        debug!(facet = %facet.id(), parents = facet.extends().len(), "registered facet");
        self.facets.insert(facet.id().clone(), facet);
        Ok(())
    }

    /// Look up a facet definition.
    #[must_use]
    pub fn get(&self, id: &FacetId) -> Option<&Facet> {
        self.facets.get(id)
    }

    /// Whether the registry knows the identity.
    #[must_use]
    pub fn contains(&self, id: &FacetId) -> bool {
        self.facets.contains_key(id)
    }

    /// Iterate over every registered facet, ordered by identity.
    pub fn iter(&self) -> impl Iterator<Item = &Facet> {
        self.facets.values()
    }

    /// Resolve the ordered transitive closure of a facet's ancestry.
    ///
    /// The result is topologically ordered, ancestors before descendants,
    /// with the requested facet itself last. Each facet appears once even
    /// when reachable through several parents.
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::UnknownFacet`] when the facet or any ancestor
    /// is not registered.
    pub fn resolve_ancestry(&self, id: &FacetId) -> FacetResult<Vec<FacetId>> {
        let mut order = Vec::new();
        let mut seen = BTreeSet::new();
        self.visit_ancestry(id, &mut order, &mut seen)?;
        Ok(order)
    }

    fn visit_ancestry(
        &self,
        id: &FacetId,
        order: &mut Vec<FacetId>,
        seen: &mut BTreeSet<FacetId>,
    ) -> FacetResult<()> {
        if seen.contains(id) {
            return Ok(());
        }
        let facet = self
            .facets
            .get(id)
            .ok_or_else(|| Arc::new(FacetError::unknown_facet(id.as_str())))?;
        seen.insert(id.clone());
        for parent in facet.extends() {
            self.visit_ancestry(parent, order, seen)?;
        }
        order.push(id.clone());
        Ok(())
    }

    // Walks parent edges from the candidate through the registered graph.
    // The registered graph is acyclic, so any cycle must pass through the
    // candidate itself.
    fn check_cycle(&self, candidate: &Facet) -> FacetResult<()> {
        let mut trail = vec![candidate.id().clone()];
        let mut visited = BTreeSet::new();
        for parent in candidate.extends() {
            self.walk_parents(candidate.id(), parent, &mut trail, &mut visited)?;
        }
        Ok(())
    }

    fn walk_parents(
        &self,
        candidate: &FacetId,
        current: &FacetId,
        trail: &mut Vec<FacetId>,
        visited: &mut BTreeSet<FacetId>,
    ) -> FacetResult<()> {
        if current == candidate {
            trail.push(current.clone());
            let cycle = trail
                .iter()
                .map(FacetId::as_str)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Arc::new(FacetError::CyclicInheritance { cycle }));
        }
        if !visited.insert(current.clone()) {
            return Ok(());
        }
        // Unregistered parents are leaves until they arrive.
        let Some(facet) = self.facets.get(current) else {
            return Ok(());
        };
        trail.push(current.clone());
        for parent in facet.extends() {
            self.walk_parents(candidate, parent, trail, visited)?;
        }
        trail.pop();
        Ok(())
    }

    // Best-effort registration-time check: ancestors not yet registered are
    // checked again when a composite is built.
    fn check_ancestor_conflicts(&self, candidate: &Facet) -> FacetResult<()> {
        let mut pending: Vec<&FacetId> = candidate.extends().iter().collect();
        let mut seen = BTreeSet::new();
        while let Some(ancestor_id) = pending.pop() {
            if !seen.insert(ancestor_id.clone()) {
                continue;
            }
            let Some(ancestor) = self.facets.get(ancestor_id) else {
                continue;
            };
            for declared in candidate.properties() {
                if let Some(inherited) = ancestor.property(declared.name())
                    && inherited.value_type() != declared.value_type()
                {
                    return Err(Arc::new(FacetError::PropertyTypeConflict {
                        name: declared.name().to_owned(),
                        first: inherited.value_type(),
                        second: declared.value_type(),
                    }));
                }
            }
            pending.extend(ancestor.extends());
        }
        Ok(())
    }
}
