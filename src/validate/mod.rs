//! Validation of fully bound composite configurations.
//!
//! Rules are registered per facet and run against every configuration whose
//! bound facet set includes that facet. Violations are always aggregated so
//! a user sees every problem in one pass; validation never stops at the
//! first failure.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::composite::CompositeConfig;
use crate::facet::{DefaultPolicy, FacetId};
use crate::{FacetError, FacetResult};


type Rule = Box<dyn Fn(&CompositeConfig) -> FacetResult<()> + Send + Sync>;

/// Per-facet validation rules plus the built-in required-property check.
///
/// Validation pertains to the configuration's state at the moment it runs;
/// mutating the configuration afterwards invalidates the result.
#[derive(Default)]
pub struct Validator {
    rules: BTreeMap<FacetId, Vec<Rule>>,
}

impl Validator {
    /// Create a validator with no registered rules. The built-in
    /// required-property presence check always runs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Register a rule for a facet. The rule runs whenever a validated
    /// configuration has the facet bound in, directly or through
    /// inheritance. Rules report violations with
    /// [`FacetError::validation`].
    pub fn add_rule<F>(&mut self, facet: impl Into<FacetId>, rule: F)
    where
        F: Fn(&CompositeConfig) -> FacetResult<()> + Send + Sync + 'static,
    {
        self.rules.entry(facet.into()).or_default().push(Box::new(rule));
    }

    /// Run every applicable rule against `config`.
    ///
    /// # Errors
    ///
    /// Returns the aggregated list of violations: one
    /// [`FacetError::MissingRequiredValue`] per required property left with
    /// no value, plus whatever the registered rules report.
    pub fn validate(&self, config: &CompositeConfig) -> FacetResult<()> {
        let mut violations: Vec<Arc<FacetError>> = Vec::new();

        for name in config.property_names() {
            let descriptor = config.descriptor(name)?;
            if matches!(descriptor.default_policy(), DefaultPolicy::Required)
                && config.get(name)?.is_none()
            {
                violations.push(Arc::new(FacetError::MissingRequiredValue {
                    name: name.to_owned(),
                }));
            }
        }

        for facet in config.bound_facets() {
            let Some(rules) = self.rules.get(facet) else {
                continue;
            };
            for rule in rules {
                if let Err(violation) = rule(config) {
                    violations.push(violation);
                }
            }
        }

        match FacetError::try_aggregate(violations) {
            None => Ok(()),
            Some(err) => Err(Arc::new(err)),
        }
    }
}
