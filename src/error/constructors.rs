//! Constructors and aggregation helpers for `FacetError`.

use std::sync::Arc;

use super::{AggregatedErrors, FacetError};

impl FacetError {
    /// Tries to build a [`FacetError`] from an iterator of errors.
    ///
    /// Returns `None` when no errors are supplied, the inner error when a
    /// single uniquely-owned [`Arc`] is supplied, and [`Self::Aggregate`]
    /// otherwise.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Construct an unknown-facet error.
    #[must_use]
    pub fn unknown_facet(id: impl Into<String>) -> Self {
        Self::UnknownFacet { id: id.into() }
    }

    /// Construct an unknown-property error.
    #[must_use]
    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::UnknownProperty { name: name.into() }
    }

    /// Construct a validation-rule violation, for use inside registered
    /// rules.
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct a validation-rule violation wrapped in an [`Arc`], saving
    /// call sites an explicit `Arc::new`.
    #[must_use]
    pub fn validation_arc(key: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::validation(key, message))
    }
}
