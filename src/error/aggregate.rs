//! Aggregation container and iteration support for multiple `FacetError`
//! values.

use std::{error::Error, fmt, sync::Arc};

use super::FacetError;

/// Collection of [`FacetError`]s produced during a single operation, such as
/// one bind or validate pass.
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<FacetError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<FacetError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &FacetError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a FacetError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<FacetError>>,
        fn(&'a Arc<FacetError>) -> &'a FacetError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<FacetError>;
    type IntoIter = std::vec::IntoIter<Arc<FacetError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
