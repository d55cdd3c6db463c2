//! Extensions for mapping external errors into `FacetResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting error types such as [`serde_json::Error`] into
//! the crate's `FacetResult<T>` alias (`Result<T, Arc<FacetError>>`).

use std::sync::Arc;

use crate::{FacetError, FacetResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<FacetError>` into a `FacetResult<T>`.
pub trait IntoFacetResult<T, E> {
    /// Convert `Result<T, E>` into `FacetResult<T>` using
    /// `Into<FacetError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<FacetError>`.
    fn into_facet(self) -> FacetResult<T>;
}

impl<T, E> IntoFacetResult<T, E> for Result<T, E>
where
    E: Into<FacetError>,
{
    fn into_facet(self) -> FacetResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
