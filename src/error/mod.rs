//! Error types produced by facet registration, binding, validation, and the
//! wire codec.

use std::sync::Arc;

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::FacetError;

/// Shared result alias used across the crate.
///
/// Errors are reference-counted so a single failure can appear both in an
/// aggregate and on its own without cloning the payload.
pub type FacetResult<T> = Result<T, Arc<FacetError>>;

#[cfg(test)]
mod tests;
