//! Composable typed configuration facets for distributed pipeline workers.
//!
//! Independent modules declare configuration *facets*: named sets of typed
//! properties with descriptions, visibility flags, and default policies.
//! Facets extend one another (a DAG, resolved through a [`FacetRegistry`])
//! and compose at runtime into a single [`CompositeConfig`] property bag —
//! facets that independently declare the same property share one slot, so
//! cross-cutting concerns such as worker identity attach to every
//! specialised configuration without duplication.
//!
//! Configurations are bound from command-line-like key/value input
//! ([`bind`]), checked by a [`Validator`] that aggregates every violation,
//! and shipped driver → worker through the [`codec`] as a self-describing
//! JSON payload the receiver reconstructs without knowing the sender's
//! facet graph.
//!
//! ```rust
//! use std::sync::Arc;
//! use facet_config::{
//!     bind, BindOptions, Facet, FacetId, FacetRegistry,
//!     PropertyDescriptor, PropertyValue, Validator,
//! };
//!
//! # fn main() -> facet_config::FacetResult<()> {
//! let mut registry = FacetRegistry::new();
//! registry.register(
//!     Facet::builder("pipeline")
//!         .property(PropertyDescriptor::string("app_name").required())
//!         .build()?,
//! )?;
//! registry.register(
//!     Facet::builder("worker")
//!         .extends("pipeline")
//!         .property(PropertyDescriptor::string("worker_id"))
//!         .build()?,
//! )?;
//! let registry = Arc::new(registry);
//!
//! let outcome = bind(
//!     &registry,
//!     &FacetId::new("worker"),
//!     [("app_name", "wordcount"), ("worker_id", "w-1")],
//!     BindOptions::default(),
//! )?;
//! let config = outcome.into_result()?;
//! Validator::new().validate(&config)?;
//! assert_eq!(
//!     config.get("worker_id")?,
//!     Some(&PropertyValue::string("w-1"))
//! );
//! # Ok(())
//! # }
//! ```

mod binder;
pub mod codec;
mod composite;
pub mod docs;
mod error;
mod facet;
mod registry;
mod result_ext;
mod validate;
mod value;

pub use binder::{BindOptions, BindOutcome, UnknownKeys, bind, parse_flag_tokens};
pub use composite::{CompositeConfig, DefaultContext, FacetView, FacetViewMut};
pub use error::{AggregatedErrors, FacetError, FacetResult};
pub use facet::{
    DefaultPolicy, DefaultProvider, Facet, FacetBuilder, FacetId, PropertyDescriptor,
};
pub use registry::FacetRegistry;
pub use result_ext::IntoFacetResult;
pub use validate::Validator;
pub use value::{PropertyType, PropertyValue};
