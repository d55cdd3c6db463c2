//! Documentation metadata generated from a facet registry.
//!
//! This module defines the IR schema consumed by external documentation
//! tooling. Hidden facets and hidden properties are excluded here and only
//! here; they remain present in every runtime operation, including the wire
//! codec.

mod ir;

pub use ir::{DefaultDisplay, FacetDocs, PropertyDocs};

/// Current IR schema version.
pub const DOCS_IR_VERSION: &str = "1.0";
