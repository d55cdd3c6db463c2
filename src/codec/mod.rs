//! Wire codec: shipping a facet subset of a configuration across a process
//! boundary.
//!
//! The payload is a JSON document listing the transmitted facets and a map
//! of property name to type-tagged value. Only explicitly set values travel;
//! defaults re-resolve on the receiver, which lets the receiving process
//! apply its own computed defaults. Hidden properties are included —
//! visibility affects documentation generation only, never serialization.
//!
//! Sender and receiver never assume symmetric facet knowledge: the sender
//! names the facets it selected, and the receiver decides whether unknown
//! facets or properties are fatal ([`DecodeMode::Strict`]) or skipped with
//! their payload preserved ([`DecodeMode::Lenient`]).

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::composite::CompositeConfig;
use crate::facet::FacetId;
use crate::registry::FacetRegistry;
use crate::result_ext::IntoFacetResult;
use crate::value::PropertyValue;
use crate::{FacetError, FacetResult};


/// How a receiver treats payload entries absent from its facet registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeMode {
    /// Unknown facets or properties fail the decode.
    Strict,
    /// Unknown facets and properties are skipped and reported in the
    /// [`DecodeOutcome`], preserving their payload for re-serialization.
    /// Required for forward compatibility between driver and worker
    /// versions that know different facet sets.
    Lenient,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePayload {
    facets: Vec<String>,
    properties: BTreeMap<String, PropertyValue>,
}

/// Result of decoding a payload.
#[derive(Debug)]
pub struct DecodeOutcome {
    /// The reconstructed configuration over the facets the receiver knows.
    pub config: CompositeConfig,
    /// Facets named in the payload but absent from the receiver's registry
    /// (lenient mode only).
    pub skipped_facets: Vec<String>,
    /// Properties skipped during decode (lenient mode only), values
    /// preserved verbatim so they can be re-serialized without loss.
    pub skipped_properties: Vec<(String, PropertyValue)>,
}

/// Serialize the properties of `selection` (each facet with its ancestors)
/// to a wire payload.
///
/// The payload names the selection's whole ancestry closure, so a receiver
/// that knows only part of the graph can still reconstruct the facets it
/// recognises.
///
/// # Errors
///
/// Returns [`FacetError::UnknownFacet`] when a selected facet is not bound
/// into `config`, and [`FacetError::Payload`] when serialization fails.
pub fn encode(config: &CompositeConfig, selection: &[FacetId]) -> FacetResult<String> {
    let mut names = BTreeSet::new();
    let mut closure: Vec<FacetId> = Vec::new();
    for facet in selection {
        let view = config.as_facet(facet)?;
        names.extend(view.property_names().map(str::to_owned));
        for ancestor in config.registry().resolve_ancestry(facet)? {
            if !closure.contains(&ancestor) {
                closure.push(ancestor);
            }
        }
    }

    let mut properties = BTreeMap::new();
    for name in names {
        if let Some(value) = config.get(&name)? {
            properties.insert(name, value.clone());
        }
    }

    let payload = WirePayload {
        facets: closure.iter().map(FacetId::to_string).collect(),
        properties,
    };
    serde_json::to_string(&payload).into_facet()
}

/// Reconstruct a configuration from a wire payload against the receiver's
/// registry.
///
/// # Errors
///
/// Returns [`FacetError::Payload`] when the payload is not well-formed. In
/// [`DecodeMode::Strict`], also returns [`FacetError::UnknownFacet`],
/// [`FacetError::UnknownProperty`], or [`FacetError::TypeMismatch`] when the
/// payload disagrees with the receiver's facet graph.
pub fn decode(
    registry: &Arc<FacetRegistry>,
    payload: &str,
    mode: DecodeMode,
) -> FacetResult<DecodeOutcome> {
    let payload: WirePayload = serde_json::from_str(payload).into_facet()?;

    let mut known = Vec::new();
    let mut skipped_facets = Vec::new();
    for name in payload.facets {
        let id = FacetId::new(&name);
        // A facet only counts as known when its whole ancestry resolves.
        if registry.resolve_ancestry(&id).is_ok() {
            known.push(id);
        } else if mode == DecodeMode::Strict {
            return Err(Arc::new(FacetError::unknown_facet(name)));
        } else {
            warn!(facet = %name, "skipping unknown facet in payload");
            skipped_facets.push(name);
        }
    }

    let mut config = CompositeConfig::for_facets(registry, &known)?;
    let mut skipped_properties = Vec::new();
    for (name, value) in payload.properties {
        match decode_property(&mut config, &name, value, mode)? {
            None => {}
            Some(skipped) => skipped_properties.push((name, skipped)),
        }
    }

    Ok(DecodeOutcome {
        config,
        skipped_facets,
        skipped_properties,
    })
}

// Ok(None) when bound, Ok(Some(value)) when skipped leniently.
fn decode_property(
    config: &mut CompositeConfig,
    name: &str,
    value: PropertyValue,
    mode: DecodeMode,
) -> FacetResult<Option<PropertyValue>> {
    match config.set(name, value.clone()) {
        Ok(()) => Ok(None),
        Err(err) if mode == DecodeMode::Strict => Err(err),
        Err(err) => {
            warn!(property = name, %err, "skipping payload property");
            Ok(Some(value))
        }
    }
}
