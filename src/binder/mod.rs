//! Binding external key/value input onto a composite configuration.
//!
//! Inputs arrive as an ordered sequence of `(name, raw)` pairs,
//! conventionally derived from `--name=value` command-line tokens. Later
//! entries for the same name override earlier ones, which is how layered
//! defaults-then-overrides input is expressed. Binding is best-effort per
//! entry: a malformed entry is recorded and the remaining entries still
//! bind.

use std::sync::Arc;

use tracing::debug;

use crate::composite::CompositeConfig;
use crate::facet::FacetId;
use crate::registry::FacetRegistry;
use crate::value::{PropertyType, PropertyValue};
use crate::{FacetError, FacetResult};

#[cfg(test)]
mod tests;

/// Policy for input names that resolve to no property of the bound facet
/// set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Record an [`FacetError::UnknownProperty`] for the entry.
    #[default]
    Reject,
    /// Skip the entry. Supports generic input streams that also carry
    /// options meant for sibling, unrelated facets.
    Ignore,
}

/// Caller-selected binding behaviour.
#[derive(Clone, Copy, Debug, Default)]
pub struct BindOptions {
    /// How to treat unrecognised input names.
    pub unknown_keys: UnknownKeys,
    /// When set, a boolean property bound with an empty raw value (a bare
    /// `--flag` token) reads as `true`; absence of the flag leaves the
    /// property on its default.
    pub implicit_booleans: bool,
}

impl BindOptions {
    /// Options with unknown keys ignored and implicit booleans on, the
    /// usual setting for mixed multi-facet input streams.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            unknown_keys: UnknownKeys::Ignore,
            implicit_booleans: true,
        }
    }
}

/// Result of a bind pass: the configuration, plus every per-entry failure.
///
/// The caller decides whether the failures are fatal; [`Self::into_result`]
/// applies the strict interpretation.
#[derive(Debug)]
pub struct BindOutcome {
    /// The bound configuration, reflecting every entry that coerced.
    pub config: CompositeConfig,
    /// Per-entry failures, in input order.
    pub errors: Vec<Arc<FacetError>>,
}

impl BindOutcome {
    /// Discard the configuration unless every entry bound cleanly.
    ///
    /// # Errors
    ///
    /// Returns the aggregated per-entry failures when any were recorded.
    pub fn into_result(self) -> FacetResult<CompositeConfig> {
        match FacetError::try_aggregate(self.errors) {
            None => Ok(self.config),
            Some(err) => Err(Arc::new(err)),
        }
    }
}

/// Build a configuration for `facet` and bind `inputs` onto it in order.
///
/// # Errors
///
/// Fails outright (no outcome) when the facet set itself cannot be composed,
/// with the errors of [`CompositeConfig::for_facet`]. Per-entry coercion and
/// unknown-name failures are collected in the returned [`BindOutcome`]
/// instead.
pub fn bind<I, N, R>(
    registry: &Arc<FacetRegistry>,
    facet: &FacetId,
    inputs: I,
    options: BindOptions,
) -> FacetResult<BindOutcome>
where
    I: IntoIterator<Item = (N, R)>,
    N: AsRef<str>,
    R: AsRef<str>,
{
    let mut config = CompositeConfig::for_facet(registry, facet)?;
    let mut errors = Vec::new();

    for (name, raw) in inputs {
        let name = name.as_ref();
        let raw = raw.as_ref();
        match bind_entry(&mut config, name, raw, options) {
            Ok(()) => {}
            Err(BindFailure::Skipped) => {
                debug!(property = name, "ignoring unrecognised input");
            }
            Err(BindFailure::Error(err)) => errors.push(err),
        }
    }

    Ok(BindOutcome { config, errors })
}

enum BindFailure {
    Skipped,
    Error(Arc<FacetError>),
}

fn bind_entry(
    config: &mut CompositeConfig,
    name: &str,
    raw: &str,
    options: BindOptions,
) -> Result<(), BindFailure> {
    let Ok(descriptor) = config.descriptor(name) else {
        return match options.unknown_keys {
            UnknownKeys::Ignore => Err(BindFailure::Skipped),
            UnknownKeys::Reject => Err(BindFailure::Error(Arc::new(
                FacetError::unknown_property(name),
            ))),
        };
    };

    let ty = descriptor.value_type();
    let value = if raw.is_empty() && ty == PropertyType::Boolean && options.implicit_booleans {
        Some(PropertyValue::boolean(true))
    } else {
        PropertyValue::coerce(raw, ty)
    };
    let Some(value) = value else {
        return Err(BindFailure::Error(Arc::new(FacetError::TypeCoercion {
            name: name.to_owned(),
            raw: raw.to_owned(),
            expected: ty,
        })));
    };

    config
        .set(name, value)
        .map_err(BindFailure::Error)
}

/// Split command-line style tokens into ordered `(name, raw)` pairs.
///
/// `--name=value` yields `(name, value)`; a bare `--name` yields
/// `(name, "")`, which binds `true` for boolean properties when
/// [`BindOptions::implicit_booleans`] is set. Tokens without a leading
/// `--` are passed through untouched so pre-split pairs survive.
pub fn parse_flag_tokens<I, T>(tokens: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| {
            let token = token.as_ref();
            let flag = token.strip_prefix("--").unwrap_or(token);
            match flag.split_once('=') {
                Some((name, value)) => (name.to_owned(), value.to_owned()),
                None => (flag.to_owned(), String::new()),
            }
        })
        .collect()
}
