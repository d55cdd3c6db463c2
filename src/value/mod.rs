//! Typed property values and raw-string coercion.
//!
//! Every property slot in a composite configuration holds a
//! [`PropertyValue`] matching the [`PropertyType`] its descriptor declared.
//! Values serialize with an explicit `type` tag so a receiver that does not
//! know the sender's facet graph can still parse, skip, and re-serialize
//! them without losing fidelity.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

#[cfg(test)]
mod tests;

/// Declared type of a configuration property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// UTF-8 text.
    String,
    /// Signed 64-bit integer.
    Integer,
    /// Boolean flag.
    Boolean,
    /// Polymorphic value carrying a variant tag and embedded fields.
    Structured,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Structured => "structured",
        };
        f.write_str(name)
    }
}

/// A bound property value.
///
/// The serde representation is the wire representation: a `type` tag plus
/// the value payload, e.g. `{"type":"integer","value":4}` or
/// `{"type":"structured","variant":"docker","fields":{...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// A text value.
    String {
        /// The text.
        value: String,
    },
    /// An integer value.
    Integer {
        /// The number.
        value: i64,
    },
    /// A boolean value.
    Boolean {
        /// The flag.
        value: bool,
    },
    /// A structured value of some named variant with embedded fields.
    Structured {
        /// Which variant of the structured type this value is.
        variant: String,
        /// Variant-specific fields, preserved verbatim.
        fields: Map<String, JsonValue>,
    },
}

impl PropertyValue {
    /// Build a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    /// Build an integer value.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Integer { value }
    }

    /// Build a boolean value.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Boolean { value }
    }

    /// Build a structured value from a variant tag and its fields.
    pub fn structured(variant: impl Into<String>, fields: Map<String, JsonValue>) -> Self {
        Self::Structured {
            variant: variant.into(),
            fields,
        }
    }

    /// The [`PropertyType`] this value inhabits.
    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        match self {
            Self::String { .. } => PropertyType::String,
            Self::Integer { .. } => PropertyType::Integer,
            Self::Boolean { .. } => PropertyType::Boolean,
            Self::Structured { .. } => PropertyType::Structured,
        }
    }

    /// Borrow the text of a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String { value } => Some(value),
            _ => None,
        }
    }

    /// Extract an integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer { value } => Some(*value),
            _ => None,
        }
    }

    /// Extract a boolean value.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean { value } => Some(*value),
            _ => None,
        }
    }

    /// Coerce a raw input string into a value of the given type.
    ///
    /// Integers parse as decimal `i64`; booleans accept ASCII
    /// case-insensitive `true`/`false`; structured values parse as a JSON
    /// object whose `variant` key names the variant, with the remaining keys
    /// becoming the variant fields. Returns `None` when the raw string does
    /// not inhabit the type.
    #[must_use]
    pub fn coerce(raw: &str, ty: PropertyType) -> Option<Self> {
        match ty {
            PropertyType::String => Some(Self::string(raw)),
            PropertyType::Integer => raw.parse::<i64>().ok().map(Self::integer),
            PropertyType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" => Some(Self::boolean(true)),
                "false" => Some(Self::boolean(false)),
                _ => None,
            },
            PropertyType::Structured => Self::coerce_structured(raw),
        }
    }

    fn coerce_structured(raw: &str) -> Option<Self> {
        let JsonValue::Object(mut fields) = serde_json::from_str(raw).ok()? else {
            return None;
        };
        let JsonValue::String(variant) = fields.remove("variant")? else {
            return None;
        };
        Some(Self::Structured { variant, fields })
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String { value } => f.write_str(value),
            Self::Integer { value } => write!(f, "{value}"),
            Self::Boolean { value } => write!(f, "{value}"),
            Self::Structured { variant, fields } => {
                write!(f, "{variant} ")?;
                let rendered =
                    serde_json::to_string(fields).unwrap_or_else(|_| String::from("{…}"));
                f.write_str(&rendered)
            }
        }
    }
}
