//! Typed session property values.
//!
//! Session properties travel as raw strings and are decoded on every read into
//! one of four kinds. `PropertyType` is the bridge to static Rust types: it is
//! what lets `ConnectorSession::property::<i64>("timeout")` exist without the
//! caller touching `PropertyValue` directly.

use std::fmt;

/// The static type a caller requests for a session property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Bool,
    Integer,
    Double,
    Text,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Bool => "boolean",
            PropertyKind::Integer => "integer",
            PropertyKind::Double => "double",
            PropertyKind::Text => "varchar",
        };
        write!(f, "{}", name)
    }
}

/// A decoded session property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(String),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Integer(_) => PropertyKind::Integer,
            PropertyValue::Double(_) => PropertyKind::Double,
            PropertyValue::Text(_) => PropertyKind::Text,
        }
    }
}

// Display writes the value in its raw-string form, so a decoded value formats
// back to something the user could have typed.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Integer(v) => write!(f, "{}", v),
            PropertyValue::Double(v) => write!(f, "{}", v),
            PropertyValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Static Rust types a session property can decode to.
///
/// Implemented for `bool`, `i64`, `f64` and `String`; connectors name the type
/// they expect and get back exactly that type or a typed error, never a value
/// to downcast.
pub trait PropertyType: Sized {
    /// The kind requested from the decoder.
    const KIND: PropertyKind;

    /// Extract the static type from a decoded value. `None` when the value is
    /// of a different kind (a decoder contract violation, surfaced by the view
    /// as an invalid-property error).
    fn from_value(value: PropertyValue) -> Option<Self>;
}

impl PropertyType for bool {
    const KIND: PropertyKind = PropertyKind::Bool;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl PropertyType for i64 {
    const KIND: PropertyKind = PropertyKind::Integer;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Integer(v) => Some(v),
            _ => None,
        }
    }
}

impl PropertyType for f64 {
    const KIND: PropertyKind = PropertyKind::Double;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl PropertyType for String {
    const KIND: PropertyKind = PropertyKind::Text;

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(PropertyValue::Bool(true).kind(), PropertyKind::Bool);
        assert_eq!(PropertyValue::Integer(5).kind(), PropertyKind::Integer);
        assert_eq!(PropertyValue::Double(0.5).kind(), PropertyKind::Double);
        assert_eq!(
            PropertyValue::Text("x".to_string()).kind(),
            PropertyKind::Text
        );
    }

    #[test]
    fn test_extraction_matches_kind() {
        assert_eq!(i64::from_value(PropertyValue::Integer(10)), Some(10));
        assert_eq!(bool::from_value(PropertyValue::Bool(true)), Some(true));
        assert_eq!(
            String::from_value(PropertyValue::Text("zstd".to_string())),
            Some("zstd".to_string())
        );
        // Kind mismatch extracts nothing rather than coercing.
        assert_eq!(i64::from_value(PropertyValue::Text("10".to_string())), None);
        assert_eq!(bool::from_value(PropertyValue::Integer(1)), None);
    }

    #[test]
    fn test_display_is_raw_string_form() {
        assert_eq!(PropertyValue::Bool(false).to_string(), "false");
        assert_eq!(PropertyValue::Integer(42).to_string(), "42");
        assert_eq!(PropertyValue::Text("zstd".to_string()).to_string(), "zstd");
    }
}
