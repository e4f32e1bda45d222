//! Shared error types for the MeriDB session layer.
//!
//! All session-property failures are user-visible configuration errors, not
//! system faults: they abort the query with a message naming the catalog and
//! property, and are never retried by the engine.

use thiserror::Error;

/// Errors raised by session property resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The property name is not registered for the scoped catalog, or a typed
    /// property was read through a view with no catalog bound at all (the
    /// catalog is then absent).
    #[error("Unknown session property: {}.{}", .catalog.as_deref().unwrap_or(""), .name)]
    UnknownSessionProperty {
        catalog: Option<String>,
        name: String,
    },

    /// The raw string value could not be coerced to the requested type, or the
    /// requested type does not match the property's declared type.
    #[error("Invalid value '{value}' for session property {catalog}.{name}: {reason}")]
    InvalidSessionProperty {
        catalog: String,
        name: String,
        value: String,
        reason: String,
    },

    /// A catalog tried to register the same property name twice in one
    /// registration.
    #[error("Duplicate session property: {catalog}.{name}")]
    DuplicateSessionProperty { catalog: String, name: String },
}

impl SessionError {
    /// Unknown property scoped to a catalog.
    pub fn unknown(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownSessionProperty {
            catalog: Some(catalog.into()),
            name: name.into(),
        }
    }

    /// Unknown property with no catalog bound (system-mode views).
    pub fn unknown_unscoped(name: impl Into<String>) -> Self {
        Self::UnknownSessionProperty {
            catalog: None,
            name: name.into(),
        }
    }

    /// Typed-decode failure for a catalog property.
    pub fn invalid(
        catalog: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSessionProperty {
            catalog: catalog.into(),
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for session property operations.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_property_message() {
        let err = SessionError::unknown("hive", "compression");
        assert_eq!(err.to_string(), "Unknown session property: hive.compression");

        // System mode has no catalog to name.
        let err = SessionError::unknown_unscoped("compression");
        assert_eq!(err.to_string(), "Unknown session property: .compression");
    }

    #[test]
    fn test_invalid_property_message() {
        let err = SessionError::invalid("hive", "timeout", "soon", "not a valid integer");
        assert_eq!(
            err.to_string(),
            "Invalid value 'soon' for session property hive.timeout: not a valid integer"
        );
    }

    #[test]
    fn test_variants_are_distinct() {
        assert_ne!(
            SessionError::unknown("hive", "x"),
            SessionError::invalid("hive", "x", "1", "r")
        );
    }
}
