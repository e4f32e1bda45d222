//! Type-safe wrappers for engine identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type-safe wrapper for query identifiers.
///
/// Assigned once when the query is admitted and stable for the query's
/// lifetime. Ensures query ids cannot be accidentally used where catalog
/// handles are expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryId(String);

impl QueryId {
    /// Creates a new QueryId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the query ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for QueryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for QueryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for QueryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Type-safe wrapper for the internal catalog handle.
///
/// This is the engine's scoping key for catalog session properties. It is
/// distinct from the catalog *display name* shown in error messages: the two
/// usually coincide, but a catalog may be re-mounted under a versioned handle
/// while keeping its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogId(String);

impl CatalogId {
    /// Creates a new CatalogId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the catalog handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CatalogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CatalogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CatalogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_id_roundtrip() {
        let id = QueryId::new("20260830_000001_00001_xyz");
        assert_eq!(id.as_str(), "20260830_000001_00001_xyz");
        assert_eq!(id.to_string(), "20260830_000001_00001_xyz");
        assert_eq!(QueryId::from("a"), QueryId::new("a"));
    }

    #[test]
    fn test_catalog_id_distinct_from_display_name() {
        let id = CatalogId::new("hive_v2");
        assert_eq!(id.as_str(), "hive_v2");
        assert_eq!(id.clone().into_string(), "hive_v2");
    }
}
