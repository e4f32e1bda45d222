//! Session locale settings: time zone key and locale tag.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical time zone identifier for a session (e.g. "UTC",
/// "America/New_York").
///
/// The key is carried verbatim; zone-rule resolution happens in the datetime
/// functions, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeZoneKey(String);

impl TimeZoneKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The engine default zone.
    pub fn utc() -> Self {
        Self("UTC".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TimeZoneKey {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for TimeZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TimeZoneKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// BCP-47 locale tag for a session (e.g. "en-US").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en-US".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Locale {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(TimeZoneKey::default().as_str(), "UTC");
        assert_eq!(Locale::default().as_str(), "en-US");
    }

    #[test]
    fn test_custom_zone() {
        let key = TimeZoneKey::from("Europe/Berlin");
        assert_eq!(key.to_string(), "Europe/Berlin");
        assert_ne!(key, TimeZoneKey::utc());
    }
}
