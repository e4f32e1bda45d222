//! Connector Identity
//!
//! This module provides `ConnectorIdentity` - the effective principal handed
//! to a connector for one call. It may differ from the identity the query was
//! submitted under (e.g. impersonation configured on the catalog), which is
//! why the connector session view carries its own identity instead of reading
//! the session's.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The authenticated/asserted principal for one connector call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectorIdentity {
    user: String,
    groups: BTreeSet<String>,
    extra_credentials: BTreeMap<String, String>,
}

impl ConnectorIdentity {
    /// Create an identity with no groups or extra credentials.
    pub fn new(user: impl Into<String>) -> Self {
        let user = user.into();
        assert!(!user.is_empty(), "user is empty");
        Self {
            user,
            groups: BTreeSet::new(),
            extra_credentials: BTreeMap::new(),
        }
    }

    /// Attach group membership.
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = String>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    /// Attach connector-specific credentials (e.g. delegation tokens).
    pub fn with_extra_credentials(
        mut self,
        credentials: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.extra_credentials = credentials.into_iter().collect();
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    pub fn extra_credentials(&self) -> &BTreeMap<String, String> {
        &self.extra_credentials
    }
}

impl fmt::Display for ConnectorIdentity {
    // Credentials must never end up in logs, so the display form is the user only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user)
    }
}
