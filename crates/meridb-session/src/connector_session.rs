//! The catalog-scoped session view handed to connectors.
//!
//! A `ConnectorSession` is built immediately before a connector entry point is
//! invoked and discarded when it returns. It is either in *system* mode (no
//! catalog bound, typed property reads always fail) or *catalog* mode (bound
//! to one catalog's handle, display name, property bag and decoder). The mode
//! is a sum type fixed at construction, so "half-scoped" views are
//! unrepresentable and accessors need no null checks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use meridb_commons::{
    CatalogId, ConnectorIdentity, Locale, QueryId, SessionError, SessionResult, TimeZoneKey,
};

use crate::decoder::PropertyDecoder;
use crate::properties::PropertyType;
use crate::session::Session;
use crate::system_properties;

/// Catalog scoping for one view: all-or-nothing.
enum CatalogScope {
    System,
    Catalog {
        catalog_id: CatalogId,
        catalog_name: String,
        // Owned at construction; the caller's map can no longer alias it.
        properties: HashMap<String, String>,
        decoder: Arc<dyn PropertyDecoder>,
    },
}

/// A connector's narrowed view of one query's session.
///
/// Answers identity and locale reads from the wrapped [`Session`]; delegates
/// typed property reads to the bound catalog's [`PropertyDecoder`]. Cheap to
/// construct, never persisted, carries no state across calls.
pub struct ConnectorSession {
    session: Arc<Session>,
    identity: ConnectorIdentity,
    scope: CatalogScope,
}

impl ConnectorSession {
    /// System-mode view for engine-internal connector calls. Typed property
    /// reads through this view always fail with an unknown-property error.
    pub fn system(session: Arc<Session>, identity: ConnectorIdentity) -> Self {
        Self {
            session,
            identity,
            scope: CatalogScope::System,
        }
    }

    /// Catalog-mode view for a normal connector call.
    ///
    /// `properties` is this catalog's resolved raw property bag, taken by
    /// value so later changes to the caller's copy cannot reach the view.
    pub fn for_catalog(
        session: Arc<Session>,
        identity: ConnectorIdentity,
        properties: HashMap<String, String>,
        catalog_id: CatalogId,
        catalog_name: impl Into<String>,
        decoder: Arc<dyn PropertyDecoder>,
    ) -> Self {
        Self {
            session,
            identity,
            scope: CatalogScope::Catalog {
                catalog_id,
                catalog_name: catalog_name.into(),
                properties,
                decoder,
            },
        }
    }

    pub fn query_id(&self) -> &QueryId {
        self.session.query_id()
    }

    pub fn source(&self) -> Option<&str> {
        self.session.source()
    }

    /// The effective identity for this connector call. May differ from the
    /// session's submitting identity when the catalog configures impersonation.
    pub fn identity(&self) -> &ConnectorIdentity {
        &self.identity
    }

    pub fn time_zone_key(&self) -> &TimeZoneKey {
        self.session.time_zone_key()
    }

    pub fn locale(&self) -> &Locale {
        self.session.locale()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.session.start_time()
    }

    pub fn trace_token(&self) -> Option<&str> {
        self.session.trace_token()
    }

    /// Display name of the bound catalog; `None` for system-mode views.
    pub fn catalog(&self) -> Option<&str> {
        match &self.scope {
            CatalogScope::System => None,
            CatalogScope::Catalog { catalog_name, .. } => Some(catalog_name),
        }
    }

    pub fn task_writer_count(&self) -> SessionResult<i64> {
        system_properties::task_writer_count(&self.session)
    }

    pub fn heuristic_index_filter_enabled(&self) -> SessionResult<bool> {
        system_properties::heuristic_index_filter_enabled(&self.session)
    }

    pub fn snapshot_enabled(&self) -> SessionResult<bool> {
        system_properties::snapshot_enabled(&self.session)
    }

    /// The query-wide page-metadata toggle, read from the shared Session:
    /// mutation through any view over the same Session is visible here.
    pub fn page_metadata_enabled(&self) -> bool {
        self.session.is_page_metadata_enabled()
    }

    pub fn set_page_metadata_enabled(&self, enabled: bool) {
        self.session.set_page_metadata_enabled(enabled);
    }

    /// Decode the catalog session property `name` as `T`.
    ///
    /// Every call re-decodes from the raw string; results are consistent with
    /// the (immutable) bag but not cached. In system mode this always fails
    /// with an unknown-property error, since property resolution requires a
    /// catalog scope and none exists.
    ///
    /// Panics if `name` is empty; that is a caller bug, not a query error.
    pub fn property<T: PropertyType>(&self, name: &str) -> SessionResult<T> {
        assert!(!name.is_empty(), "property name is empty");
        match &self.scope {
            CatalogScope::System => Err(SessionError::unknown_unscoped(name)),
            CatalogScope::Catalog {
                catalog_id,
                catalog_name,
                properties,
                decoder,
            } => {
                let raw = properties.get(name).map(String::as_str);
                let value =
                    decoder.decode_catalog_property(catalog_id, catalog_name, name, raw, T::KIND)?;
                // A conforming decoder returns the requested kind; anything
                // else is reported, not unwrapped.
                T::from_value(value).ok_or_else(|| {
                    SessionError::invalid(
                        catalog_name.clone(),
                        name,
                        raw.unwrap_or_default(),
                        "decoder returned a value of the wrong kind",
                    )
                })
            }
        }
    }
}

// Diagnostic form for logs and error context. Absent fields are omitted
// outright rather than printed as placeholders. Never used for equality.
impl fmt::Display for ConnectorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConnectorSession{{query_id={}, user={}",
            self.query_id(),
            self.identity.user()
        )?;
        if let Some(source) = self.source() {
            write!(f, ", source={}", source)?;
        }
        if let Some(token) = self.trace_token() {
            write!(f, ", trace_token={}", token)?;
        }
        write!(
            f,
            ", time_zone={}, locale={}, start_time={}",
            self.time_zone_key(),
            self.locale(),
            self.start_time().to_rfc3339()
        )?;
        if let CatalogScope::Catalog {
            catalog_name,
            properties,
            ..
        } = &self.scope
        {
            write!(f, ", catalog={}, properties={:?}", catalog_name, properties)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for ConnectorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
