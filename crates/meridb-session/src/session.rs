//! The query-scoped session record.
//!
//! One `Session` is created when a query is admitted and shared (via `Arc`) by
//! every connector session view derived from it. Everything on it is fixed at
//! construction except the page-metadata flag, which is a single engine-wide
//! toggle for the query and therefore an atomic cell rather than a per-view
//! copy.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use meridb_commons::{ConnectorIdentity, Locale, QueryId, TimeZoneKey};

/// Immutable-by-convention record of one query's session state.
///
/// `query_id` and `identity` never change after construction; `start_time` is
/// set once at build time. The only mutable field is `page_metadata_enabled`,
/// safe under concurrent readers and writers from fanned-out connector calls.
#[derive(Debug)]
pub struct Session {
    query_id: QueryId,
    identity: ConnectorIdentity,
    source: Option<String>,
    trace_token: Option<String>,
    time_zone_key: TimeZoneKey,
    locale: Locale,
    start_time: DateTime<Utc>,
    system_properties: HashMap<String, String>,
    page_metadata_enabled: AtomicBool,
}

impl Session {
    /// Start building a session for a query submitted by `user`.
    pub fn builder(query_id: impl Into<QueryId>, user: impl Into<String>) -> SessionBuilder {
        SessionBuilder {
            query_id: query_id.into(),
            identity: ConnectorIdentity::new(user),
            source: None,
            trace_token: None,
            time_zone_key: TimeZoneKey::default(),
            locale: Locale::default(),
            start_time: None,
            system_properties: HashMap::new(),
            page_metadata_enabled: false,
        }
    }

    pub fn query_id(&self) -> &QueryId {
        &self.query_id
    }

    /// The identity the query was submitted under. A connector call may run as
    /// a different effective identity; see `ConnectorSession::identity`.
    pub fn identity(&self) -> &ConnectorIdentity {
        &self.identity
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn trace_token(&self) -> Option<&str> {
        self.trace_token.as_deref()
    }

    pub fn time_zone_key(&self) -> &TimeZoneKey {
        &self.time_zone_key
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Raw string value of an engine-wide session property, if set.
    ///
    /// Typed access goes through [`crate::system_properties`].
    pub fn system_property(&self, name: &str) -> Option<&str> {
        self.system_properties.get(name).map(String::as_str)
    }

    pub fn is_page_metadata_enabled(&self) -> bool {
        // Relaxed: an isolated toggle with no ordering relationship to other memory.
        self.page_metadata_enabled.load(Ordering::Relaxed)
    }

    pub fn set_page_metadata_enabled(&self, enabled: bool) {
        self.page_metadata_enabled.store(enabled, Ordering::Relaxed);
    }
}

/// Builder for [`Session`]. Defaults: UTC zone, `en-US` locale, start time
/// taken at `build()`, empty system properties, page metadata off.
#[derive(Debug)]
pub struct SessionBuilder {
    query_id: QueryId,
    identity: ConnectorIdentity,
    source: Option<String>,
    trace_token: Option<String>,
    time_zone_key: TimeZoneKey,
    locale: Locale,
    start_time: Option<DateTime<Utc>>,
    system_properties: HashMap<String, String>,
    page_metadata_enabled: bool,
}

impl SessionBuilder {
    pub fn identity(mut self, identity: ConnectorIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn trace_token(mut self, token: impl Into<String>) -> Self {
        self.trace_token = Some(token.into());
        self
    }

    pub fn time_zone_key(mut self, key: TimeZoneKey) -> Self {
        self.time_zone_key = key;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set one engine-wide session property (raw string form).
    pub fn system_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.system_properties.insert(name.into(), value.into());
        self
    }

    pub fn page_metadata_enabled(mut self, enabled: bool) -> Self {
        self.page_metadata_enabled = enabled;
        self
    }

    pub fn build(self) -> Session {
        Session {
            query_id: self.query_id,
            identity: self.identity,
            source: self.source,
            trace_token: self.trace_token,
            time_zone_key: self.time_zone_key,
            locale: self.locale,
            start_time: self.start_time.unwrap_or_else(Utc::now),
            system_properties: self.system_properties,
            page_metadata_enabled: AtomicBool::new(self.page_metadata_enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_builder_defaults() {
        let session = Session::builder("q1", "alice").build();
        assert_eq!(session.query_id().as_str(), "q1");
        assert_eq!(session.identity().user(), "alice");
        assert_eq!(session.source(), None);
        assert_eq!(session.trace_token(), None);
        assert_eq!(session.time_zone_key().as_str(), "UTC");
        assert_eq!(session.locale().as_str(), "en-US");
        assert!(!session.is_page_metadata_enabled());
        assert_eq!(session.system_property("task_writer_count"), None);
    }

    #[test]
    fn test_builder_overrides() {
        let session = Session::builder("q2", "bob")
            .source("cli")
            .trace_token("trace-7")
            .time_zone_key(TimeZoneKey::from("Asia/Tokyo"))
            .locale(Locale::from("ja-JP"))
            .system_property("snapshot_enabled", "true")
            .build();

        assert_eq!(session.source(), Some("cli"));
        assert_eq!(session.trace_token(), Some("trace-7"));
        assert_eq!(session.time_zone_key().as_str(), "Asia/Tokyo");
        assert_eq!(session.system_property("snapshot_enabled"), Some("true"));
    }

    #[test]
    fn test_page_metadata_flag_shared_through_arc() {
        let session = Arc::new(Session::builder("q3", "carol").build());
        let other = Arc::clone(&session);

        assert!(!other.is_page_metadata_enabled());
        session.set_page_metadata_enabled(true);
        assert!(other.is_page_metadata_enabled());
    }
}
