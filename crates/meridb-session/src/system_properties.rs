//! Engine-wide session settings.
//!
//! These are session-level feature flags, not catalog properties: they live in
//! the Session's raw system property map and are resolved through the system
//! scope of a property manager. Absent keys take the declared default;
//! malformed values error instead of defaulting.

use meridb_commons::{SessionError, SessionResult};
use once_cell::sync::Lazy;

use crate::properties::{PropertyType, PropertyValue};
use crate::property_manager::{PropertyMetadata, SessionPropertyManager};
use crate::session::Session;

pub const TASK_WRITER_COUNT: &str = "task_writer_count";
pub const HEURISTIC_INDEX_FILTER_ENABLED: &str = "heuristic_index_filter_enabled";
pub const SNAPSHOT_ENABLED: &str = "snapshot_enabled";

/// System-scope declarations seeded into every [`SessionPropertyManager`].
pub(crate) fn system_property_defaults() -> Vec<PropertyMetadata> {
    vec![
        PropertyMetadata::new(
            TASK_WRITER_COUNT,
            "Number of concurrent writer tasks per worker",
            PropertyValue::Integer(1),
        ),
        PropertyMetadata::new(
            HEURISTIC_INDEX_FILTER_ENABLED,
            "Apply heuristic index filtering during split scheduling",
            PropertyValue::Bool(false),
        ),
        PropertyMetadata::new(
            SNAPSHOT_ENABLED,
            "Capture query snapshots for restart-on-failure",
            PropertyValue::Bool(false),
        )
        .hidden(),
    ]
}

// Shared resolver for the fixed system scope. Catalog registration never goes
// through this instance.
static SYSTEM_SCOPE_MANAGER: Lazy<SessionPropertyManager> =
    Lazy::new(SessionPropertyManager::new);

fn resolve<T: PropertyType>(session: &Session, name: &str) -> SessionResult<T> {
    let value =
        SYSTEM_SCOPE_MANAGER.decode_system_property(name, session.system_property(name), T::KIND)?;
    T::from_value(value).ok_or_else(|| {
        SessionError::invalid(
            "system",
            name,
            session.system_property(name).unwrap_or_default(),
            "decoded value has the wrong kind",
        )
    })
}

pub fn task_writer_count(session: &Session) -> SessionResult<i64> {
    resolve(session, TASK_WRITER_COUNT)
}

pub fn heuristic_index_filter_enabled(session: &Session) -> SessionResult<bool> {
    resolve(session, HEURISTIC_INDEX_FILTER_ENABLED)
}

pub fn snapshot_enabled(session: &Session) -> SessionResult<bool> {
    resolve(session, SNAPSHOT_ENABLED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let session = Session::builder("q1", "alice").build();
        assert_eq!(task_writer_count(&session).unwrap(), 1);
        assert!(!heuristic_index_filter_enabled(&session).unwrap());
        assert!(!snapshot_enabled(&session).unwrap());
    }

    #[test]
    fn test_set_values_resolve() {
        let session = Session::builder("q2", "alice")
            .system_property(TASK_WRITER_COUNT, "8")
            .system_property(SNAPSHOT_ENABLED, "true")
            .build();
        assert_eq!(task_writer_count(&session).unwrap(), 8);
        assert!(snapshot_enabled(&session).unwrap());
    }

    #[test]
    fn test_malformed_value_errors_instead_of_defaulting() {
        let session = Session::builder("q3", "alice")
            .system_property(TASK_WRITER_COUNT, "many")
            .build();
        let err = task_writer_count(&session).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidSessionProperty { ref catalog, .. } if catalog == "system"
        ));
    }
}
