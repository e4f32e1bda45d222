//! The engine's concrete property decoder.
//!
//! `SessionPropertyManager` keeps one property registry per mounted catalog
//! plus a fixed system scope for engine-wide settings. Connectors register
//! their property definitions when their catalog is mounted; every typed read
//! then goes registration check → default application → string coercion, in
//! that order, so a malformed or unknown property always fails the same way
//! instead of silently producing a wrong-typed default.

use std::collections::HashMap;

use dashmap::DashMap;
use meridb_commons::{CatalogId, SessionError, SessionResult};

use crate::decoder::PropertyDecoder;
use crate::properties::{PropertyKind, PropertyValue};
use crate::system_properties;

/// Declaration of one session property: name, kind, and the default applied
/// when the user supplies no value. The kind is taken from the default, so a
/// declaration can never disagree with itself.
#[derive(Debug, Clone)]
pub struct PropertyMetadata {
    name: String,
    description: String,
    default: PropertyValue,
    hidden: bool,
}

impl PropertyMetadata {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        default: PropertyValue,
    ) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "property name is empty");
        Self {
            name,
            description: description.into(),
            default,
            hidden: false,
        }
    }

    /// Hide the property from SHOW SESSION listings. It stays settable.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> PropertyKind {
        self.default.kind()
    }

    pub fn default(&self) -> &PropertyValue {
        &self.default
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Registry-backed [`PropertyDecoder`] keyed by catalog handle.
///
/// Shared engine-wide behind an `Arc`; registration and decoding may run
/// concurrently from catalog mounts and query threads.
pub struct SessionPropertyManager {
    catalog_properties: DashMap<CatalogId, HashMap<String, PropertyMetadata>>,
    system_scope: HashMap<String, PropertyMetadata>,
}

impl SessionPropertyManager {
    /// Create a manager with the engine's system-scope settings seeded and no
    /// catalogs registered.
    pub fn new() -> Self {
        let system_scope = system_properties::system_property_defaults()
            .into_iter()
            .map(|metadata| (metadata.name().to_string(), metadata))
            .collect();
        Self {
            catalog_properties: DashMap::new(),
            system_scope,
        }
    }

    /// Register (or replace, on connector reload) a catalog's property
    /// definitions. Fails on duplicate names within `properties`.
    pub fn register_catalog_properties(
        &self,
        catalog_id: CatalogId,
        properties: Vec<PropertyMetadata>,
    ) -> SessionResult<()> {
        let mut registry = HashMap::with_capacity(properties.len());
        for metadata in properties {
            let name = metadata.name().to_string();
            if registry.insert(name.clone(), metadata).is_some() {
                return Err(SessionError::DuplicateSessionProperty {
                    catalog: catalog_id.to_string(),
                    name,
                });
            }
        }
        log::debug!(
            "registered {} session properties for catalog {}",
            registry.len(),
            catalog_id
        );
        self.catalog_properties.insert(catalog_id, registry);
        Ok(())
    }

    /// Drop a catalog's definitions when it is unmounted.
    pub fn deregister_catalog_properties(&self, catalog_id: &CatalogId) {
        self.catalog_properties.remove(catalog_id);
    }

    /// Decode an engine-wide (system scope) session property. Errors name the
    /// pseudo-catalog "system".
    pub fn decode_system_property(
        &self,
        name: &str,
        raw: Option<&str>,
        kind: PropertyKind,
    ) -> SessionResult<PropertyValue> {
        let metadata = self
            .system_scope
            .get(name)
            .ok_or_else(|| SessionError::unknown(SYSTEM_SCOPE, name))?;
        decode_value(metadata, SYSTEM_SCOPE, name, raw, kind)
    }
}

impl Default for SessionPropertyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyDecoder for SessionPropertyManager {
    fn decode_catalog_property(
        &self,
        catalog_id: &CatalogId,
        catalog: &str,
        name: &str,
        raw: Option<&str>,
        kind: PropertyKind,
    ) -> SessionResult<PropertyValue> {
        let registry = self
            .catalog_properties
            .get(catalog_id)
            .ok_or_else(|| SessionError::unknown(catalog, name))?;
        let metadata = registry
            .get(name)
            .ok_or_else(|| SessionError::unknown(catalog, name))?;
        decode_value(metadata, catalog, name, raw, kind)
    }
}

/// Display name of the engine-internal scope in error messages.
const SYSTEM_SCOPE: &str = "system";

fn decode_value(
    metadata: &PropertyMetadata,
    catalog: &str,
    name: &str,
    raw: Option<&str>,
    kind: PropertyKind,
) -> SessionResult<PropertyValue> {
    if metadata.kind() != kind {
        return Err(SessionError::invalid(
            catalog,
            name,
            raw.unwrap_or_default(),
            format!(
                "property is declared as {}, requested as {}",
                metadata.kind(),
                kind
            ),
        ));
    }
    match raw {
        None => Ok(metadata.default().clone()),
        Some(raw) => parse_raw(kind, raw).map_err(|reason| {
            log::trace!("rejected session property {}.{}={}: {}", catalog, name, raw, reason);
            SessionError::invalid(catalog, name, raw, reason)
        }),
    }
}

fn parse_raw(kind: PropertyKind, raw: &str) -> Result<PropertyValue, String> {
    match kind {
        PropertyKind::Bool => match raw {
            "true" => Ok(PropertyValue::Bool(true)),
            "false" => Ok(PropertyValue::Bool(false)),
            _ => Err("expected 'true' or 'false'".to_string()),
        },
        PropertyKind::Integer => raw
            .parse::<i64>()
            .map(PropertyValue::Integer)
            .map_err(|e| format!("not a valid integer: {}", e)),
        PropertyKind::Double => raw
            .parse::<f64>()
            .map(PropertyValue::Double)
            .map_err(|e| format!("not a valid double: {}", e)),
        PropertyKind::Text => Ok(PropertyValue::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hive_properties() -> Vec<PropertyMetadata> {
        vec![
            PropertyMetadata::new(
                "compression",
                "Write compression codec",
                PropertyValue::Text("zstd".to_string()),
            ),
            PropertyMetadata::new(
                "timeout",
                "Split generation timeout in seconds",
                PropertyValue::Integer(30),
            ),
            PropertyMetadata::new(
                "sampling_ratio",
                "Stats sampling ratio",
                PropertyValue::Double(0.1),
            )
            .hidden(),
        ]
    }

    #[test]
    fn test_decode_supplied_value() {
        let manager = SessionPropertyManager::new();
        let id = CatalogId::new("hive");
        manager
            .register_catalog_properties(id.clone(), hive_properties())
            .unwrap();

        let value = manager
            .decode_catalog_property(&id, "hive", "timeout", Some("120"), PropertyKind::Integer)
            .unwrap();
        assert_eq!(value, PropertyValue::Integer(120));
    }

    #[test]
    fn test_decode_applies_default_when_absent() {
        let manager = SessionPropertyManager::new();
        let id = CatalogId::new("hive");
        manager
            .register_catalog_properties(id.clone(), hive_properties())
            .unwrap();

        let value = manager
            .decode_catalog_property(&id, "hive", "compression", None, PropertyKind::Text)
            .unwrap();
        assert_eq!(value, PropertyValue::Text("zstd".to_string()));
    }

    #[test]
    fn test_unknown_property_names_catalog() {
        let manager = SessionPropertyManager::new();
        let id = CatalogId::new("hive");
        manager
            .register_catalog_properties(id.clone(), hive_properties())
            .unwrap();

        let err = manager
            .decode_catalog_property(&id, "hive", "nope", None, PropertyKind::Text)
            .unwrap_err();
        assert_eq!(err, SessionError::unknown("hive", "nope"));
    }

    #[test]
    fn test_unregistered_catalog_is_unknown() {
        let manager = SessionPropertyManager::new();
        let err = manager
            .decode_catalog_property(
                &CatalogId::new("missing"),
                "missing",
                "compression",
                None,
                PropertyKind::Text,
            )
            .unwrap_err();
        assert_eq!(err, SessionError::unknown("missing", "compression"));
    }

    #[test]
    fn test_malformed_value_is_invalid_not_default() {
        let manager = SessionPropertyManager::new();
        let id = CatalogId::new("hive");
        manager
            .register_catalog_properties(id.clone(), hive_properties())
            .unwrap();

        let err = manager
            .decode_catalog_property(&id, "hive", "timeout", Some("soon"), PropertyKind::Integer)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidSessionProperty { ref name, .. } if name == "timeout"
        ));
    }

    #[test]
    fn test_kind_mismatch_is_invalid() {
        let manager = SessionPropertyManager::new();
        let id = CatalogId::new("hive");
        manager
            .register_catalog_properties(id.clone(), hive_properties())
            .unwrap();

        // "timeout" is declared integer; asking for varchar is a caller bug,
        // reported as invalid rather than unknown.
        let err = manager
            .decode_catalog_property(&id, "hive", "timeout", Some("30"), PropertyKind::Text)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidSessionProperty { .. }));
    }

    #[test]
    fn test_duplicate_names_fail_registration() {
        let manager = SessionPropertyManager::new();
        let err = manager
            .register_catalog_properties(
                CatalogId::new("hive"),
                vec![
                    PropertyMetadata::new("timeout", "", PropertyValue::Integer(1)),
                    PropertyMetadata::new("timeout", "", PropertyValue::Integer(2)),
                ],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::DuplicateSessionProperty { ref name, .. } if name == "timeout"
        ));
    }

    #[test]
    fn test_reregistration_replaces_definitions() {
        let manager = SessionPropertyManager::new();
        let id = CatalogId::new("hive");
        manager
            .register_catalog_properties(id.clone(), hive_properties())
            .unwrap();
        manager
            .register_catalog_properties(
                id.clone(),
                vec![PropertyMetadata::new(
                    "timeout",
                    "",
                    PropertyValue::Integer(60),
                )],
            )
            .unwrap();

        // New default; old "compression" definition is gone.
        let value = manager
            .decode_catalog_property(&id, "hive", "timeout", None, PropertyKind::Integer)
            .unwrap();
        assert_eq!(value, PropertyValue::Integer(60));
        assert!(manager
            .decode_catalog_property(&id, "hive", "compression", None, PropertyKind::Text)
            .is_err());
    }

    #[test]
    fn test_deregistration() {
        let manager = SessionPropertyManager::new();
        let id = CatalogId::new("hive");
        manager
            .register_catalog_properties(id.clone(), hive_properties())
            .unwrap();
        manager.deregister_catalog_properties(&id);
        assert_eq!(
            manager
                .decode_catalog_property(&id, "hive", "timeout", None, PropertyKind::Integer)
                .unwrap_err(),
            SessionError::unknown("hive", "timeout")
        );
    }

    #[test]
    fn test_system_scope_errors_name_system() {
        let manager = SessionPropertyManager::new();
        let err = manager
            .decode_system_property("no_such_setting", None, PropertyKind::Bool)
            .unwrap_err();
        assert_eq!(err, SessionError::unknown("system", "no_such_setting"));
    }
}
