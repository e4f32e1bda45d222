//! The property-decoding contract between a connector session view and the
//! engine's property subsystem.
//!
//! The view owns scoping (which catalog, which raw value); the decoder owns
//! everything else: whether the name is registered for that catalog, what the
//! declared default is when no raw value was supplied, and how the raw string
//! coerces into the requested kind. Keeping this behind a one-method trait
//! means catalog property registries are swappable without touching the view.

use meridb_commons::{CatalogId, SessionResult};

use crate::properties::{PropertyKind, PropertyValue};

/// Decodes one catalog session property.
pub trait PropertyDecoder: Send + Sync {
    /// Decode `name` for the given catalog into a value of `kind`.
    ///
    /// `raw` is the user-supplied string for this property, or `None` when the
    /// user set nothing and the catalog's declared default applies.
    ///
    /// Errors: [`SessionError::UnknownSessionProperty`] when `name` is not
    /// registered for the catalog; [`SessionError::InvalidSessionProperty`]
    /// when the raw value cannot be coerced to `kind` or the property is
    /// declared with a different kind.
    ///
    /// [`SessionError::UnknownSessionProperty`]: meridb_commons::SessionError::UnknownSessionProperty
    /// [`SessionError::InvalidSessionProperty`]: meridb_commons::SessionError::InvalidSessionProperty
    fn decode_catalog_property(
        &self,
        catalog_id: &CatalogId,
        catalog: &str,
        name: &str,
        raw: Option<&str>,
        kind: PropertyKind,
    ) -> SessionResult<PropertyValue>;
}
