//! # meridb-session
//!
//! Query sessions and catalog-scoped connector session views for MeriDB.
//!
//! A query carries exactly one [`Session`]: identity, locale, time zone, trace
//! metadata, and the raw string session properties supplied by the user.
//! Connectors never see that session directly. For each connector call the
//! engine builds a [`ConnectorSession`] — a narrowed view bound either to no
//! catalog (system mode, engine-internal, property access forbidden) or to one
//! catalog with that catalog's property bag and a [`PropertyDecoder`].
//!
//! The split exists because property names collide across catalogs ("compression",
//! "timeout") and a connector must not be able to read another catalog's
//! configuration. Typed reads go through the decoder, which owns registration,
//! defaults, and coercion; the view owns only the scoping contract.
//!
//! ## Architecture
//!
//! ```text
//! query admission → Session (one per query)
//!                     └─ ConnectorSession (one per connector call)
//!                          └─ PropertyDecoder (SessionPropertyManager)
//! ```

pub mod connector_session;
pub mod decoder;
pub mod properties;
pub mod property_manager;
pub mod session;
pub mod system_properties;

// Re-export commonly used types at crate root
pub use connector_session::ConnectorSession;
pub use decoder::PropertyDecoder;
pub use properties::{PropertyKind, PropertyType, PropertyValue};
pub use property_manager::{PropertyMetadata, SessionPropertyManager};
pub use session::{Session, SessionBuilder};
