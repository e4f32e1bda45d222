//! # meridb-commons
//!
//! Shared types and error taxonomy for MeriDB.
//!
//! This crate provides the foundational types used across the MeriDB crates
//! (meridb-session and the connector-facing layers above it). It carries no
//! heavy dependencies so that every crate in the workspace can depend on it
//! without cycles.
//!
//! ## Type-Safe Wrappers
//!
//! - `QueryId`: opaque per-query identifier
//! - `CatalogId`: internal catalog handle used for property scoping
//! - `TimeZoneKey` / `Locale`: session locale settings
//!
//! ## Example Usage
//!
//! ```rust
//! use meridb_commons::{CatalogId, ConnectorIdentity, QueryId};
//!
//! let query_id = QueryId::new("20260830_123456_00042_abcde");
//! let catalog_id = CatalogId::new("hive");
//! let identity = ConnectorIdentity::new("alice");
//!
//! assert_eq!(query_id.as_str(), "20260830_123456_00042_abcde");
//! assert_eq!(identity.user(), "alice");
//! assert_ne!(catalog_id.as_str(), query_id.as_str());
//! ```

pub mod errors;
pub mod identity;
pub mod ids;
pub mod locale;

// Re-export commonly used types at crate root
pub use errors::{SessionError, SessionResult};
pub use identity::ConnectorIdentity;
pub use ids::{CatalogId, QueryId};
pub use locale::{Locale, TimeZoneKey};
