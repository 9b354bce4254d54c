//! Data-driven character content and loaders.
//!
//! This crate houses static character data and provides loaders for RON data
//! files:
//! - Item catalogs (weapons, shields, tools, consumables)
//! - Equipment slot tables (per-hand slot layout and precedence)
//!
//! Content is consumed by the runtime through oracle implementations and
//! never appears in character state. All loaders use character-core types
//! directly with serde for RON deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, ItemCatalog, ItemLoader, SlotTableLoader};
