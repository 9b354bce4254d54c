//! Content loaders for reading character data from files.
//!
//! This module provides loaders that convert RON files into the static
//! structures the equipment engine consumes: item catalogs and slot tables.

pub mod factory;
pub mod items;
pub mod slots;

pub use factory::ContentFactory;
pub use items::{ItemCatalog, ItemLoader};
pub use slots::SlotTableLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
