//! Item catalog loader.

use std::collections::HashMap;
use std::path::Path;

use character_core::{ItemDefinition, ItemHandle, ItemOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemCatalogSpec {
    items: Vec<ItemDefinition>,
}

/// Loaded, handle-indexed item catalog.
///
/// Implements [`ItemOracle`] so the runtime can hand it straight to the
/// equipment engine.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemHandle, ItemDefinition>,
}

impl ItemCatalog {
    /// Builds a catalog from definitions, rejecting duplicate handles.
    pub fn from_definitions(definitions: Vec<ItemDefinition>) -> LoadResult<Self> {
        let mut items = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            if let Some(previous) = items.insert(definition.handle, definition) {
                anyhow::bail!(
                    "Duplicate item handle {} ({})",
                    previous.handle.0,
                    previous.name
                );
            }
        }
        Ok(Self { items })
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&ItemDefinition> {
        self.items.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.items.get(&handle).cloned()
    }
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the item catalog
    ///
    /// # Returns
    ///
    /// Returns a handle-indexed [`ItemCatalog`].
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        let spec: ItemCatalogSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        ItemCatalog::from_definitions(spec.items)
    }
}
