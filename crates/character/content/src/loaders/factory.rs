//! Content factory for building character data from a data directory.

use std::path::{Path, PathBuf};

use character_core::SlotTable;

use crate::loaders::{ItemCatalog, ItemLoader, LoadResult, SlotTableLoader};

/// Content factory that loads all character content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── items.ron
/// └── slots.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load the equipment slot table from `slots.ron`.
    pub fn load_slot_table(&self) -> LoadResult<SlotTable> {
        let path = self.data_dir.join("slots.ron");
        SlotTableLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use character_core::{HandCategory, ItemHandle, ItemOracle};

    fn sample_factory() -> ContentFactory {
        ContentFactory::new(format!("{}/data", env!("CARGO_MANIFEST_DIR")))
    }

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn sample_items_load() {
        let catalog = sample_factory().load_items().expect("items.ron loads");
        assert!(!catalog.is_empty());

        let sword = catalog
            .definition(ItemHandle(1))
            .expect("handle 1 is the starter sword");
        assert!(sword.is_equippable());
        assert!(sword.overlay_tag().is_some());
    }

    #[test]
    fn sample_slot_table_loads() {
        let table = sample_factory()
            .load_slot_table()
            .expect("slots.ron loads");
        assert_eq!(table.hand_slots(HandCategory::Right).len(), 3);
        assert_eq!(table.hand_slots(HandCategory::Left).len(), 3);
        assert_eq!(table.hand_slots(HandCategory::Tool).len(), 2);
    }
}
