//! Equipment slot table loader.

use std::path::Path;

use character_core::{EquipmentSlot, SlotTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Slot table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotTableSpec {
    slots: Vec<EquipmentSlot>,
}

/// Loader for equipment slot tables from RON files.
pub struct SlotTableLoader;

impl SlotTableLoader {
    /// Load a slot table from a RON file.
    ///
    /// Declaration order in the file is the slot precedence order. Duplicate
    /// slot tags and over-full hands are rejected.
    pub fn load(path: &Path) -> LoadResult<SlotTable> {
        let content = read_file(path)?;
        let spec: SlotTableSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse slot table RON: {}", e))?;

        SlotTable::from_slots(spec.slots)
            .map_err(|e| anyhow::anyhow!("Invalid slot table {}: {}", path.display(), e))
    }
}
