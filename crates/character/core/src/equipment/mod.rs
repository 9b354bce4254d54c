//! Equipment slot table and overlay-state engine.
//!
//! The authoritative equipped-item map lives in [`EquipmentManager`]; every
//! equip/unequip is a transaction that keeps the per-hand overlay-tag caches
//! in lockstep with the map and fully recomputes the derived overlay state
//! before returning. Downstream combat and animation logic read the derived
//! state through a pure getter, once per update cycle.

mod manager;
mod overlay;
mod slots;

pub use manager::{
    EquipEvent, EquipmentManager, EquipmentSnapshot, SnapshotEntry, StanceEvent, UnequipEvent,
};
pub use overlay::{OverlayKind, OverlayState, OverlayTags, StanceFlags};
pub use slots::{EquipmentSlot, Hand, HandCategory, SlotTable, SlotTableError, MAX_SLOTS_PER_HAND};
