//! Deterministic character gameplay logic shared across embedders.
//!
//! `character-core` defines the canonical rules for the action
//! input-buffering pipeline and the equipment slot / overlay-state engine.
//! Everything here is synchronous and single-threaded: the embedding layer
//! supplies the per-frame tick and routes the broadcast events, while this
//! crate owns the state machines and transactions.
pub mod equipment;
pub mod events;
pub mod input;
pub mod item;
pub mod stats;
pub mod tag;

pub use equipment::{
    EquipEvent, EquipmentManager, EquipmentSlot, EquipmentSnapshot, Hand, HandCategory,
    OverlayKind, OverlayState, SlotTable, SlotTableError, StanceEvent, StanceFlags, UnequipEvent,
};
pub use events::Dispatcher;
pub use input::InputBuffer;
pub use item::{GuardData, ItemDefinition, ItemHandle, ItemKind, ItemOracle, ShieldData, ToolData, WeaponData};
pub use stats::{StatChange, StatKind, StatSheet};
pub use tag::{ActionTag, TagSet, vocab};
