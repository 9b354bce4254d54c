//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from content loading and character coordination so clients
//! can bubble them up with consistent context.

use character_core::{ActionTag, ItemHandle, SlotTableError};

use crate::character::CharacterId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("no character with id {0}")]
    CharacterNotFound(CharacterId),

    #[error("no item with handle {}", .0.0)]
    UnknownItem(ItemHandle),

    #[error("slot {0} is not in the character's slot table")]
    UnknownSlot(ActionTag),

    #[error("item {item:?} cannot be equipped to slot {slot}")]
    NotEquippable { item: ItemHandle, slot: ActionTag },

    #[error(transparent)]
    SlotTable(#[from] SlotTableError),

    #[error("runtime requires an item catalog before building")]
    MissingItems,

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}
