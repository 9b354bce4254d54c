//! Typed events published by the runtime.

use serde::{Deserialize, Serialize};

use character_core::{ActionTag, Hand, ItemHandle, OverlayState};

use crate::character::CharacterId;

/// Input pipeline events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InputEvent {
    /// An action cleared the buffer and is now externally observable.
    ActionConsumed {
        character: CharacterId,
        action: ActionTag,
    },
}

/// Equipment engine events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EquipmentEvent {
    ItemEquipped {
        character: CharacterId,
        slot: ActionTag,
        item: ItemHandle,
    },
    ItemUnequipped {
        character: CharacterId,
        slot: ActionTag,
        item: ItemHandle,
    },
    StanceChanged {
        character: CharacterId,
        hand: Hand,
        engaged: bool,
    },
    /// Published after any change that recomputed the overlay projection.
    OverlayChanged {
        character: CharacterId,
        state: OverlayState,
    },
}
