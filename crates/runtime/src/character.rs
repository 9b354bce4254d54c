//! A runtime-managed character.
//!
//! Bundles the input buffer, equipment manager, and stat sheet for one
//! character and forwards their core notifications onto the event bus.

use std::fmt;

use serde::{Deserialize, Serialize};

use character_core::{EquipmentManager, InputBuffer, SlotTable, StatSheet};

use crate::events::{EquipmentEvent, Event, EventBus, InputEvent};

/// Stable identifier for a spawned character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character-{}", self.0)
    }
}

/// One character's gameplay state.
///
/// The core components stay directly accessible; the runtime only adds
/// identity, bus forwarding, and per-frame scheduling on top.
pub struct Character {
    id: CharacterId,
    pub input: InputBuffer,
    pub equipment: EquipmentManager,
    pub stats: StatSheet,
}

impl Character {
    /// Creates a character and wires its core notifications onto the bus.
    pub fn new(id: CharacterId, slot_table: SlotTable, bus: &EventBus) -> Self {
        let mut input = InputBuffer::new();
        let forward = bus.clone();
        input.on_consumed(move |action| {
            forward.publish(Event::Input(InputEvent::ActionConsumed {
                character: id,
                action: action.clone(),
            }));
        });

        let mut equipment = EquipmentManager::new(slot_table);
        let forward = bus.clone();
        equipment.on_item_equipped(move |event| {
            forward.publish(Event::Equipment(EquipmentEvent::ItemEquipped {
                character: id,
                slot: event.slot.clone(),
                item: event.item,
            }));
        });
        let forward = bus.clone();
        equipment.on_item_unequipped(move |event| {
            forward.publish(Event::Equipment(EquipmentEvent::ItemUnequipped {
                character: id,
                slot: event.slot.clone(),
                item: event.item,
            }));
        });
        let forward = bus.clone();
        equipment.on_stance_changed(move |event| {
            forward.publish(Event::Equipment(EquipmentEvent::StanceChanged {
                character: id,
                hand: event.hand,
                engaged: event.engaged,
            }));
        });

        Self {
            id,
            input,
            equipment,
            stats: StatSheet::new(),
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// One frame of cooperative work: re-evaluates any parked input retry.
    pub fn tick(&mut self) {
        self.input.tick();
    }

    /// Teardown. Drops any parked input so nothing fires after despawn.
    pub fn cancel_outstanding(&mut self) {
        self.input.cancel_pending();
    }
}
