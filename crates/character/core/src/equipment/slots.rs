//! Static slot configuration.
//!
//! The slot table maps each slot tag to its hand category and preserves the
//! per-hand declaration order: the lower-numbered slot wins when looking up
//! a hand's active weapon. Loaded once at startup from a configuration
//! table and read-only afterwards.

use arrayvec::ArrayVec;

use crate::tag::{ActionTag, vocab};

/// Upper bound on slots per hand category.
pub const MAX_SLOTS_PER_HAND: usize = 8;

/// Which side of the body a slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandCategory {
    Left,
    Right,
    Tool,
}

/// A weapon-bearing hand. Tool slots are not hands for the purposes of the
/// overlay engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn category(self) -> HandCategory {
        match self {
            Hand::Left => HandCategory::Left,
            Hand::Right => HandCategory::Right,
        }
    }

    pub fn opposite(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

/// One named equipment attachment point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentSlot {
    pub tag: ActionTag,
    pub hand: HandCategory,
}

impl EquipmentSlot {
    pub fn new(tag: ActionTag, hand: HandCategory) -> Self {
        Self { tag, hand }
    }
}

/// Errors surfaced while building a slot table from configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotTableError {
    #[error("duplicate slot tag {0}")]
    DuplicateSlot(ActionTag),

    #[error("slot table has no slots")]
    Empty,

    #[error("hand {0} exceeds {MAX_SLOTS_PER_HAND} slots")]
    HandFull(HandCategory),
}

/// Static mapping from slot tags to hand categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotTable {
    slots: Vec<EquipmentSlot>,
    left: ArrayVec<ActionTag, MAX_SLOTS_PER_HAND>,
    right: ArrayVec<ActionTag, MAX_SLOTS_PER_HAND>,
    tool: ArrayVec<ActionTag, MAX_SLOTS_PER_HAND>,
}

impl SlotTable {
    /// Builds a table from configuration, rejecting duplicate slot tags and
    /// over-full hands.
    pub fn from_slots(slots: Vec<EquipmentSlot>) -> Result<Self, SlotTableError> {
        if slots.is_empty() {
            return Err(SlotTableError::Empty);
        }

        let mut table = Self {
            slots: Vec::with_capacity(slots.len()),
            left: ArrayVec::new(),
            right: ArrayVec::new(),
            tool: ArrayVec::new(),
        };

        for slot in slots {
            if table.contains(&slot.tag) {
                return Err(SlotTableError::DuplicateSlot(slot.tag));
            }
            let hand_list = match slot.hand {
                HandCategory::Left => &mut table.left,
                HandCategory::Right => &mut table.right,
                HandCategory::Tool => &mut table.tool,
            };
            hand_list
                .try_push(slot.tag.clone())
                .map_err(|_| SlotTableError::HandFull(slot.hand))?;
            table.slots.push(slot);
        }

        Ok(table)
    }

    /// The standard Soulslike layout: three weapon slots per hand plus two
    /// tool slots, in precedence order.
    pub fn soulslike_default() -> Self {
        Self::from_slots(vec![
            EquipmentSlot::new(vocab::SLOT_RIGHT_WEAPON_1, HandCategory::Right),
            EquipmentSlot::new(vocab::SLOT_RIGHT_WEAPON_2, HandCategory::Right),
            EquipmentSlot::new(vocab::SLOT_RIGHT_WEAPON_3, HandCategory::Right),
            EquipmentSlot::new(vocab::SLOT_LEFT_WEAPON_1, HandCategory::Left),
            EquipmentSlot::new(vocab::SLOT_LEFT_WEAPON_2, HandCategory::Left),
            EquipmentSlot::new(vocab::SLOT_LEFT_WEAPON_3, HandCategory::Left),
            EquipmentSlot::new(vocab::SLOT_TOOL_1, HandCategory::Tool),
            EquipmentSlot::new(vocab::SLOT_TOOL_2, HandCategory::Tool),
        ])
        .expect("default slot table is valid")
    }

    /// Hand category of a slot, or `None` for tags outside the table.
    pub fn hand_of(&self, slot: &ActionTag) -> Option<HandCategory> {
        self.slots
            .iter()
            .find(|entry| &entry.tag == slot)
            .map(|entry| entry.hand)
    }

    pub fn contains(&self, slot: &ActionTag) -> bool {
        self.slots.iter().any(|entry| &entry.tag == slot)
    }

    /// Slots of one hand category in precedence order (first = highest).
    pub fn hand_slots(&self, hand: HandCategory) -> &[ActionTag] {
        match hand {
            HandCategory::Left => &self.left,
            HandCategory::Right => &self.right,
            HandCategory::Tool => &self.tool,
        }
    }

    pub fn slots(&self) -> &[EquipmentSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
