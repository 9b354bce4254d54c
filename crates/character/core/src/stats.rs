//! Stat deltas contributed by equipment.
//!
//! Equipment applies flat deltas on equip and reverts them with the opposite
//! sign on unequip, so the sheet always reflects exactly the currently
//! equipped items. Anything richer (percentage bonuses, condition stacks)
//! lives with the embedding layer, not here.

use std::collections::HashMap;

/// The stats equipment can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    MaxHealth,
    MaxStamina,
    MaxFocus,
    Strength,
    Dexterity,
    Intelligence,
    Poise,
    Weight,
}

/// A single flat delta an item contributes while equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatChange {
    pub stat: StatKind,
    pub delta: i32,
}

impl StatChange {
    pub fn new(stat: StatKind, delta: i32) -> Self {
        Self { stat, delta }
    }
}

/// Current stat values for one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSheet {
    values: HashMap<StatKind, i32>,
}

impl StatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a stat; unset stats read as zero.
    pub fn value(&self, stat: StatKind) -> i32 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    /// Adds a signed delta to a stat.
    pub fn adjust(&mut self, stat: StatKind, delta: i32) {
        *self.values.entry(stat).or_insert(0) += delta;
    }

    /// Applies a batch of equipment deltas. `equipped = false` reverts them
    /// with the opposite sign, restoring the pre-equip values exactly.
    pub fn apply_changes(&mut self, changes: &[StatChange], equipped: bool) {
        let multiplier = if equipped { 1 } else { -1 };
        for change in changes {
            self.adjust(change.stat, change.delta * multiplier);
        }
    }
}
