//! Item definitions consumed by the equipment engine.
//!
//! # Design: Base + Kind Pattern
//!
//! - The base struct holds common fields (handle, display name)
//! - The `kind` enum holds type-specific data (overlay contribution, stat
//!   deltas, guard support)
//!
//! Definitions are static data supplied by a catalog (see the content crate's
//! loaders); the equipment engine never mutates them.

use crate::stats::StatChange;
use crate::tag::ActionTag;

/// Stable identifier for an item definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemHandle(pub u32);

/// Guard (block) support carried by shields and some weapons.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardData {
    /// Animation sequence the guard loop plays.
    pub sequence: ActionTag,
    /// How much stability the guard has against incoming hits.
    pub stability: u16,
}

/// An item's static definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub kind: ItemKind,
}

/// Item type with type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Hand-held weapon.
    Weapon(WeaponData),

    /// Off-hand shield.
    Shield(ShieldData),

    /// Usable tool (torch, lantern, throwing knives).
    Tool(ToolData),

    /// Consumable; not equippable to hand or tool slots.
    Consumable { max_stack: u16 },
}

/// Weapon-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponData {
    /// Overlay category this weapon contributes to its hand while equipped.
    pub overlay_tag: ActionTag,
    pub stat_changes: Vec<StatChange>,
    /// Present when the weapon can block in place of a shield.
    pub guard: Option<GuardData>,
}

/// Shield-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldData {
    pub overlay_tag: ActionTag,
    pub stat_changes: Vec<StatChange>,
    pub guard: GuardData,
}

/// Tool-specific data. Tools occupy tool slots and contribute no overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolData {
    pub stat_changes: Vec<StatChange>,
}

impl ItemDefinition {
    pub fn new(handle: ItemHandle, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            handle,
            name: name.into(),
            kind,
        }
    }

    /// Whether this item can occupy an equipment slot at all.
    pub fn is_equippable(&self) -> bool {
        !matches!(self.kind, ItemKind::Consumable { .. })
    }

    /// Overlay category this item contributes to its hand, if any.
    pub fn overlay_tag(&self) -> Option<&ActionTag> {
        match &self.kind {
            ItemKind::Weapon(data) => Some(&data.overlay_tag),
            ItemKind::Shield(data) => Some(&data.overlay_tag),
            ItemKind::Tool(_) | ItemKind::Consumable { .. } => None,
        }
    }

    /// Stat deltas applied while the item is equipped.
    pub fn stat_changes(&self) -> &[StatChange] {
        match &self.kind {
            ItemKind::Weapon(data) => &data.stat_changes,
            ItemKind::Shield(data) => &data.stat_changes,
            ItemKind::Tool(data) => &data.stat_changes,
            ItemKind::Consumable { .. } => &[],
        }
    }

    /// Guard support, if the item can block.
    pub fn guard(&self) -> Option<&GuardData> {
        match &self.kind {
            ItemKind::Weapon(data) => data.guard.as_ref(),
            ItemKind::Shield(data) => Some(&data.guard),
            ItemKind::Tool(_) | ItemKind::Consumable { .. } => None,
        }
    }
}

/// Read-only access to the item catalog.
///
/// Supplied by the embedding layer; the engine only ever looks definitions
/// up, it never enumerates or mutates them.
pub trait ItemOracle {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition>;
}
