//! Equip/unequip transactions and the derived overlay projection.

use std::collections::{HashMap, HashSet};

use crate::equipment::overlay::{self, OverlayKind, OverlayState, OverlayTags, StanceFlags};
use crate::equipment::slots::{Hand, HandCategory, SlotTable};
use crate::events::Dispatcher;
use crate::item::{GuardData, ItemDefinition, ItemHandle, ItemOracle};
use crate::stats::{StatChange, StatSheet};
use crate::tag::ActionTag;

/// Broadcast after an item lands in a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipEvent {
    pub slot: ActionTag,
    pub item: ItemHandle,
}

/// Broadcast after a slot is cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnequipEvent {
    pub slot: ActionTag,
    pub item: ItemHandle,
}

/// Broadcast when a hand enters or leaves two-hand stance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StanceEvent {
    pub hand: Hand,
    pub engaged: bool,
}

/// Everything a slot's occupant contributed at equip time.
///
/// Teardown reads the contributions back from here instead of re-resolving
/// the item, so the map and the overlay-tag caches cannot drift apart even
/// if the catalog changes underneath us.
#[derive(Clone, Debug, PartialEq, Eq)]
struct EquippedEntry {
    item: ItemHandle,
    overlay_tag: Option<ActionTag>,
    stat_changes: Vec<StatChange>,
    stats_applied: bool,
    guard: Option<GuardData>,
}

/// Authoritative equipment state for one character.
///
/// Every mutation is a transaction: the equipped-item map, the per-hand
/// overlay-tag caches, and the derived overlay state are updated together
/// before control returns, so any read between transactions observes a
/// fully consistent snapshot.
///
/// Caller-contract violations (unknown slot tag, non-equippable item,
/// unequip of an empty slot) are silent no-ops, never errors; callers are
/// expected to pre-validate, and the embedding layer is where violations
/// get logged.
pub struct EquipmentManager {
    slot_table: SlotTable,
    equipped: HashMap<ActionTag, EquippedEntry>,
    left_overlay: OverlayTags,
    right_overlay: OverlayTags,
    overlay: OverlayState,
    stance: StanceFlags,
    /// Unwielded (visually hidden) slots; map contents are unaffected.
    hidden: HashSet<ActionTag>,
    active_tool_slot: Option<ActionTag>,
    active_guard: Option<GuardData>,
    on_equipped: Dispatcher<EquipEvent>,
    on_unequipped: Dispatcher<UnequipEvent>,
    on_stance_changed: Dispatcher<StanceEvent>,
}

impl EquipmentManager {
    pub fn new(slot_table: SlotTable) -> Self {
        Self {
            slot_table,
            equipped: HashMap::new(),
            left_overlay: OverlayTags::new(),
            right_overlay: OverlayTags::new(),
            overlay: OverlayState::default(),
            stance: StanceFlags::empty(),
            hidden: HashSet::new(),
            active_tool_slot: None,
            active_guard: None,
            on_equipped: Dispatcher::new(),
            on_unequipped: Dispatcher::new(),
            on_stance_changed: Dispatcher::new(),
        }
    }

    // ------------------------------------------------------------------
    // Event surface
    // ------------------------------------------------------------------

    pub fn on_item_equipped(&mut self, listener: impl FnMut(&EquipEvent) + 'static) {
        self.on_equipped.subscribe(listener);
    }

    pub fn on_item_unequipped(&mut self, listener: impl FnMut(&UnequipEvent) + 'static) {
        self.on_unequipped.subscribe(listener);
    }

    pub fn on_stance_changed(&mut self, listener: impl FnMut(&StanceEvent) + 'static) {
        self.on_stance_changed.subscribe(listener);
    }

    // ------------------------------------------------------------------
    // Equip / unequip transactions
    // ------------------------------------------------------------------

    /// Equips an item to a slot.
    ///
    /// An occupied slot is torn down first (stats reverted, overlay
    /// contribution removed) so nothing is double-counted. Returns false on
    /// a caller-contract violation: non-equippable item or a slot tag
    /// outside the table.
    pub fn equip_to_slot(
        &mut self,
        item: &ItemDefinition,
        slot: ActionTag,
        change_stats: bool,
        stats: &mut StatSheet,
    ) -> bool {
        if !item.is_equippable() {
            return false;
        }
        let Some(hand) = self.slot_table.hand_of(&slot) else {
            return false;
        };

        if self.is_slot_occupied(&slot) {
            self.unequip_from_slot(&slot, stats);
        }

        let entry = EquippedEntry {
            item: item.handle,
            overlay_tag: item.overlay_tag().cloned(),
            stat_changes: item.stat_changes().to_vec(),
            stats_applied: change_stats,
            guard: item.guard().cloned(),
        };

        if entry.stats_applied {
            stats.apply_changes(&entry.stat_changes, true);
        }
        if let (Some(tag), Some(overlay)) = (&entry.overlay_tag, Self::overlay_tags_mut_for(
            &mut self.left_overlay,
            &mut self.right_overlay,
            hand,
        )) {
            overlay.add(tag.clone());
        }

        let item_handle = entry.item;
        self.equipped.insert(slot.clone(), entry);
        self.recompute_overlay();
        self.refresh_active_guard_sequence();
        self.on_equipped.broadcast(&EquipEvent {
            slot,
            item: item_handle,
        });
        true
    }

    /// Clears a slot, reverting everything its occupant contributed.
    /// No-op on an empty slot.
    pub fn unequip_from_slot(
        &mut self,
        slot: &ActionTag,
        stats: &mut StatSheet,
    ) -> Option<ItemHandle> {
        let entry = self.equipped.remove(slot)?;

        if entry.stats_applied {
            stats.apply_changes(&entry.stat_changes, false);
        }
        if let Some(tag) = &entry.overlay_tag
            && let Some(hand) = self.slot_table.hand_of(slot)
            && let Some(overlay) =
                Self::overlay_tags_mut_for(&mut self.left_overlay, &mut self.right_overlay, hand)
        {
            overlay.remove(tag);
        }

        self.hidden.remove(slot);
        if self.active_tool_slot.as_ref() == Some(slot) {
            self.active_tool_slot = None;
        }

        self.recompute_overlay();
        self.refresh_active_guard_sequence();
        self.release_stale_stances();
        self.on_unequipped.broadcast(&UnequipEvent {
            slot: slot.clone(),
            item: entry.item,
        });
        Some(entry.item)
    }

    /// Equips a tool, first removing the same item from any other tool slot
    /// so a tool is never equipped twice, then marking the slot active.
    /// Returns false when the slot is not a tool slot.
    pub fn equip_tool_to_slot(
        &mut self,
        item: &ItemDefinition,
        slot: ActionTag,
        change_stats: bool,
        stats: &mut StatSheet,
    ) -> bool {
        if self.slot_table.hand_of(&slot) != Some(HandCategory::Tool) {
            return false;
        }
        self.unequip_tool_from_other_slots(item.handle, stats);
        if !self.equip_to_slot(item, slot.clone(), change_stats, stats) {
            return false;
        }
        self.active_tool_slot = Some(slot);
        true
    }

    fn unequip_tool_from_other_slots(&mut self, item: ItemHandle, stats: &mut StatSheet) {
        let occupied: Vec<ActionTag> = self
            .slot_table
            .hand_slots(HandCategory::Tool)
            .iter()
            .filter(|slot| {
                self.equipped
                    .get(*slot)
                    .is_some_and(|entry| entry.item == item)
            })
            .cloned()
            .collect();
        for slot in occupied {
            self.unequip_from_slot(&slot, stats);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_slot_occupied(&self, slot: &ActionTag) -> bool {
        self.equipped.contains_key(slot)
    }

    /// Item occupying a slot, if any.
    pub fn item_at_slot(&self, slot: &ActionTag) -> Option<ItemHandle> {
        self.equipped.get(slot).map(|entry| entry.item)
    }

    /// First occupied slot in the hand's precedence order.
    pub fn active_weapon_slot(&self, hand: Hand) -> Option<ActionTag> {
        self.slot_table
            .hand_slots(hand.category())
            .iter()
            .find(|slot| self.equipped.contains_key(*slot))
            .cloned()
    }

    /// First slot anywhere holding this item.
    pub fn is_item_equipped(&self, item: ItemHandle) -> Option<ActionTag> {
        self.slot_table
            .slots()
            .iter()
            .map(|slot| &slot.tag)
            .find(|slot| {
                self.equipped
                    .get(*slot)
                    .is_some_and(|entry| entry.item == item)
            })
            .cloned()
    }

    pub fn is_item_equipped_to_slot(&self, item: ItemHandle, slot: &ActionTag) -> bool {
        self.item_at_slot(slot) == Some(item)
    }

    /// How many slots currently hold this item.
    pub fn equipped_count(&self, item: ItemHandle) -> usize {
        self.equipped
            .values()
            .filter(|entry| entry.item == item)
            .count()
    }

    pub fn are_both_weapon_slots_active(&self) -> bool {
        self.active_weapon_slot(Hand::Left).is_some()
            && self.active_weapon_slot(Hand::Right).is_some()
    }

    pub fn is_dual_wield_possible(&self) -> bool {
        self.are_both_weapon_slots_active()
    }

    pub fn active_tool_slot(&self) -> Option<&ActionTag> {
        self.active_tool_slot.as_ref()
    }

    /// Points the tool wheel at a slot. No-op for non-tool slots.
    pub fn set_active_tool_slot(&mut self, slot: ActionTag) {
        if self.slot_table.hand_of(&slot) == Some(HandCategory::Tool) {
            self.active_tool_slot = Some(slot);
        }
    }

    pub fn slot_table(&self) -> &SlotTable {
        &self.slot_table
    }

    // ------------------------------------------------------------------
    // Overlay projection
    // ------------------------------------------------------------------

    /// The current derived overlay state. Pull-based: recomputed on every
    /// equipment change, never pushed.
    pub fn overlay_state(&self) -> OverlayState {
        self.overlay
    }

    pub fn stance_flags(&self) -> StanceFlags {
        self.stance
    }

    pub fn is_two_hand_stance_active(&self, hand: Hand) -> bool {
        self.stance.contains(StanceFlags::for_hand(hand))
    }

    /// Full recompute, start-to-finish, never partial:
    /// reset, per-hand sequential overwrite, dual-wield promotion, stance
    /// re-application, then the right-hand-priority active rule.
    fn recompute_overlay(&mut self) {
        let mut left = overlay::resolve_hand(&self.left_overlay);
        let mut right = overlay::resolve_hand(&self.right_overlay);

        // A stance pins its hand to TwoHanded and hides the other, so
        // dual-wield never applies while a stance flag is set.
        if self.stance.is_empty()
            && left == OverlayKind::OneHanded
            && right == OverlayKind::OneHanded
            && self.are_both_weapon_slots_active()
        {
            left = OverlayKind::DualWield;
            right = OverlayKind::DualWield;
        }

        if self.stance.contains(StanceFlags::LEFT_TWO_HANDED)
            && self.active_weapon_slot(Hand::Left).is_some()
        {
            left = OverlayKind::TwoHanded;
        }
        if self.stance.contains(StanceFlags::RIGHT_TWO_HANDED)
            && self.active_weapon_slot(Hand::Right).is_some()
        {
            right = OverlayKind::TwoHanded;
        }

        self.overlay = OverlayState::with_active(left, right);
    }

    /// Escape hatch used by scripted sequences: overwrite both hand states
    /// directly. The next equip/unequip recomputes from equipment again.
    pub fn override_overlay_states(&mut self, left_hand: OverlayKind, right_hand: OverlayKind) {
        self.overlay = OverlayState::with_active(left_hand, right_hand);
    }

    // ------------------------------------------------------------------
    // Two-hand stance
    // ------------------------------------------------------------------

    /// Toggles two-hand stance for a hand.
    ///
    /// Engaging re-classifies the hand as TwoHanded and unwields (hides,
    /// never unequips) the opposite hand's active weapon; disengaging
    /// reverts the hand via recompute and re-wields the opposite weapon.
    /// Engaging an empty hand is a caller-contract violation and no-ops.
    pub fn adjust_for_two_hand_stance(&mut self, hand: Hand) {
        let flag = StanceFlags::for_hand(hand);

        if self.stance.contains(flag) {
            self.stance.remove(flag);
            self.recompute_overlay();
            if let Some(slot) = self.active_weapon_slot(hand.opposite()) {
                self.wield_slot(&slot);
            }
            self.on_stance_changed
                .broadcast(&StanceEvent {
                    hand,
                    engaged: false,
                });
        } else {
            if self.active_weapon_slot(hand).is_none() {
                return;
            }
            self.stance.insert(flag);
            self.recompute_overlay();
            if let Some(slot) = self.active_weapon_slot(hand.opposite()) {
                self.unwield_slot(&slot);
            }
            self.on_stance_changed
                .broadcast(&StanceEvent {
                    hand,
                    engaged: true,
                });
        }
    }

    /// Drops a stance whose hand no longer holds a weapon, re-revealing the
    /// opposite hand. Runs after every unequip.
    fn release_stale_stances(&mut self) {
        for hand in [Hand::Left, Hand::Right] {
            let flag = StanceFlags::for_hand(hand);
            if self.stance.contains(flag) && self.active_weapon_slot(hand).is_none() {
                self.stance.remove(flag);
                self.recompute_overlay();
                if let Some(slot) = self.active_weapon_slot(hand.opposite()) {
                    self.wield_slot(&slot);
                }
                self.on_stance_changed
                    .broadcast(&StanceEvent {
                        hand,
                        engaged: false,
                    });
            }
        }
    }

    // ------------------------------------------------------------------
    // Wield / unwield (visibility only)
    // ------------------------------------------------------------------

    /// Re-reveals a hidden slot's item.
    pub fn wield_slot(&mut self, slot: &ActionTag) {
        self.hidden.remove(slot);
    }

    /// Hides a slot's item without touching the equipped map.
    pub fn unwield_slot(&mut self, slot: &ActionTag) {
        if self.equipped.contains_key(slot) {
            self.hidden.insert(slot.clone());
        }
    }

    pub fn is_slot_wielded(&self, slot: &ActionTag) -> bool {
        self.equipped.contains_key(slot) && !self.hidden.contains(slot)
    }

    // ------------------------------------------------------------------
    // Guard
    // ------------------------------------------------------------------

    /// Re-derives the active guard sequence from equipment: the left hand's
    /// active item wins (shields live there), else the right hand's.
    fn refresh_active_guard_sequence(&mut self) {
        self.active_guard = None;
        for hand in [Hand::Left, Hand::Right] {
            if let Some(slot) = self.active_weapon_slot(hand)
                && let Some(entry) = self.equipped.get(&slot)
                && let Some(guard) = &entry.guard
            {
                self.active_guard = Some(guard.clone());
                return;
            }
        }
    }

    pub fn does_equipment_support_guard(&self) -> bool {
        self.active_guard.is_some()
    }

    pub fn active_guard(&self) -> Option<&GuardData> {
        self.active_guard.as_ref()
    }

    // ------------------------------------------------------------------
    // Save snapshots
    // ------------------------------------------------------------------

    /// Captures the persistent equipment state in slot-table order.
    pub fn snapshot(&self) -> EquipmentSnapshot {
        let entries = self
            .slot_table
            .slots()
            .iter()
            .filter_map(|slot| {
                self.equipped.get(&slot.tag).map(|entry| SnapshotEntry {
                    slot: slot.tag.clone(),
                    item: entry.item,
                    stats_applied: entry.stats_applied,
                })
            })
            .collect();
        // Slot-table order keeps snapshots byte-stable across runs.
        let hidden = self
            .slot_table
            .slots()
            .iter()
            .map(|slot| &slot.tag)
            .filter(|slot| self.hidden.contains(*slot))
            .cloned()
            .collect();
        EquipmentSnapshot {
            entries,
            stance: self.stance,
            hidden,
            active_tool_slot: self.active_tool_slot.clone(),
        }
    }

    /// Rebuilds equipment from a snapshot through the normal equip
    /// transactions, then restores stance, visibility, and the tool wheel.
    /// Entries whose item is missing from the catalog are skipped.
    pub fn restore(
        &mut self,
        snapshot: &EquipmentSnapshot,
        items: &dyn ItemOracle,
        stats: &mut StatSheet,
    ) {
        let occupied: Vec<ActionTag> = self.equipped.keys().cloned().collect();
        for slot in occupied {
            self.unequip_from_slot(&slot, stats);
        }
        self.stance = StanceFlags::empty();
        self.hidden.clear();

        for entry in &snapshot.entries {
            if let Some(definition) = items.definition(entry.item) {
                self.equip_to_slot(&definition, entry.slot.clone(), entry.stats_applied, stats);
            }
        }

        self.stance = snapshot.stance;
        self.hidden = snapshot.hidden.iter().cloned().collect();
        self.active_tool_slot = snapshot.active_tool_slot.clone();
        self.recompute_overlay();
        self.refresh_active_guard_sequence();
    }

    fn overlay_tags_mut_for<'a>(
        left: &'a mut OverlayTags,
        right: &'a mut OverlayTags,
        hand: HandCategory,
    ) -> Option<&'a mut OverlayTags> {
        match hand {
            HandCategory::Left => Some(left),
            HandCategory::Right => Some(right),
            HandCategory::Tool => None,
        }
    }
}

/// Persistent slice of [`EquipmentManager`] state for save files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentSnapshot {
    pub entries: Vec<SnapshotEntry>,
    pub stance: StanceFlags,
    pub hidden: Vec<ActionTag>,
    pub active_tool_slot: Option<ActionTag>,
}

/// One occupied slot in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotEntry {
    pub slot: ActionTag,
    pub item: ItemHandle,
    pub stats_applied: bool,
}
