//! Overlay classification derived from equipped items.
//!
//! Each hand accumulates the overlay-category tags of its occupied slots in
//! a counted multiset; the multiset is a cache, always rebuilt in lockstep
//! with the equipped-item map and never the source of truth. Resolution is a
//! fixed-order sequential overwrite, not a max-priority table: later
//! categories win ties, so a hand holding both a OneHanded and a TwoHanded
//! contribution resolves TwoHanded, and Shield always loses to TwoHanded.
//! Downstream animation logic depends on exactly this tie-break.

use crate::equipment::slots::Hand;
use crate::tag::{ActionTag, vocab};

/// Per-hand (and overall) animation overlay classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlayKind {
    #[default]
    Unarmed,
    OneHanded,
    Shield,
    TwoHanded,
    DualWield,
}

/// Read-only projection consumed by the animation layer once per update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayState {
    pub left_hand: OverlayKind,
    pub right_hand: OverlayKind,
    /// Right hand when armed, else left hand, else unarmed.
    pub active: OverlayKind,
}

impl OverlayState {
    /// Applies the fixed right-hand-priority rule to pick the overall state.
    pub(crate) fn with_active(left_hand: OverlayKind, right_hand: OverlayKind) -> Self {
        let active = if right_hand != OverlayKind::Unarmed {
            right_hand
        } else {
            left_hand
        };
        Self {
            left_hand,
            right_hand,
            active,
        }
    }
}

bitflags::bitflags! {
    /// Which hands are currently in two-hand stance.
    ///
    /// Independent of the derived overlay projection but folded into its
    /// recomputation while set, so repeated toggles invert cleanly.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StanceFlags: u8 {
        const LEFT_TWO_HANDED = 1 << 0;
        const RIGHT_TWO_HANDED = 1 << 1;
    }
}

impl StanceFlags {
    pub fn for_hand(hand: Hand) -> StanceFlags {
        match hand {
            Hand::Left => StanceFlags::LEFT_TWO_HANDED,
            Hand::Right => StanceFlags::RIGHT_TWO_HANDED,
        }
    }
}

/// Counted multiset of overlay-category tags for one hand.
///
/// Counts matter: two one-handed weapons on the same hand contribute the tag
/// twice, and unequipping one must not erase the other's contribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayTags {
    counts: Vec<(ActionTag, u32)>,
}

impl OverlayTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: ActionTag) {
        if let Some(entry) = self.counts.iter_mut().find(|(t, _)| *t == tag) {
            entry.1 += 1;
        } else {
            self.counts.push((tag, 1));
        }
    }

    /// Removes one contribution of `tag`. Returns false if absent.
    pub fn remove(&mut self, tag: &ActionTag) -> bool {
        let Some(index) = self.counts.iter().position(|(t, _)| t == tag) else {
            return false;
        };
        let entry = &mut self.counts[index];
        entry.1 -= 1;
        if entry.1 == 0 {
            self.counts.remove(index);
        }
        true
    }

    pub fn contains(&self, tag: &ActionTag) -> bool {
        self.counts.iter().any(|(t, _)| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// Resolves one hand's overlay from its tag multiset.
///
/// Sequential overwrite in the fixed order OneHanded, Shield, TwoHanded.
/// Dual-wield and stance adjustments layer on top in the manager's full
/// recompute.
pub(crate) fn resolve_hand(tags: &OverlayTags) -> OverlayKind {
    let mut state = OverlayKind::Unarmed;
    if tags.contains(&vocab::OVERLAY_ONE_HANDED) {
        state = OverlayKind::OneHanded;
    }
    if tags.contains(&vocab::OVERLAY_SHIELD) {
        state = OverlayKind::Shield;
    }
    if tags.contains(&vocab::OVERLAY_TWO_HANDED) {
        state = OverlayKind::TwoHanded;
    }
    state
}
