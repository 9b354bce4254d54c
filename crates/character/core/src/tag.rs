//! Hierarchical gameplay tags.
//!
//! Tags are the shared vocabulary for actions, equipment slots, and overlay
//! categories. A tag is an immutable dot-separated path ("Action.Dodge",
//! "Equipment.SlotType.RightHandWeapon1"); equality is structural and a child
//! tag matches its ancestors. The fixed vocabulary lives in [`vocab`] as
//! consts; data loaders may mint owned tags once at load time, but tags are
//! never constructed from untrusted input.

use std::borrow::Cow;
use std::fmt;

/// An immutable, hierarchical, dot-separated identifier.
///
/// Vocabulary tags are `const` and borrow static storage; tags read from data
/// files own their string. Both compare structurally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionTag(Cow<'static, str>);

impl ActionTag {
    /// Creates a tag from the fixed vocabulary.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates an owned tag, used by data loaders at startup.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the full dot-separated path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Structural equality ("is exactly").
    pub fn matches_exact(&self, other: &ActionTag) -> bool {
        self == other
    }

    /// Hierarchical containment ("is-a"): true when `self` equals `ancestor`
    /// or sits below it in the dot hierarchy.
    ///
    /// `"Action.Attack.Light"` matches `"Action.Attack"` and `"Action"`, but
    /// `"Action.AttackSpeed"` does not match `"Action.Attack"`.
    pub fn matches(&self, ancestor: &ActionTag) -> bool {
        let this = self.as_str();
        let that = ancestor.as_str();
        this == that
            || (this.len() > that.len()
                && this.starts_with(that)
                && this.as_bytes()[that.len()] == b'.')
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A small ordered set of tags.
///
/// Membership via [`TagSet::has_tag`] is ancestor-aware: the set "has" a tag
/// when it contains the tag itself or one of the tag's ancestors. This is the
/// semantics the input buffer's ignore list relies on, so that ignoring
/// "Action.Sprint" also suppresses "Action.Sprint.Boost".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagSet {
    tags: Vec<ActionTag>,
}

impl TagSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tag. Returns false if the exact tag was already present.
    pub fn insert(&mut self, tag: ActionTag) -> bool {
        if self.has_tag_exact(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes the exact tag. Returns true if it was present.
    pub fn remove(&mut self, tag: &ActionTag) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    /// Ancestor-aware membership: does the set contain `tag` or one of its
    /// ancestors?
    pub fn has_tag(&self, tag: &ActionTag) -> bool {
        self.tags.iter().any(|member| tag.matches(member))
    }

    /// Structural membership only.
    pub fn has_tag_exact(&self, tag: &ActionTag) -> bool {
        self.tags.iter().any(|member| member == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionTag> {
        self.tags.iter()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl FromIterator<ActionTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = ActionTag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// The fixed tag vocabulary.
///
/// Slot and overlay names mirror the equipment data tables; action names are
/// the identifiers the input buffer broadcasts to the action dispatcher.
pub mod vocab {
    use super::ActionTag;

    // Actions
    pub const ACTION_DODGE: ActionTag = ActionTag::new("Action.Dodge");
    pub const ACTION_SPRINT: ActionTag = ActionTag::new("Action.Sprint");
    pub const ACTION_JUMP: ActionTag = ActionTag::new("Action.Jump");
    pub const ACTION_GUARD: ActionTag = ActionTag::new("Action.Guard");
    pub const ACTION_INTERACT: ActionTag = ActionTag::new("Action.Interact");
    pub const ACTION_USE_TOOL: ActionTag = ActionTag::new("Action.UseTool");
    pub const ACTION_ATTACK: ActionTag = ActionTag::new("Action.Attack");
    pub const ACTION_ATTACK_LIGHT: ActionTag = ActionTag::new("Action.Attack.Light");
    pub const ACTION_ATTACK_HEAVY: ActionTag = ActionTag::new("Action.Attack.Heavy");
    pub const ACTION_TWO_HAND_STANCE: ActionTag = ActionTag::new("Action.TwoHandStance");

    // Equipment slots
    pub const SLOT_RIGHT_WEAPON_1: ActionTag =
        ActionTag::new("Equipment.SlotType.RightHandWeapon1");
    pub const SLOT_RIGHT_WEAPON_2: ActionTag =
        ActionTag::new("Equipment.SlotType.RightHandWeapon2");
    pub const SLOT_RIGHT_WEAPON_3: ActionTag =
        ActionTag::new("Equipment.SlotType.RightHandWeapon3");
    pub const SLOT_LEFT_WEAPON_1: ActionTag = ActionTag::new("Equipment.SlotType.LeftHandWeapon1");
    pub const SLOT_LEFT_WEAPON_2: ActionTag = ActionTag::new("Equipment.SlotType.LeftHandWeapon2");
    pub const SLOT_LEFT_WEAPON_3: ActionTag = ActionTag::new("Equipment.SlotType.LeftHandWeapon3");
    pub const SLOT_TOOL_1: ActionTag = ActionTag::new("Equipment.SlotType.Tool1");
    pub const SLOT_TOOL_2: ActionTag = ActionTag::new("Equipment.SlotType.Tool2");

    // Overlay categories contributed by equipped items
    pub const OVERLAY_ONE_HANDED: ActionTag = ActionTag::new("Item.Overlay.OneHanded");
    pub const OVERLAY_SHIELD: ActionTag = ActionTag::new("Item.Overlay.Shield");
    pub const OVERLAY_TWO_HANDED: ActionTag = ActionTag::new("Item.Overlay.TwoHanded");
}
