//! High-level runtime orchestrator.
//!
//! The runtime owns the spawned characters, drives their per-frame tick, and
//! exposes a builder-based API for clients to wire up content and events.
//! Characters hold non-`Send` listener closures, so the runtime is driven
//! from the task that owns it; events cross task boundaries through the
//! [`EventBus`], never the characters themselves.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace};

use character_content::ContentFactory;
use character_core::{ActionTag, Hand, HandCategory, ItemHandle, ItemOracle, SlotTable};

use crate::character::{Character, CharacterId};
use crate::error::{Result, RuntimeError};
use crate::events::{EquipmentEvent, Event, EventBus, Topic};

/// Runtime configuration shared across the orchestrator and characters.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Frame cadence for [`Runtime::run`].
    pub tick_interval: Duration,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            event_buffer_size: 100,
        }
    }
}

/// Main runtime that orchestrates character simulation.
///
/// Design: the runtime owns characters and coordinates execution; clients
/// observe through [`EventBus`] subscriptions and mutate through the
/// command-style methods here.
pub struct Runtime {
    config: RuntimeConfig,
    bus: EventBus,
    items: Box<dyn ItemOracle>,
    slot_table: SlotTable,
    characters: HashMap<CharacterId, Character>,
    next_character: u64,
    shutdown: watch::Sender<bool>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to the event bus
    pub fn event_bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// Subscribe to a single topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    // ------------------------------------------------------------------
    // Character lifecycle
    // ------------------------------------------------------------------

    /// Spawns a character with the configured slot table.
    pub fn spawn_character(&mut self) -> CharacterId {
        let id = CharacterId(self.next_character);
        self.next_character += 1;

        let character = Character::new(id, self.slot_table.clone(), &self.bus);
        self.characters.insert(id, character);
        info!(%id, "spawned character");
        id
    }

    /// Despawns a character, cancelling any parked input first so nothing
    /// fires after teardown.
    pub fn despawn_character(&mut self, id: CharacterId) -> Result<()> {
        let mut character = self
            .characters
            .remove(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;
        character.cancel_outstanding();
        info!(%id, "despawned character");
        Ok(())
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    // ------------------------------------------------------------------
    // Input commands
    // ------------------------------------------------------------------

    /// Queues an action through the character's input buffer.
    pub fn queue_action(&mut self, id: CharacterId, action: ActionTag) -> Result<()> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;
        debug!(%id, %action, "queueing action");
        character.input.queue_action(action);
        Ok(())
    }

    /// Consumes an action immediately, bypassing the buffering window.
    pub fn execute_immediately(&mut self, id: CharacterId, action: ActionTag) -> Result<()> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;
        debug!(%id, %action, "executing action immediately");
        character.input.execute_immediately(action);
        Ok(())
    }

    /// Opens or closes a character's buffering window.
    pub fn toggle_buffer(&mut self, id: CharacterId, open: bool) -> Result<()> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;
        trace!(%id, open, "toggling input buffer");
        character.input.toggle_buffer(open);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Equipment commands
    // ------------------------------------------------------------------

    /// Equips a catalog item to a slot. Tool slots route through the
    /// exclusive tool path automatically.
    pub fn equip(
        &mut self,
        id: CharacterId,
        item: ItemHandle,
        slot: ActionTag,
        change_stats: bool,
    ) -> Result<()> {
        let definition = self
            .items
            .definition(item)
            .ok_or(RuntimeError::UnknownItem(item))?;
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;

        let before = character.equipment.overlay_state();
        let accepted = match character.equipment.slot_table().hand_of(&slot) {
            None => return Err(RuntimeError::UnknownSlot(slot)),
            Some(HandCategory::Tool) => character.equipment.equip_tool_to_slot(
                &definition,
                slot.clone(),
                change_stats,
                &mut character.stats,
            ),
            Some(_) => character.equipment.equip_to_slot(
                &definition,
                slot.clone(),
                change_stats,
                &mut character.stats,
            ),
        };
        if !accepted {
            return Err(RuntimeError::NotEquippable { item, slot });
        }

        debug!(%id, %slot, item = item.0, "equipped item");
        Self::publish_overlay_if_changed(&self.bus, id, before, character);
        Ok(())
    }

    /// Clears a slot. Returns the removed item, or `None` if the slot was
    /// already empty.
    pub fn unequip(&mut self, id: CharacterId, slot: ActionTag) -> Result<Option<ItemHandle>> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;
        if character.equipment.slot_table().hand_of(&slot).is_none() {
            return Err(RuntimeError::UnknownSlot(slot));
        }

        let before = character.equipment.overlay_state();
        let removed = character.equipment.unequip_from_slot(&slot, &mut character.stats);

        if removed.is_some() {
            debug!(%id, %slot, "unequipped item");
        }
        Self::publish_overlay_if_changed(&self.bus, id, before, character);
        Ok(removed)
    }

    /// Toggles two-hand stance for a hand.
    pub fn toggle_two_hand_stance(&mut self, id: CharacterId, hand: Hand) -> Result<()> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;

        let before = character.equipment.overlay_state();
        character.equipment.adjust_for_two_hand_stance(hand);
        Self::publish_overlay_if_changed(&self.bus, id, before, character);
        Ok(())
    }

    fn publish_overlay_if_changed(
        bus: &EventBus,
        id: CharacterId,
        before: character_core::OverlayState,
        character: &Character,
    ) {
        let state = character.equipment.overlay_state();
        if state != before {
            bus.publish(Event::Equipment(EquipmentEvent::OverlayChanged {
                character: id,
                state,
            }));
        }
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Advances every character by one frame.
    pub fn tick(&mut self) {
        for character in self.characters.values_mut() {
            character.tick();
        }
    }

    /// Drives [`Runtime::tick`] on the configured cadence until shutdown.
    ///
    /// On exit, every character's parked input is cancelled so no retry
    /// outlives the loop.
    pub async fn run(&mut self) {
        let mut shutdown = self.shutdown.subscribe();
        let mut interval = tokio::time::interval(self.config.tick_interval);
        info!(interval_ms = self.config.tick_interval.as_millis() as u64, "runtime loop started");

        loop {
            tokio::select! {
                _ = interval.tick() => self.tick(),
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        for character in self.characters.values_mut() {
            character.cancel_outstanding();
        }
        info!("runtime loop stopped");
    }

    /// Signals the run loop to stop. Callable from any task.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    /// A cloneable handle that can stop the run loop from another task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown.clone())
    }
}

/// Signals runtime shutdown from outside the owning task.
#[derive(Clone)]
pub struct ShutdownHandle(watch::Sender<bool>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        let _ = self.0.send(true);
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    items: Option<Box<dyn ItemOracle>>,
    slot_table: Option<SlotTable>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            items: None,
            slot_table: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the item catalog oracle
    pub fn items(mut self, items: impl ItemOracle + 'static) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Set the equipment slot table (defaults to the standard layout)
    pub fn slot_table(mut self, slot_table: SlotTable) -> Self {
        self.slot_table = Some(slot_table);
        self
    }

    /// Load the item catalog and slot table from a content directory.
    pub fn content_dir(mut self, data_dir: impl AsRef<Path>) -> Result<Self> {
        let factory = ContentFactory::new(data_dir.as_ref());
        self.items = Some(Box::new(factory.load_items()?));
        self.slot_table = Some(factory.load_slot_table()?);
        Ok(self)
    }

    /// Build the runtime. Fails when no item catalog was configured.
    pub fn build(self) -> Result<Runtime> {
        let items = self.items.ok_or(RuntimeError::MissingItems)?;
        let slot_table = self
            .slot_table
            .unwrap_or_else(SlotTable::soulslike_default);
        let (shutdown, _) = watch::channel(false);

        Ok(Runtime {
            bus: EventBus::with_capacity(self.config.event_buffer_size),
            config: self.config,
            items,
            slot_table,
            characters: HashMap::new(),
            next_character: 0,
            shutdown,
        })
    }
}
