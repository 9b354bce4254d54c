//! Runtime orchestration for character simulation.
//!
//! This crate wires the pure character-core components (input buffering,
//! equipment resolution, stats) to content loading, frame scheduling, and a
//! topic-based event bus. Consumers embed [`Runtime`] to spawn characters,
//! drive their per-frame tick, and subscribe to gameplay events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`character`] bundles one character's components and bus forwarding
//! - [`events`] provides the topic-based event bus for flexible routing
//! - [`error`] carries the unified error surface

pub mod character;
pub mod error;
pub mod events;
pub mod runtime;

pub use character::{Character, CharacterId};
pub use error::{Result, RuntimeError};
pub use events::{EquipmentEvent, Event, EventBus, InputEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, ShutdownHandle};
