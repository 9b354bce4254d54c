//! Event types and topic-based routing.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{EquipmentEvent, InputEvent};
