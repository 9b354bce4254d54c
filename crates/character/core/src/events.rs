//! Multicast event dispatch.
//!
//! Gameplay components notify their consumers through fire-and-forget
//! broadcasts: no acknowledgment, no return value, zero or more listeners.
//! This is a plain observer list rather than a channel because the core is
//! single-threaded and listeners run synchronously inside the broadcasting
//! transaction.

use std::fmt;

/// An ordered list of listeners invoked on every broadcast.
pub struct Dispatcher<T> {
    listeners: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Dispatcher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Registers a listener. Listeners cannot be removed; they live as long
    /// as the owning component.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Invokes every listener in registration order.
    pub fn broadcast(&mut self, event: &T) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn broadcast_reaches_every_listener_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();

        for index in 0..3 {
            let seen = Rc::clone(&seen);
            dispatcher.subscribe(move |value: &u32| seen.borrow_mut().push((index, *value)));
        }

        dispatcher.broadcast(&7);
        assert_eq!(*seen.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn broadcast_without_listeners_is_a_no_op() {
        let mut dispatcher: Dispatcher<u32> = Dispatcher::new();
        dispatcher.broadcast(&1);
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
