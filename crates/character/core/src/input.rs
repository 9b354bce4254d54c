//! Action input buffering.
//!
//! The buffer gates when a requested action becomes externally observable.
//! The animation layer opens a buffering window during combo frames via
//! [`InputBuffer::toggle_buffer`]; while the window is open, queued actions
//! are parked and re-evaluated once per scheduler tick until the window
//! closes or the action lands on the ignore list. Consumption is a single
//! fire-and-forget broadcast carrying the action tag; the action dispatcher
//! subscribes and takes it from there.
//!
//! Capacity is exactly one pending action. A second queue while one is
//! parked overwrites the first (last-writer-wins); this is deliberate, the
//! newest player intent always wins.

use crate::events::Dispatcher;
use crate::tag::{ActionTag, TagSet};

/// Per-character action buffer.
///
/// Owned exclusively by one character; all operations are infallible. The
/// embedding layer must call [`InputBuffer::tick`] once per frame and
/// [`InputBuffer::cancel_pending`] when the owner is torn down so no parked
/// retry outlives it.
#[derive(Debug, Default)]
pub struct InputBuffer {
    /// The incoming action; reset to `None` after every consumption.
    pending: Option<ActionTag>,
    /// Whether a buffering window is currently open.
    open: bool,
    /// Actions that, while the buffer is open, are dropped instead of
    /// retried (e.g. sprint re-triggers while already sprinting).
    ignore_next: TagSet,
    /// Action parked for re-evaluation on the next tick.
    retry: Option<ActionTag>,
    on_consumed: Dispatcher<ActionTag>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a consumed-action listener (typically the action
    /// dispatcher). Fire-and-forget: no acknowledgment, no return value.
    pub fn on_consumed(&mut self, listener: impl FnMut(&ActionTag) + 'static) {
        self.on_consumed.subscribe(listener);
    }

    /// Opens or closes the buffering window. No side effects beyond the
    /// flag; a parked retry notices the change on its next tick.
    pub fn toggle_buffer(&mut self, open: bool) {
        self.open = open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The action currently awaiting consumption, if any.
    pub fn pending(&self) -> Option<&ActionTag> {
        self.pending.as_ref()
    }

    /// Whether an action is parked waiting for the buffer to close.
    pub fn has_pending_retry(&self) -> bool {
        self.retry.is_some()
    }

    /// Queues an action. Consumed immediately when the buffer is closed;
    /// otherwise handed to the retry path, which polls until the buffer
    /// closes.
    pub fn queue_action(&mut self, tag: ActionTag) {
        self.pending = Some(tag.clone());
        if self.open {
            self.retry_when_closed(tag);
        } else {
            self.consume();
        }
    }

    /// Bypasses the open/closed check entirely and consumes at once. Used
    /// for actions that must never be delayed (movement toggles,
    /// UI-adjacent actions).
    pub fn execute_immediately(&mut self, tag: ActionTag) {
        self.pending = Some(tag);
        self.consume();
    }

    /// One cooperative poll. Re-evaluates the parked action, if any; called
    /// once per frame by the scheduler.
    pub fn tick(&mut self) {
        if let Some(tag) = self.retry.take() {
            self.retry_when_closed(tag);
        }
    }

    /// Clears any parked retry and pending action. The host must call this
    /// during owner teardown so a stale re-schedule never touches a dead
    /// character.
    pub fn cancel_pending(&mut self) {
        self.retry = None;
        self.pending = None;
    }

    /// While the buffer is open, the next occurrence of `tag` (or any of its
    /// descendants) is silently dropped instead of retried.
    pub fn ignore_next_of(&mut self, tag: ActionTag) {
        self.ignore_next.insert(tag);
    }

    /// Removes a tag from the ignore list.
    pub fn allow_next_of(&mut self, tag: &ActionTag) {
        self.ignore_next.remove(tag);
    }

    /// The retry primitive. Ignore-listed tags are swallowed (a designed
    /// suppression path, not an error) and the pending slot is cleared, so
    /// a suppressed tag never lingers as the reported pending action;
    /// otherwise the tag is either parked for the next tick or consumed now
    /// that the buffer has closed.
    fn retry_when_closed(&mut self, tag: ActionTag) {
        if self.ignore_next.has_tag(&tag) {
            if self.pending.as_ref() == Some(&tag) {
                self.pending = None;
            }
            return;
        }
        if self.open {
            self.retry = Some(tag);
        } else {
            self.pending = Some(tag);
            self.consume();
        }
    }

    /// The single path that broadcasts consumption, then resets the pending
    /// action.
    fn consume(&mut self) {
        if let Some(tag) = self.pending.take() {
            self.on_consumed.broadcast(&tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::vocab;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_buffer() -> (InputBuffer, Rc<RefCell<Vec<ActionTag>>>) {
        let consumed = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = InputBuffer::new();
        let sink = Rc::clone(&consumed);
        buffer.on_consumed(move |tag| sink.borrow_mut().push(tag.clone()));
        (buffer, consumed)
    }

    #[test]
    fn execute_immediately_bypasses_open_buffer() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);

        buffer.execute_immediately(vocab::ACTION_DODGE);

        assert_eq!(*consumed.borrow(), vec![vocab::ACTION_DODGE]);
        assert!(buffer.pending().is_none());
    }

    #[test]
    fn queue_consumes_synchronously_while_closed() {
        let (mut buffer, consumed) = recording_buffer();

        buffer.queue_action(vocab::ACTION_ATTACK_LIGHT);

        assert_eq!(*consumed.borrow(), vec![vocab::ACTION_ATTACK_LIGHT]);
        assert!(buffer.pending().is_none());
        assert!(!buffer.has_pending_retry());
    }

    #[test]
    fn queued_action_waits_until_buffer_closes() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);

        buffer.queue_action(vocab::ACTION_ATTACK_HEAVY);
        assert!(consumed.borrow().is_empty());

        // Stays parked for as long as the window is open.
        buffer.tick();
        buffer.tick();
        assert!(consumed.borrow().is_empty());
        assert!(buffer.has_pending_retry());

        buffer.toggle_buffer(false);
        buffer.tick();

        assert_eq!(*consumed.borrow(), vec![vocab::ACTION_ATTACK_HEAVY]);
        assert!(!buffer.has_pending_retry());
        assert!(buffer.pending().is_none());
    }

    #[test]
    fn last_writer_wins_while_open() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);

        buffer.queue_action(vocab::ACTION_ATTACK_LIGHT);
        buffer.queue_action(vocab::ACTION_DODGE);

        buffer.toggle_buffer(false);
        buffer.tick();

        assert_eq!(*consumed.borrow(), vec![vocab::ACTION_DODGE]);
    }

    #[test]
    fn ignore_listed_action_is_swallowed() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);
        buffer.ignore_next_of(vocab::ACTION_SPRINT);

        buffer.queue_action(vocab::ACTION_SPRINT);
        assert!(!buffer.has_pending_retry());
        assert!(buffer.pending().is_none());

        buffer.toggle_buffer(false);
        buffer.tick();
        assert!(consumed.borrow().is_empty());
    }

    #[test]
    fn ignore_list_added_mid_flight_kills_the_retry() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);

        buffer.queue_action(vocab::ACTION_SPRINT);
        assert!(buffer.has_pending_retry());

        buffer.ignore_next_of(vocab::ACTION_SPRINT);
        buffer.tick();
        assert!(!buffer.has_pending_retry());
        assert!(buffer.pending().is_none());

        buffer.toggle_buffer(false);
        buffer.tick();
        assert!(consumed.borrow().is_empty());
    }

    #[test]
    fn ignore_list_matches_descendant_tags() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);
        buffer.ignore_next_of(vocab::ACTION_ATTACK);

        buffer.queue_action(vocab::ACTION_ATTACK_HEAVY);

        buffer.toggle_buffer(false);
        buffer.tick();
        assert!(consumed.borrow().is_empty());
    }

    #[test]
    fn allow_next_of_reinstates_a_tag() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);
        buffer.ignore_next_of(vocab::ACTION_SPRINT);
        buffer.allow_next_of(&vocab::ACTION_SPRINT);

        buffer.queue_action(vocab::ACTION_SPRINT);
        buffer.toggle_buffer(false);
        buffer.tick();

        assert_eq!(*consumed.borrow(), vec![vocab::ACTION_SPRINT]);
    }

    #[test]
    fn cancel_pending_drops_the_parked_action() {
        let (mut buffer, consumed) = recording_buffer();
        buffer.toggle_buffer(true);
        buffer.queue_action(vocab::ACTION_DODGE);

        buffer.cancel_pending();
        buffer.toggle_buffer(false);
        buffer.tick();

        assert!(consumed.borrow().is_empty());
        assert!(buffer.pending().is_none());
    }

    #[test]
    fn every_consumption_resets_pending() {
        let (mut buffer, consumed) = recording_buffer();

        buffer.queue_action(vocab::ACTION_DODGE);
        buffer.execute_immediately(vocab::ACTION_JUMP);

        assert_eq!(
            *consumed.borrow(),
            vec![vocab::ACTION_DODGE, vocab::ACTION_JUMP]
        );
        assert!(buffer.pending().is_none());
    }
}
