//! Transition lifecycle callbacks.
//!
//! A transition holds exactly one handler per event kind. Registering a
//! handler for a kind that already has one replaces it; this is not a
//! multi-subscriber bus.
//!
//! # Usage
//!
//! ```
//! use glide_motion::events::{EventKind, EventSlots, Handler};
//!
//! let mut slots = EventSlots::default();
//! slots.set(Handler::change(|progress| println!("progress {progress:.2}")));
//! slots.set(Handler::ended(|| println!("done")));
//! assert!(slots.has(EventKind::Change));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Called once per frame with the eased progress.
pub type ChangeHandler = Box<dyn FnMut(f64)>;

/// Called once when a non-looping run completes.
pub type EndedHandler = Box<dyn FnMut()>;

/// The kinds of event a transition emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A frame computed new progress.
    Change,
    /// A run completed.
    Ended,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Change => f.write_str("change"),
            Self::Ended => f.write_str("ended"),
        }
    }
}

/// A handler tagged with the event it listens to.
pub enum Handler {
    /// Handler for [`EventKind::Change`].
    Change(ChangeHandler),
    /// Handler for [`EventKind::Ended`].
    Ended(EndedHandler),
}

impl Handler {
    /// Wrap a progress callback.
    pub fn change<F>(f: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        Self::Change(Box::new(f))
    }

    /// Wrap a completion callback.
    pub fn ended<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::Ended(Box::new(f))
    }

    /// The event this handler listens to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Change(_) => EventKind::Change,
            Self::Ended(_) => EventKind::Ended,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({})", self.kind())
    }
}

/// One slot per event kind.
#[derive(Default)]
pub struct EventSlots {
    change: Option<ChangeHandler>,
    ended: Option<EndedHandler>,
}

impl EventSlots {
    /// Install a handler, returning `true` if it replaced an earlier one.
    pub fn set(&mut self, handler: Handler) -> bool {
        match handler {
            Handler::Change(f) => self.change.replace(f).is_some(),
            Handler::Ended(f) => self.ended.replace(f).is_some(),
        }
    }

    /// Whether a handler is installed for `kind`.
    pub fn has(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Change => self.change.is_some(),
            EventKind::Ended => self.ended.is_some(),
        }
    }

    pub fn emit_change(&mut self, progress: f64) {
        if let Some(f) = self.change.as_mut() {
            f(progress);
        }
    }

    pub fn emit_ended(&mut self) {
        if let Some(f) = self.ended.as_mut() {
            f();
        }
    }
}

impl fmt::Debug for EventSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSlots")
            .field("change", &self.change.is_some())
            .field("ended", &self.ended.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_last_registration_wins() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut slots = EventSlots::default();

        let first = Rc::clone(&seen);
        assert!(!slots.set(Handler::change(move |p| first.borrow_mut().push(("first", p)))));
        let second = Rc::clone(&seen);
        assert!(slots.set(Handler::change(move |p| second.borrow_mut().push(("second", p)))));

        slots.emit_change(0.5);
        assert_eq!(*seen.borrow(), vec![("second", 0.5)]);
    }

    #[test]
    fn test_kinds_are_independent() {
        let ended = Rc::new(RefCell::new(0));
        let mut slots = EventSlots::default();
        let counter = Rc::clone(&ended);
        slots.set(Handler::ended(move || *counter.borrow_mut() += 1));

        assert!(slots.has(EventKind::Ended));
        assert!(!slots.has(EventKind::Change));

        // No change handler installed: emitting is a no-op.
        slots.emit_change(1.0);
        slots.emit_ended();
        assert_eq!(*ended.borrow(), 1);
    }

    #[test]
    fn test_handler_kind_and_display() {
        assert_eq!(Handler::change(|_| {}).kind(), EventKind::Change);
        assert_eq!(Handler::ended(|| {}).kind(), EventKind::Ended);
        assert_eq!(EventKind::Ended.to_string(), "ended");
        assert_eq!(format!("{:?}", Handler::change(|_| {})), "Handler(change)");
    }
}
