//! # Listener registry: the untyped dispatch core.
//!
//! [`Registry`] keeps, per event name, the ordered sequence of listener entries.
//! It knows nothing about argument types: each entry stores its [`Listener`]
//! type-erased, and the typed emitter downcasts on the way out.
//!
//! ## Rules
//! - **Name order**: names are kept in insertion order of their first live
//!   entry. A name whose sequence becomes empty is dropped; registering again
//!   appends it at the end.
//! - **Entry order**: append for `on`/`once`, prepend for the `prepend_*` family.
//! - **Removal by handle**: the first entry whose listener identity matches.
//! - **Soft cap**: when a sequence grows past `max_listeners` (0 = unlimited) the
//!   registration succeeds and a [`MaxListenersExceeded`] is returned once per
//!   name, until that name's sequence is cleared.
//!
//! Removal methods hand the removed entries back so the caller can drop them
//! after releasing its lock (a listener's captured state may itself touch the emitter).

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;

use super::listener::{Listener, ListenerId};
use crate::error::MaxListenersExceeded;

/// One registration.
#[derive(Clone)]
pub(crate) struct Entry {
    /// Unique per registration, even for the same listener registered twice.
    pub(crate) seq: u64,
    pub(crate) id: ListenerId,
    pub(crate) once: bool,
    /// Set by the emission that consumes a one-shot entry.
    fired: Arc<AtomicBool>,
    /// A `Listener<A>` for the event's `A`.
    callable: Arc<dyn Any + Send + Sync>,
}

impl Entry {
    fn new<A: 'static>(seq: u64, listener: Listener<A>, once: bool) -> Self {
        Self {
            seq,
            id: listener.id(),
            once,
            fired: Arc::new(AtomicBool::new(false)),
            callable: Arc::new(listener),
        }
    }

    /// Returns the typed listener, or `None` if `A` is not the type it was registered with.
    pub(crate) fn listener<A: 'static>(&self) -> Option<&Listener<A>> {
        self.callable.downcast_ref::<Listener<A>>()
    }

    /// Claims the single firing of a one-shot entry. Persistent entries always succeed.
    pub(crate) fn claim(&self) -> bool {
        !self.once || !self.fired.swap(true, Ordering::AcqRel)
    }
}

#[derive(Default)]
struct Slot {
    entries: Vec<Entry>,
    warned: bool,
}

/// Ordered per-name listener sequences.
pub(crate) struct Registry {
    slots: IndexMap<&'static str, Slot>,
    max_listeners: usize,
    next_seq: u64,
}

/// Result of adding an entry.
#[derive(Debug)]
pub(crate) struct Added {
    pub(crate) seq: u64,
    pub(crate) warning: Option<MaxListenersExceeded>,
}

impl Registry {
    pub(crate) fn new(max_listeners: usize) -> Self {
        Self {
            slots: IndexMap::new(),
            max_listeners,
            next_seq: 0,
        }
    }

    pub(crate) fn max_listeners(&self) -> usize {
        self.max_listeners
    }

    pub(crate) fn set_max_listeners(&mut self, n: usize) {
        self.max_listeners = n;
    }

    /// Adds an entry at the back (or front when `prepend`).
    pub(crate) fn add<A: 'static>(
        &mut self,
        event: &'static str,
        listener: Listener<A>,
        once: bool,
        prepend: bool,
    ) -> Added {
        self.next_seq += 1;
        let seq = self.next_seq;
        let entry = Entry::new(seq, listener, once);

        let slot = self.slots.entry(event).or_default();
        if prepend {
            slot.entries.insert(0, entry);
        } else {
            slot.entries.push(entry);
        }

        let count = slot.entries.len();
        let limit = self.max_listeners;
        let warning = if limit > 0 && count > limit && !slot.warned {
            slot.warned = true;
            Some(MaxListenersExceeded { event, count, limit })
        } else {
            None
        };

        Added { seq, warning }
    }

    /// Removes the first entry registered with listener `id`.
    pub(crate) fn remove(&mut self, event: &str, id: ListenerId) -> Option<Entry> {
        self.remove_where(event, |e| e.id == id)
    }

    /// Removes the entry created by registration `seq`.
    pub(crate) fn remove_seq(&mut self, event: &str, seq: u64) -> Option<Entry> {
        self.remove_where(event, |e| e.seq == seq)
    }

    fn remove_where(&mut self, event: &str, pred: impl Fn(&Entry) -> bool) -> Option<Entry> {
        let slot = self.slots.get_mut(event)?;
        let pos = slot.entries.iter().position(pred)?;
        let removed = slot.entries.remove(pos);
        if slot.entries.is_empty() {
            self.slots.shift_remove(event);
        }
        Some(removed)
    }

    /// Clears one name's sequence, or every sequence when `event` is `None`.
    pub(crate) fn remove_all(&mut self, event: Option<&str>) -> Vec<Entry> {
        match event {
            Some(name) => self
                .slots
                .shift_remove(name)
                .map(|slot| slot.entries)
                .unwrap_or_default(),
            None => self
                .slots
                .drain(..)
                .flat_map(|(_, slot)| slot.entries)
                .collect(),
        }
    }

    /// Copy of the entries for `event`, in firing order.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<Entry> {
        self.slots
            .get(event)
            .map(|slot| slot.entries.clone())
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.slots.get(event).map(|slot| slot.entries.len()).unwrap_or(0)
    }

    /// Names with at least one entry, in first-registration order.
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.slots.keys().copied().collect()
    }

    pub(crate) fn total(&self) -> usize {
        self.slots.values().map(|slot| slot.entries.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener<()> {
        Listener::new(|_: &()| {})
    }

    fn ids(reg: &Registry, event: &str) -> Vec<ListenerId> {
        reg.snapshot(event).iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_add_and_remove() {
        let mut reg = Registry::new(10);
        let a = noop();
        let b = noop();

        reg.add("test", a.clone(), false, false);
        reg.add("test", b.clone(), false, false);
        assert_eq!(reg.count("test"), 2);
        assert_eq!(ids(&reg, "test"), vec![a.id(), b.id()]);

        assert!(reg.remove("test", a.id()).is_some());
        assert_eq!(ids(&reg, "test"), vec![b.id()]);
        assert!(reg.remove("test", a.id()).is_none());
    }

    #[test]
    fn test_prepend() {
        let mut reg = Registry::new(10);
        let a = noop();
        let b = noop();

        reg.add("test", a.clone(), false, false);
        reg.add("test", b.clone(), true, true);

        let snap = reg.snapshot("test");
        assert_eq!(snap[0].id, b.id());
        assert!(snap[0].once);
        assert_eq!(snap[1].id, a.id());
    }

    #[test]
    fn test_remove_takes_first_duplicate() {
        let mut reg = Registry::new(10);
        let a = noop();

        let first = reg.add("test", a.clone(), false, false).seq;
        let second = reg.add("test", a.clone(), false, false).seq;
        assert_ne!(first, second);

        let removed = reg.remove("test", a.id()).expect("entry present");
        assert_eq!(removed.seq, first);
        assert_eq!(reg.count("test"), 1);
    }

    #[test]
    fn test_names_follow_first_registration() {
        let mut reg = Registry::new(10);
        reg.add("b", noop(), false, false);
        reg.add("a", noop(), false, false);
        reg.add("b", noop(), false, false);
        assert_eq!(reg.names(), vec!["b", "a"]);

        reg.remove_all(Some("b"));
        assert_eq!(reg.names(), vec!["a"]);

        reg.add("b", noop(), false, false);
        assert_eq!(reg.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_emptied_sequence_drops_name() {
        let mut reg = Registry::new(10);
        let a = noop();
        reg.add("x", a.clone(), false, false);
        reg.remove("x", a.id());
        assert!(reg.names().is_empty());
        assert_eq!(reg.count("x"), 0);
    }

    #[test]
    fn test_remove_all() {
        let mut reg = Registry::new(10);
        reg.add("event1", noop(), false, false);
        reg.add("event1", noop(), false, false);
        reg.add("event2", noop(), false, false);

        let removed = reg.remove_all(Some("event1"));
        assert_eq!(removed.len(), 2);
        assert_eq!(reg.count("event1"), 0);
        assert_eq!(reg.count("event2"), 1);

        let removed = reg.remove_all(None);
        assert_eq!(removed.len(), 1);
        assert!(reg.names().is_empty());
        assert_eq!(reg.total(), 0);
    }

    #[test]
    fn test_max_listeners_warns_once() {
        let mut reg = Registry::new(2);

        assert!(reg.add("test", noop(), false, false).warning.is_none());
        assert!(reg.add("test", noop(), false, false).warning.is_none());

        let warning = reg
            .add("test", noop(), false, false)
            .warning
            .expect("third listener crosses the cap");
        assert_eq!(warning.event, "test");
        assert_eq!(warning.count, 3);
        assert_eq!(warning.limit, 2);

        assert!(reg.add("test", noop(), false, false).warning.is_none());
        assert_eq!(reg.count("test"), 4);
    }

    #[test]
    fn test_warning_rearms_after_clear() {
        let mut reg = Registry::new(1);
        reg.add("test", noop(), false, false);
        assert!(reg.add("test", noop(), false, false).warning.is_some());

        reg.remove_all(Some("test"));
        reg.add("test", noop(), false, false);
        assert!(reg.add("test", noop(), false, false).warning.is_some());
    }

    #[test]
    fn test_zero_means_unlimited() {
        let mut reg = Registry::new(0);
        for _ in 0..50 {
            assert!(reg.add("test", noop(), false, false).warning.is_none());
        }
    }

    #[test]
    fn test_claim_once_entry_only_once() {
        let mut reg = Registry::new(10);
        reg.add("test", noop(), true, false);
        reg.add("test", noop(), false, false);

        let snap = reg.snapshot("test");
        let again = reg.snapshot("test");
        assert!(snap[0].claim());
        assert!(!again[0].claim());
        assert!(snap[1].claim());
        assert!(again[1].claim());
    }

    #[test]
    fn test_downcast_checks_type() {
        let mut reg = Registry::new(10);
        reg.add("test", Listener::new(|_: &u8| {}), false, false);

        let snap = reg.snapshot("test");
        assert!(snap[0].listener::<u8>().is_some());
        assert!(snap[0].listener::<String>().is_none());
    }
}
