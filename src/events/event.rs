//! # Event maps and the events they declare.
//!
//! An event map is a marker type implementing [`EventMap`]. Each event it allows
//! is another marker type implementing [`Event`] with `Map` pointing back at the
//! map. The emitter is generic over the map and each method is generic over the
//! event, so:
//! - an event belonging to another map does not type-check;
//! - a handler or argument whose type differs from [`Event::Args`] does not type-check.
//!
//! Nothing here exists at runtime except the `&'static str` names.
//!
//! ## Example
//! ```rust
//! use typed_emitter::{Event, EventMap, EventName};
//!
//! struct Sensor;
//! impl EventMap for Sensor {
//!     const NAMES: &'static [&'static str] = &["reading"];
//! }
//!
//! struct Reading;
//! impl Event for Reading {
//!     type Map = Sensor;
//!     type Args = (u32, f64);
//!     const NAME: &'static str = "reading";
//! }
//!
//! let name: EventName<Sensor> = Reading::event_name();
//! assert_eq!(name, "reading");
//! ```
//!
//! The [`event_map!`](crate::event_map) macro writes these impls for you.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::emitter::EventSource;
use crate::listeners::Listener;

/// A closed set of events an emitter accepts.
pub trait EventMap: 'static {
    /// Names of every event declared for this map. Must be unique.
    const NAMES: &'static [&'static str];
}

/// One event of an [`EventMap`].
pub trait Event: 'static {
    /// The map this event belongs to.
    type Map: EventMap;

    /// Handler parameter list: a single type, a tuple for several parameters,
    /// or `()` for none. Listeners receive it by reference.
    type Args: 'static;

    /// Runtime name used for ordering and diagnostics.
    ///
    /// Must appear in `Map::NAMES` and belong to no other event of the map.
    const NAME: &'static str;

    /// Typed name of this event.
    fn event_name() -> EventName<Self::Map> {
        EventName::new(Self::NAME)
    }
}

/// Handler type of event `E`.
pub type EventHandler<E> = Listener<<E as Event>::Args>;

/// Parameter-list type of event `E`.
pub type EventHandlerParams<E> = <E as Event>::Args;

/// Event map of an already-parameterized emitter or of a type wrapping one.
pub type ExtractEventMap<T> = <T as EventSource>::Events;

/// Name of an event declared in map `M`.
///
/// Only obtainable through [`Event::event_name`] (or from
/// [`TypedEventEmitter::event_names`](crate::TypedEventEmitter::event_names)), so
/// holding one proves the name belongs to `M`.
pub struct EventName<M> {
    name: &'static str,
    _map: PhantomData<fn() -> M>,
}

impl<M> EventName<M> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            _map: PhantomData,
        }
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.name
    }
}

// Manual impls: derives would require `M: Clone`/`M: Eq`/... for a phantom parameter.
impl<M> Clone for EventName<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for EventName<M> {}

impl<M> PartialEq for EventName<M> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<M> Eq for EventName<M> {}

impl<M> PartialEq<&str> for EventName<M> {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl<M> PartialEq<str> for EventName<M> {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl<M> Hash for EventName<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<M> fmt::Debug for EventName<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.name, f)
    }
}

impl<M> fmt::Display for EventName<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<M> AsRef<str> for EventName<M> {
    fn as_ref(&self) -> &str {
        self.name
    }
}

/// True if no name appears twice.
///
/// `const` so [`event_map!`](crate::event_map) can reject duplicates at compile time.
#[doc(hidden)]
pub const fn names_unique(names: &[&str]) -> bool {
    let mut i = 0;
    while i < names.len() {
        let mut j = i + 1;
        while j < names.len() {
            if str_eq(names[i], names[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// True if `name` is one of `names`.
pub(crate) const fn names_contain(names: &[&str], name: &str) -> bool {
    let mut i = 0;
    while i < names.len() {
        if str_eq(names[i], name) {
            return true;
        }
        i += 1;
    }
    false
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
