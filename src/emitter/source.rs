//! # EventSource: exposing a typed emitter through an owning type.
//!
//! Types that own a [`TypedEventEmitter`] implement [`EventSource`] to expose it
//! together with its event map. Generic code can then accept "anything that
//! emits map `M`" and recover `M` with [`ExtractEventMap`](crate::ExtractEventMap).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use typed_emitter::{event_map, EventSource, ExtractEventMap, TypedEventEmitter};
//!
//! event_map! {
//!     DoorEvents {
//!         Opened("opened"): u32,
//!     }
//! }
//!
//! struct Door {
//!     events: TypedEventEmitter<DoorEvents>,
//!     opened: Arc<AtomicU32>,
//! }
//!
//! impl Door {
//!     fn new() -> Self {
//!         let door = Self { events: TypedEventEmitter::new(), opened: Arc::default() };
//!         let opened = Arc::clone(&door.opened);
//!         door.events.on::<Opened>(move |n: &u32| {
//!             opened.fetch_add(*n, Ordering::SeqCst);
//!         });
//!         door
//!     }
//! }
//!
//! impl EventSource for Door {
//!     type Events = DoorEvents;
//!     fn emitter(&self) -> &TypedEventEmitter<DoorEvents> {
//!         &self.events
//!     }
//! }
//!
//! fn open<S: EventSource<Events = DoorEvents>>(source: &S) -> bool {
//!     source.emitter().emit::<Opened>(1)
//! }
//!
//! let door = Door::new();
//! let _map: ExtractEventMap<Door> = DoorEvents;
//! assert!(open(&door));
//! assert!(open(&door));
//! assert_eq!(door.opened.load(Ordering::SeqCst), 2);
//! ```

use std::sync::Arc;

use super::emitter::TypedEventEmitter;
use crate::events::EventMap;

/// A type exposing a [`TypedEventEmitter`] for the map [`Self::Events`].
pub trait EventSource {
    /// The event map of the exposed emitter.
    type Events: EventMap;

    /// The emitter listeners are registered on and events emitted through.
    fn emitter(&self) -> &TypedEventEmitter<Self::Events>;
}

impl<M: EventMap> EventSource for TypedEventEmitter<M> {
    type Events = M;

    fn emitter(&self) -> &TypedEventEmitter<M> {
        self
    }
}

impl<T: EventSource + ?Sized> EventSource for &T {
    type Events = T::Events;

    fn emitter(&self) -> &TypedEventEmitter<T::Events> {
        (**self).emitter()
    }
}

impl<T: EventSource + ?Sized> EventSource for Arc<T> {
    type Events = T::Events;

    fn emitter(&self) -> &TypedEventEmitter<T::Events> {
        (**self).emitter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventHandler, ExtractEventMap, Listener};
    use std::sync::atomic::{AtomicI32, Ordering};

    crate::event_map! {
        MyEvent {
            EventA("eventA"): i32,
            EventB("eventB"): bool,
        }
    }

    /// Owns an emitter and registers its own handlers on construction.
    struct MyEventClass {
        events: TypedEventEmitter<MyEvent>,
        count_a: Arc<AtomicI32>,
        count_b: Arc<AtomicI32>,
    }

    impl MyEventClass {
        fn new() -> Self {
            let this = Self {
                events: TypedEventEmitter::new(),
                count_a: Arc::default(),
                count_b: Arc::default(),
            };
            this.events
                .on::<EventA>(this.increase_count_a())
                .on::<EventB>(this.increase_count_b());
            this
        }

        fn increase_count_a(&self) -> EventHandler<EventA> {
            let count = Arc::clone(&self.count_a);
            Listener::new(move |n: &i32| {
                count.fetch_add(*n, Ordering::SeqCst);
            })
        }

        fn increase_count_b(&self) -> EventHandler<EventB> {
            let count = Arc::clone(&self.count_b);
            Listener::new(move |b: &bool| {
                if *b {
                    count.fetch_add(1, Ordering::SeqCst);
                }
            })
        }
    }

    impl EventSource for MyEventClass {
        type Events = MyEvent;

        fn emitter(&self) -> &TypedEventEmitter<MyEvent> {
            &self.events
        }
    }

    fn emit_a<S>(source: &S, n: i32) -> bool
    where
        S: EventSource<Events = MyEvent>,
    {
        source.emitter().emit::<EventA>(n)
    }

    #[test]
    fn test_owning_type_exposes_typed_surface() {
        let my = MyEventClass::new();
        assert_eq!(my.count_a.load(Ordering::SeqCst), 0);
        assert_eq!(my.count_b.load(Ordering::SeqCst), 0);

        my.emitter().emit::<EventA>(1);
        assert_eq!(my.count_a.load(Ordering::SeqCst), 1);

        my.emitter().emit::<EventB>(true);
        assert_eq!(my.count_b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_generic_code_over_sources() {
        let my = Arc::new(MyEventClass::new());
        assert!(emit_a(&my, 2));
        assert!(emit_a(&*my, 3));
        assert_eq!(my.count_a.load(Ordering::SeqCst), 5);

        let plain = TypedEventEmitter::<MyEvent>::new();
        assert!(!emit_a(&plain, 1));
    }

    #[test]
    fn test_extract_event_map() {
        fn map_name<S: EventSource>() -> &'static str {
            std::any::type_name::<ExtractEventMap<S>>()
        }
        assert_eq!(map_name::<MyEventClass>(), map_name::<TypedEventEmitter<MyEvent>>());
        let _: ExtractEventMap<Arc<MyEventClass>> = MyEvent;
    }
}
