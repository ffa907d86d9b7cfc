//! # TypedEventEmitter: the typed facade over the listener registry.
//!
//! [`TypedEventEmitter`] is generic over an [`EventMap`]. Every method that names
//! an event is generic over an [`Event`] of that map, so the event name, the
//! handler type and the emitted arguments are all checked at compile time.
//!
//! ## Architecture
//! ```text
//! on::<E>(h) / once::<E>(h) / prepend_*::<E>(h)
//!        │
//!        └──► Registry[E::NAME] ── [entry, entry, ...]   (append or prepend)
//!                                      │
//! emit::<E>(args)                      │
//!        ├──► snapshot entries ◄───────┘   (lock held only for the copy)
//!        └──► for entry in snapshot:
//!                ├─ one-shot? claim + remove from registry, skip if already fired
//!                └─ listener.call(&args)  (calling thread, no lock held)
//! ```
//!
//! ## Rules
//! - **Snapshot emission**: listeners added during an emission do not run in it;
//!   persistent listeners removed during an emission still run in it.
//! - **Re-entrancy**: listeners may call any method, including `emit`, on the same emitter.
//! - **One-shot**: an entry registered with `once` runs at most once, even when
//!   re-entrant emissions overlap.
//! - **Panics**: a panicking listener unwinds out of `emit`; the remaining listeners
//!   of that emission do not run. The emitter stays usable.
//! - **Soft cap**: exceeding `max_listeners` logs a `tracing` warning and never
//!   refuses a registration.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use typed_emitter::{event_map, TypedEventEmitter};
//!
//! event_map! {
//!     Counter {
//!         Add("add"): i32,
//!         Reset("reset"): (),
//!     }
//! }
//!
//! let total = Arc::new(AtomicI32::new(0));
//! let emitter = TypedEventEmitter::<Counter>::new();
//!
//! let t = Arc::clone(&total);
//! emitter.on::<Add>(move |n: &i32| {
//!     t.fetch_add(*n, Ordering::SeqCst);
//! });
//!
//! assert!(emitter.emit::<Add>(5));
//! assert!(!emitter.emit::<Reset>(()));
//! assert_eq!(total.load(Ordering::SeqCst), 5);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use super::adapters::{EventFuture, EventStream, Subscription};
use crate::config::EmitterConfig;
use crate::events::{Event, EventMap, EventName, names_contain, names_unique};
use crate::listeners::{Listener, RawListener, Registry};

/// Emitter whose events and handler signatures are fixed by the event map `M`.
///
/// Cloning yields another handle to the same listeners.
pub struct TypedEventEmitter<M: EventMap> {
    registry: Arc<Mutex<Registry>>,
    _map: PhantomData<fn() -> M>,
}

impl<M: EventMap> TypedEventEmitter<M> {
    /// Creates an emitter with [`EmitterConfig::default`].
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an emitter with the given configuration.
    pub fn with_config(cfg: EmitterConfig) -> Self {
        const { assert!(names_unique(M::NAMES), "event map declares an event name twice") };
        Self {
            registry: Arc::new(Mutex::new(Registry::new(cfg.max_listeners))),
            _map: PhantomData,
        }
    }

    /// Appends a persistent listener for `E`. Alias of [`Self::on`].
    pub fn add_listener<E>(&self, listener: impl Into<Listener<E::Args>>) -> &Self
    where
        E: Event<Map = M>,
    {
        self.register::<E>(listener.into(), false, false);
        self
    }

    /// Appends a persistent listener for `E`.
    ///
    /// Registering the same listener twice creates two independent entries.
    pub fn on<E>(&self, listener: impl Into<Listener<E::Args>>) -> &Self
    where
        E: Event<Map = M>,
    {
        self.register::<E>(listener.into(), false, false);
        self
    }

    /// Appends a one-shot listener for `E`, removed right before it first runs.
    pub fn once<E>(&self, listener: impl Into<Listener<E::Args>>) -> &Self
    where
        E: Event<Map = M>,
    {
        self.register::<E>(listener.into(), true, false);
        self
    }

    /// Inserts a persistent listener for `E` at the front of the sequence.
    pub fn prepend_listener<E>(&self, listener: impl Into<Listener<E::Args>>) -> &Self
    where
        E: Event<Map = M>,
    {
        self.register::<E>(listener.into(), false, true);
        self
    }

    /// Inserts a one-shot listener for `E` at the front of the sequence.
    pub fn prepend_once_listener<E>(&self, listener: impl Into<Listener<E::Args>>) -> &Self
    where
        E: Event<Map = M>,
    {
        self.register::<E>(listener.into(), true, true);
        self
    }

    /// Removes the first entry for `E` registered with `listener` (or a clone of it).
    ///
    /// Does nothing if no such entry exists.
    pub fn off<E>(&self, listener: &Listener<E::Args>) -> &Self
    where
        E: Event<Map = M>,
    {
        let removed = self.registry.lock().remove(E::NAME, listener.id());
        if removed.is_some() {
            tracing::trace!(event = E::NAME, "listener removed");
        }
        self
    }

    /// Alias of [`Self::off`].
    pub fn remove_listener<E>(&self, listener: &Listener<E::Args>) -> &Self
    where
        E: Event<Map = M>,
    {
        self.off::<E>(listener)
    }

    /// Removes every listener of `event`, or of every event when `None`.
    pub fn remove_all_listeners(&self, event: Option<EventName<M>>) -> &Self {
        let removed = self
            .registry
            .lock()
            .remove_all(event.as_ref().map(EventName::as_str));
        tracing::trace!(
            event = event.as_ref().map(EventName::as_str).unwrap_or("*"),
            removed = removed.len(),
            "listeners cleared"
        );
        self
    }

    /// Runs every listener registered for `E` when the call starts, in order.
    ///
    /// Returns `true` if at least one listener was registered.
    pub fn emit<E>(&self, args: E::Args) -> bool
    where
        E: Event<Map = M>,
    {
        Self::check_declared::<E>();
        let snapshot = self.registry.lock().snapshot(E::NAME);
        if snapshot.is_empty() {
            return false;
        }
        tracing::trace!(event = E::NAME, listeners = snapshot.len(), "emit");

        for entry in &snapshot {
            if !entry.claim() {
                continue;
            }
            if entry.once {
                let _removed = self.registry.lock().remove_seq(E::NAME, entry.seq);
            }
            if let Some(listener) = entry.listener::<E::Args>() {
                listener.call(&args);
            }
        }
        true
    }

    /// Names of the events that currently have listeners, in first-registration order.
    pub fn event_names(&self) -> Vec<EventName<M>> {
        self.registry
            .lock()
            .names()
            .into_iter()
            .map(EventName::new)
            .collect()
    }

    /// Number of listeners registered for `E`, including unfired one-shot entries.
    pub fn listener_count<E>(&self) -> usize
    where
        E: Event<Map = M>,
    {
        self.registry.lock().count(E::NAME)
    }

    /// Copy of the listeners registered for `E`, in firing order.
    pub fn listeners<E>(&self) -> Vec<Listener<E::Args>>
    where
        E: Event<Map = M>,
    {
        self.registry
            .lock()
            .snapshot(E::NAME)
            .iter()
            .filter_map(|entry| entry.listener::<E::Args>().cloned())
            .collect()
    }

    /// Like [`Self::listeners`], with each entry's one-shot flag.
    pub fn raw_listeners<E>(&self) -> Vec<RawListener<E::Args>>
    where
        E: Event<Map = M>,
    {
        self.registry
            .lock()
            .snapshot(E::NAME)
            .iter()
            .filter_map(|entry| {
                entry
                    .listener::<E::Args>()
                    .map(|l| RawListener::new(l.clone(), entry.once))
            })
            .collect()
    }

    /// Current soft cap on listeners per event (0 = unlimited).
    pub fn max_listeners(&self) -> usize {
        self.registry.lock().max_listeners()
    }

    /// Changes the soft cap on listeners per event (0 = unlimited).
    pub fn set_max_listeners(&self, n: usize) -> &Self {
        self.registry.lock().set_max_listeners(n);
        self
    }

    /// Resolves with the arguments of the next emission of `E`.
    ///
    /// Registers a one-shot listener right away; dropping the future before it
    /// resolves removes that listener.
    pub fn next_event<E>(&self) -> EventFuture<E::Args>
    where
        E: Event<Map = M>,
        E::Args: Clone + Send,
    {
        let (tx, rx) = oneshot::channel();
        let tx = Mutex::new(Some(tx));
        let listener = Listener::new(move |args: &E::Args| {
            if let Some(tx) = tx.lock().take() {
                let _ = tx.send(args.clone());
            }
        });
        let seq = self.register::<E>(listener, true, false);
        EventFuture::new(rx, self.subscription(E::NAME, seq))
    }

    /// Stream of the arguments of every subsequent emission of `E`.
    ///
    /// The stream ends when its listener is removed (e.g. by
    /// [`Self::remove_all_listeners`]); dropping the stream removes the listener.
    pub fn subscribe<E>(&self) -> EventStream<E::Args>
    where
        E: Event<Map = M>,
        E::Args: Clone + Send,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener = Listener::new(move |args: &E::Args| {
            let _ = tx.send(args.clone());
        });
        let seq = self.register::<E>(listener, false, false);
        EventStream::new(rx, self.subscription(E::NAME, seq))
    }

    fn register<E>(&self, listener: Listener<E::Args>, once: bool, prepend: bool) -> u64
    where
        E: Event<Map = M>,
    {
        Self::check_declared::<E>();
        let added = self
            .registry
            .lock()
            .add(E::NAME, listener, once, prepend);
        if let Some(warning) = added.warning {
            tracing::warn!(
                event = warning.event,
                count = warning.count,
                limit = warning.limit,
                label = warning.as_label(),
                "{warning}"
            );
        }
        tracing::trace!(event = E::NAME, once, prepend, "listener added");
        added.seq
    }

    fn check_declared<E>()
    where
        E: Event<Map = M>,
    {
        const { assert!(names_contain(M::NAMES, E::NAME), "event name missing from its event map") };
    }

    fn subscription(&self, event: &'static str, seq: u64) -> Subscription {
        Subscription::new(Arc::downgrade(&self.registry), event, seq)
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> std::sync::Weak<Mutex<Registry>> {
        Arc::downgrade(&self.registry)
    }
}

impl<M: EventMap> Default for TypedEventEmitter<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EventMap> Clone for TypedEventEmitter<M> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            _map: PhantomData,
        }
    }
}

impl<M: EventMap> fmt::Debug for TypedEventEmitter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("TypedEventEmitter")
            .field("map", &std::any::type_name::<M>())
            .field("events", &registry.names())
            .field("listeners", &registry.total())
            .field("max_listeners", &registry.max_listeners())
            .finish()
    }
}
