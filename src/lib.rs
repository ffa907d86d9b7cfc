//! # typed-emitter
//!
//! **typed-emitter** is an event emitter whose events are declared up front.
//!
//! Each emitter is parameterized by an *event map*: a closed set of event types,
//! each with a name and a handler parameter list. Registering a listener,
//! emitting an event and querying listeners are all checked against that map by
//! the compiler, so an undeclared event or a handler with the wrong signature is a
//! type error rather than a silent runtime mismatch.
//!
//! At runtime the emitter behaves like a classic listener registry: ordered
//! per-name sequences, one-shot and prepended listeners, synchronous emission on
//! the calling thread, and a soft per-event listener cap that only logs.
//!
//! ## Architecture
//! ```text
//!   event_map! { MyEvents { Ready("ready"): (), Data("data"): Vec<u8> } }
//!                 │
//!                 ▼  (type level only)
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  TypedEventEmitter<MyEvents>                                      │
//! │  - on / once / prepend_* / off        (E: Event<Map = MyEvents>)  │
//! │  - emit::<E>(E::Args) -> bool                                     │
//! │  - event_names / listeners / listener_count / max_listeners       │
//! │  - next_event::<E>() / subscribe::<E>()   (async adapters)        │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                  ┌────────────────────────────────┐
//!                  │  Registry (untyped, per name)  │
//!                  │  "ready" ─► [entry, entry]     │
//!                  │  "data"  ─► [entry]            │
//!                  └────────────────────────────────┘
//! ```
//!
//! ## Features
//! | Area              | Description                                                    | Key types / traits                           |
//! |-------------------|----------------------------------------------------------------|----------------------------------------------|
//! | **Event maps**    | Declare events and their handler parameter lists.              | [`EventMap`], [`Event`], [`event_map!`]      |
//! | **Emitter**       | Register, remove, emit and inspect listeners.                  | [`TypedEventEmitter`], [`Listener`]          |
//! | **Composition**   | Expose an owned emitter; generic code over any source.         | [`EventSource`], [`ExtractEventMap`]         |
//! | **Async**         | Await the next emission or stream all of them.                 | [`EventFuture`], [`EventStream`]             |
//! | **Errors**        | Typed adapter errors and the soft-cap diagnostic.              | [`EmitterError`], [`MaxListenersExceeded`]   |
//! | **Configuration** | Per-emitter and process-wide listener caps.                    | [`EmitterConfig`]                            |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a listener factory tracing each emission _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use typed_emitter::{event_map, Listener, TypedEventEmitter};
//!
//! event_map! {
//!     pub MyEvent {
//!         EventA("eventA"): i32,
//!         EventB("eventB"): bool,
//!         EventC("eventC"): (String, Vec<i32>),
//!     }
//! }
//!
//! let count = Arc::new(AtomicI32::new(0));
//! let emitter = TypedEventEmitter::<MyEvent>::new();
//!
//! let c = Arc::clone(&count);
//! let f = Listener::new(move |n: &i32| {
//!     c.fetch_add(*n, Ordering::SeqCst);
//! });
//! let c = Arc::clone(&count);
//! emitter
//!     .on::<EventA>(f.clone())
//!     .once::<EventA>(move |n: &i32| {
//!         c.fetch_add(*n, Ordering::SeqCst);
//!     });
//!
//! emitter.emit::<EventA>(1);
//! assert_eq!(count.load(Ordering::SeqCst), 2);
//! emitter.emit::<EventA>(1);
//! assert_eq!(count.load(Ordering::SeqCst), 3);
//!
//! emitter.off::<EventA>(&f);
//! assert!(emitter.event_names().is_empty());
//!
//! // Does not compile: `EventB` carries a `bool`.
//! // emitter.emit::<EventB>(1);
//! ```
mod config;
mod emitter;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use config::{
    DEFAULT_MAX_LISTENERS, EmitterConfig, default_max_listeners, set_default_max_listeners,
};
pub use emitter::{EventFuture, EventSource, EventStream, TypedEventEmitter};
pub use error::{EmitterError, MaxListenersExceeded};
pub use events::{
    Event, EventHandler, EventHandlerParams, EventMap, EventName, ExtractEventMap,
};
pub use listeners::{Listener, RawListener};

// Used by `event_map!` expansions; not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::events::names_unique;
}

// Optional: expose a simple built-in emission tracer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod subscribers;
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
