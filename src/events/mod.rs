//! Event maps: how an emitter's allowed events are declared.
//!
//! ## Contents
//! - [`EventMap`], [`Event`] marker traits a map and its events implement
//! - [`EventName`] typed event name
//! - [`EventHandler`], [`EventHandlerParams`], [`ExtractEventMap`] type-level lookups
//! - [`event_map!`](crate::event_map) declaration macro

mod event;
mod macros;

pub use event::{
    Event, EventHandler, EventHandlerParams, EventMap, EventName, ExtractEventMap,
};
pub use event::names_unique;
pub(crate) use event::names_contain;
