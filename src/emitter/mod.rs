//! The typed emitter and the ways to consume it.
//!
//! ## Contents
//! - [`TypedEventEmitter`] the typed facade over the listener registry
//! - [`EventSource`] exposes an emitter through an owning type
//! - [`EventFuture`], [`EventStream`] async adapters for one event

mod adapters;
#[allow(clippy::module_inception)]
mod emitter;
mod source;

pub use adapters::{EventFuture, EventStream};
pub use emitter::TypedEventEmitter;
pub use source::EventSource;
