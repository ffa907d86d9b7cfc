//! # Listeners and the registry that orders them.
//!
//! - [`Listener`] typed handler handle with identity equality
//! - [`RawListener`] a registered entry (handler + one-shot flag)
//! - `Registry` the untyped per-name listener sequences behind every emitter

mod listener;
mod registry;

pub use listener::{Listener, RawListener};
pub(crate) use registry::Registry;
