//! # LogWriter — emission tracer
//!
//! A listener factory that reports each emission of an event through
//! `tracing::info!`. Use it for tests or demos; install a `tracing` subscriber
//! to see the output.
//!
//! ## Example output
//! ```text
//! INFO typed_emitter::subscribers::log: [emit] event="eventA" args=1
//! INFO typed_emitter::subscribers::log: [emit] event="eventC" args=("s", [1, 2])
//! ```

use std::fmt::Debug;

use crate::emitter::TypedEventEmitter;
use crate::events::Event;
use crate::listeners::Listener;

/// Emission tracer.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Listener that traces every emission of `E` with its arguments.
    #[must_use]
    pub fn listener<E>(&self) -> Listener<E::Args>
    where
        E: Event,
        E::Args: Debug,
    {
        Listener::new(|args: &E::Args| {
            tracing::info!(event = E::NAME, ?args, "[emit]");
        })
    }

    /// Registers [`Self::listener`] for `E` on `emitter` and returns it, so it can be removed later.
    pub fn attach<E>(&self, emitter: &TypedEventEmitter<E::Map>) -> Listener<E::Args>
    where
        E: Event,
        E::Args: Debug,
    {
        let listener = self.listener::<E>();
        emitter.on::<E>(listener.clone());
        listener
    }
}
