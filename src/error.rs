//! Error types used by the emitter and its async adapters.
//!
//! This module defines:
//!
//! - [`EmitterError`] — errors returned by [`EventFuture`](crate::EventFuture) and
//!   [`EventStream`](crate::EventStream) when their listener goes away.
//! - [`MaxListenersExceeded`] — the soft-cap diagnostic. It is never returned from a
//!   registration call; the emitter logs it and registration proceeds.
//!
//! Both types provide `as_label` for logs/metrics.

use thiserror::Error;

/// # Errors produced by the async adapters.
///
/// Emission and registration themselves never fail at runtime: mismatched event
/// names or handler signatures are rejected by the type checker.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitterError {
    /// The adapter's listener was removed (or the emitter dropped) before the event fired.
    #[error("listener for event '{event}' was removed before it fired")]
    Closed {
        /// Name of the event the adapter was waiting on.
        event: &'static str,
    },
}

impl EmitterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use typed_emitter::EmitterError;
    ///
    /// let err = EmitterError::Closed { event: "data" };
    /// assert_eq!(err.as_label(), "emitter_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitterError::Closed { .. } => "emitter_closed",
        }
    }
}

/// # Soft-cap diagnostic.
///
/// Raised when the number of listeners for a single event name exceeds the
/// emitter's max-listener value. Logged once per name through `tracing::warn!`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "possible listener leak detected: {count} '{event}' listeners added (max {limit}); \
     use set_max_listeners() to increase the limit"
)]
pub struct MaxListenersExceeded {
    /// Event name whose sequence grew past the cap.
    pub event: &'static str,
    /// Listener count after the registration that crossed the cap.
    pub count: usize,
    /// The cap in effect at registration time.
    pub limit: usize,
}

impl MaxListenersExceeded {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "max_listeners_exceeded"
    }
}
