//! # Emitter configuration.
//!
//! [`EmitterConfig`] carries per-instance settings. Its default reads the
//! process-wide default max-listener value, which starts at
//! [`DEFAULT_MAX_LISTENERS`] and can be changed with [`set_default_max_listeners`].
//!
//! # Example
//! ```
//! use typed_emitter::EmitterConfig;
//!
//! let mut cfg = EmitterConfig::default();
//! cfg.max_listeners = 100;
//!
//! assert_eq!(cfg.max_listeners, 100);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

/// Initial process-wide max-listener value.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

static DEFAULT_MAX: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_LISTENERS);

/// Returns the max-listener value new emitters start with.
pub fn default_max_listeners() -> usize {
    DEFAULT_MAX.load(Ordering::Relaxed)
}

/// Changes the max-listener value for emitters created afterwards.
///
/// Existing emitters keep their own value. `0` means unlimited.
pub fn set_default_max_listeners(n: usize) {
    DEFAULT_MAX.store(n, Ordering::Relaxed);
}

/// Per-emitter configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Soft cap on listeners per event name (0 = unlimited).
    ///
    /// Exceeding it only logs a diagnostic; registration is never refused.
    pub max_listeners: usize,
}

impl Default for EmitterConfig {
    /// Provides a default configuration:
    /// - `max_listeners = default_max_listeners()`
    fn default() -> Self {
        Self {
            max_listeners: default_max_listeners(),
        }
    }
}
