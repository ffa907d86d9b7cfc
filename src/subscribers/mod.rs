//! # Built-in listeners.
//!
//! Ready-made listeners that can be attached to any emitter.
//!
//! - [`LogWriter`] traces emissions through `tracing` (`logging` feature).

mod log;

pub use log::LogWriter;
