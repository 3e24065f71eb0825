//! Sink implementations
//!
//! Contains CopySink and LogSink.

mod copy;
mod log;

pub use self::copy::{CopySink, CopySinkConfig};
pub use self::log::LogSink;
