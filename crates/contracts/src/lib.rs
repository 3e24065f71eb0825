//! # Contracts
//!
//! Shared data structures and traits of the frame syncer workspace.
//! All stage crates depend on this crate; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Timestamps are integers in sensor clock units, taken from file names
//! - `frame_index` is dense and only exists for complete captures

mod capture;
mod config;
mod error;
mod sensor;
mod sink;

pub use capture::*;
pub use config::*;
pub use error::*;
pub use sensor::*;
pub use sink::*;
