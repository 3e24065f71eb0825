//! # Ingestion
//!
//! Capture file ingestion module.
//!
//! Responsibilities:
//! - Recognize capture file names (`<frameSeq>-<timestamp>_<sensorSuffix>`)
//! - Group files by timestamp into `CaptureRecord`s
//! - Compute the full-set sensor mask of the input
//!
//! ## Usage Example
//!
//! ```no_run
//! use contracts::SensorSuffixes;
//! use ingestion::Scanner;
//! use std::path::Path;
//!
//! let scanner = Scanner::new(SensorSuffixes::default()).unwrap();
//! let set = scanner.scan(Path::new("captures")).unwrap();
//! println!("{} timestamps, full mask {}", set.len(), set.full_mask);
//! ```

mod pattern;
mod scanner;

// Re-exports
pub use contracts::{CaptureRecord, CaptureSet};
pub use pattern::{FilenamePattern, ParsedName, Rejection};
pub use scanner::Scanner;
