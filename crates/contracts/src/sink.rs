//! FrameSink trait - Materializer output interface
//!
//! Defines the abstract interface for sinks receiving complete frames.

use std::path::Path;

use crate::{CaptureRecord, SyncerError};

/// One complete capture ready to be written out.
#[derive(Debug, Clone, Copy)]
pub struct CompleteFrame<'a> {
    /// Dense frame index
    pub frame_index: u64,

    /// Directory holding the original files
    pub input_dir: &'a Path,

    /// The synchronized record
    pub record: &'a CaptureRecord,
}

/// What one `write` call put on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkWrite {
    /// Files created
    pub files: u64,

    /// Bytes written
    pub bytes: u64,
}

/// Data output trait
///
/// All sink implementations must implement this trait. Frames arrive in
/// ascending frame-index order.
pub trait FrameSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one complete frame
    ///
    /// # Errors
    /// Returns write error (should include context)
    fn write(&mut self, frame: &CompleteFrame<'_>) -> Result<SinkWrite, SyncerError>;

    /// Finish writing (if anything is buffered)
    fn flush(&mut self) -> Result<(), SyncerError> {
        Ok(())
    }
}
