//! SinkHandle - wraps a sink with per-sink counters

use serde::Serialize;
use tracing::{debug, error, instrument};

use contracts::{CompleteFrame, FrameSink, SinkWrite, SyncerError};

/// Counters for a single sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SinkMetrics {
    /// Frames accepted
    pub write_count: u64,
    /// Writes that returned an error
    pub failure_count: u64,
    /// Files created
    pub files: u64,
    /// Bytes written
    pub bytes: u64,
}

impl SinkMetrics {
    fn record(&mut self, written: SinkWrite) {
        self.write_count += 1;
        self.files += written.files;
        self.bytes += written.bytes;
    }
}

/// Handle to one sink of the materializer
pub struct SinkHandle {
    name: String,
    sink: Box<dyn FrameSink>,
    metrics: SinkMetrics,
}

impl SinkHandle {
    pub fn new<S: FrameSink + 'static>(sink: S) -> Self {
        Self {
            name: sink.name().to_string(),
            sink: Box::new(sink),
            metrics: SinkMetrics::default(),
        }
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current metrics
    pub fn metrics(&self) -> SinkMetrics {
        self.metrics
    }

    /// Hand one frame to the sink.
    ///
    /// A failure is counted, logged and returned; the caller decides whether
    /// to go on.
    pub fn write(&mut self, frame: &CompleteFrame<'_>) -> Result<(), SyncerError> {
        match self.sink.write(frame) {
            Ok(written) => {
                self.metrics.record(written);
                Ok(())
            }
            Err(e) => {
                self.metrics.failure_count += 1;
                error!(
                    sink = %self.name,
                    frame_index = frame.frame_index,
                    error = %e,
                    "Write failed"
                );
                Err(e)
            }
        }
    }

    #[instrument(name = "sink_handle_finish", skip(self), fields(sink = %self.name))]
    pub fn finish(&mut self) -> Result<(), SyncerError> {
        self.sink.flush()?;
        debug!(sink = %self.name, writes = self.metrics.write_count, "Sink finished");
        Ok(())
    }
}
