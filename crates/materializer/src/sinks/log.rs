//! LogSink - logs frame summary via tracing

use contracts::{CompleteFrame, FrameSink, SinkWrite, SyncerError};
use tracing::{info, instrument};

/// Sink that logs frame summaries (also the only sink of a dry run)
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_frame_summary(&self, frame: &CompleteFrame<'_>) {
        let files: Vec<&str> = frame.record.present_files().map(|(_, name)| name).collect();

        info!(
            sink = %self.name,
            frame_index = frame.frame_index,
            timestamp = frame.record.timestamp,
            frame_seq = ?frame.record.frame_seq,
            files = ?files,
            "Frame ready"
        );
    }
}

impl FrameSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, frame),
        fields(sink = %self.name, frame_index = frame.frame_index)
    )]
    fn write(&mut self, frame: &CompleteFrame<'_>) -> Result<SinkWrite, SyncerError> {
        self.log_frame_summary(frame);
        Ok(SinkWrite::default())
    }
}
