//! CopySink - copies the files of each frame into the output directory

use contracts::{CompleteFrame, FrameSink, SensorSuffixes, SinkWrite, SyncerError};
use metrics::counter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

use crate::naming::output_file_name;

/// Configuration for CopySink
#[derive(Debug, Clone)]
pub struct CopySinkConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Zero-padded width of the frame index
    pub frame_index_width: usize,

    /// Suffix appended after the frame index, per sensor
    pub suffixes: SensorSuffixes,
}

/// Sink that copies original capture files under their frame-indexed name
pub struct CopySink {
    name: String,
    config: CopySinkConfig,
    dir_ready: bool,
}

impl CopySink {
    /// Create a new CopySink.
    ///
    /// Nothing is created on disk until the first write (or flush).
    pub fn new(name: impl Into<String>, config: CopySinkConfig) -> Self {
        Self {
            name: name.into(),
            config,
            dir_ready: false,
        }
    }

    /// Create the output directory, once per sink.
    fn ensure_output_dir(&mut self, input_dir: &Path) -> Result<(), SyncerError> {
        if self.dir_ready {
            return Ok(());
        }
        fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            error!(sink = %self.name, dir = %self.config.output_dir.display(), error = %e, "Cannot create output directory");
            SyncerError::copy_failed(input_dir, &self.config.output_dir, e)
        })?;
        debug!(dir = %self.config.output_dir.display(), "Output directory ready");
        self.dir_ready = true;
        Ok(())
    }

    fn copy_frame(&mut self, frame: &CompleteFrame<'_>) -> Result<SinkWrite, SyncerError> {
        self.ensure_output_dir(frame.input_dir)?;

        let mut written = SinkWrite::default();
        for (sensor, file_name) in frame.record.present_files() {
            let from = frame.input_dir.join(file_name);
            let to = self.config.output_dir.join(output_file_name(
                frame.frame_index,
                self.config.frame_index_width,
                self.config.suffixes.get(sensor),
            ));

            let bytes = fs::copy(&from, &to).map_err(|e| {
                error!(
                    sink = %self.name,
                    frame_index = frame.frame_index,
                    from = %from.display(),
                    to = %to.display(),
                    error = %e,
                    "Copy failed"
                );
                SyncerError::copy_failed(&from, &to, e)
            })?;

            debug!(from = %from.display(), to = %to.display(), bytes, "Copied");
            written.files += 1;
            written.bytes += bytes;
        }

        counter!("frame_syncer_files_copied_total").increment(written.files);
        counter!("frame_syncer_bytes_copied_total").increment(written.bytes);
        Ok(written)
    }
}

impl FrameSink for CopySink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "copy_sink_write",
        skip(self, frame),
        fields(sink = %self.name, frame_index = frame.frame_index)
    )]
    fn write(&mut self, frame: &CompleteFrame<'_>) -> Result<SinkWrite, SyncerError> {
        self.copy_frame(frame)
    }

    /// A run without complete frames still leaves an (empty) output directory.
    #[instrument(name = "copy_sink_flush", skip(self))]
    fn flush(&mut self) -> Result<(), SyncerError> {
        let output_dir = self.config.output_dir.clone();
        self.ensure_output_dir(&output_dir)
    }
}
