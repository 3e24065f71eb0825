//! Materializer - hands complete frames to the sinks in index order

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use contracts::{CaptureSet, CompleteFrame, SensorSuffixes, SyncerError, DEFAULT_FRAME_INDEX_WIDTH};

use crate::handle::{SinkHandle, SinkMetrics};
use crate::sinks::{CopySink, CopySinkConfig, LogSink};

/// Materializer configuration
#[derive(Debug, Clone)]
pub struct MaterializerConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Zero-padded width of the frame index in output names
    pub frame_index_width: usize,

    /// Suffix per sensor
    pub suffixes: SensorSuffixes,

    /// Log the plan only, create and copy nothing
    pub dry_run: bool,
}

impl MaterializerConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            frame_index_width: DEFAULT_FRAME_INDEX_WIDTH,
            suffixes: SensorSuffixes::default(),
            dry_run: false,
        }
    }
}

/// Builder for creating a Materializer
pub struct MaterializerBuilder {
    config: MaterializerConfig,
}

impl MaterializerBuilder {
    pub fn new(config: MaterializerConfig) -> Self {
        Self { config }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    pub fn frame_index_width(mut self, width: usize) -> Self {
        self.config.frame_index_width = width;
        self
    }

    pub fn suffixes(mut self, suffixes: SensorSuffixes) -> Self {
        self.config.suffixes = suffixes;
        self
    }

    /// Build the materializer with its sinks.
    ///
    /// Always a `LogSink`; a `CopySink` unless this is a dry run.
    #[instrument(name = "materializer_builder_build", skip(self), fields(dry_run = self.config.dry_run))]
    pub fn build(self) -> Materializer {
        let mut handles = vec![SinkHandle::new(LogSink::new("log"))];

        if !self.config.dry_run {
            handles.push(SinkHandle::new(CopySink::new(
                "copy",
                CopySinkConfig {
                    output_dir: self.config.output_dir,
                    frame_index_width: self.config.frame_index_width,
                    suffixes: self.config.suffixes,
                },
            )));
        }

        Materializer::with_handles(handles)
    }
}

/// Result of one materialization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeSummary {
    /// Complete frames handed to the sinks
    pub frames: u64,

    /// Files created across all sinks
    pub files_copied: u64,

    /// Bytes written across all sinks
    pub bytes_copied: u64,

    /// Per-sink counters
    pub sinks: Vec<(String, SinkMetrics)>,
}

/// Fans complete frames out to the sinks
pub struct Materializer {
    handles: Vec<SinkHandle>,
}

impl Materializer {
    /// Create a materializer with custom sink handles (for testing)
    pub fn with_handles(handles: Vec<SinkHandle>) -> Self {
        Self { handles }
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, SinkMetrics)> {
        self.handles
            .iter()
            .map(|h| (h.name().to_string(), h.metrics()))
            .collect()
    }

    /// Deliver every complete record of `set`, ascending by frame index.
    ///
    /// Records without a frame index are skipped. The first sink error
    /// aborts the run; files already written stay where they are.
    ///
    /// # Errors
    /// `CopyFailed` from the copy sink, or whatever a custom sink returns.
    #[instrument(name = "materialize", skip(self, set), fields(frames = set.complete_count()))]
    pub fn run(&mut self, set: &CaptureSet) -> Result<MaterializeSummary, SyncerError> {
        info!(sinks = self.handles.len(), "Materializer started");

        let mut frames: u64 = 0;
        for record in set.complete_records() {
            let Some(frame_index) = record.frame_index else {
                continue;
            };
            let frame = CompleteFrame {
                frame_index,
                input_dir: set.input_dir(),
                record,
            };

            for handle in &mut self.handles {
                handle.write(&frame)?;
            }
            frames += 1;

            if frames.is_multiple_of(100) {
                debug!(frames, "Materializer progress");
            }
        }

        for handle in &mut self.handles {
            handle.finish()?;
        }

        let sinks = self.metrics();
        let summary = MaterializeSummary {
            frames,
            files_copied: sinks.iter().map(|(_, m)| m.files).sum(),
            bytes_copied: sinks.iter().map(|(_, m)| m.bytes).sum(),
            sinks,
        };

        info!(
            frames = summary.frames,
            files = summary.files_copied,
            bytes = summary.bytes_copied,
            "Materializer finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{FrameSink, SensorType, SinkWrite};
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Records the frame indices it sees
    struct RecordingSink {
        seen: Arc<Mutex<Vec<u64>>>,
    }

    impl FrameSink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        fn write(&mut self, frame: &CompleteFrame<'_>) -> Result<SinkWrite, SyncerError> {
            self.seen.lock().unwrap().push(frame.frame_index);
            Ok(SinkWrite::default())
        }
    }

    /// Set with three complete and one partial record, indices assigned.
    fn synced_set(input_dir: &Path) -> CaptureSet {
        let mut set = CaptureSet::new(input_dir);
        for (i, ts) in [900u64, 100, 500].into_iter().enumerate() {
            for sensor in SensorType::ALL {
                let name = format!("{i}-{ts}_{}", SensorSuffixes::default().get(sensor));
                fs::write(input_dir.join(&name), ts.to_string()).unwrap();
                set.insert_file(ts, i as u64, sensor, name);
            }
        }
        set.insert_file(700, 9, SensorType::Rgb, "9-700_rgb_gray_img.png");

        for (index, ts) in [100u64, 500, 900].into_iter().enumerate() {
            set.records.get_mut(&ts).unwrap().frame_index = Some(index as u64);
        }
        set
    }

    #[test]
    fn test_frames_delivered_in_index_order() {
        let input = tempdir().unwrap();
        let set = synced_set(input.path());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut materializer = Materializer::with_handles(vec![SinkHandle::new(RecordingSink {
            seen: Arc::clone(&seen),
        })]);
        let summary = materializer.run(&set).unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_build_copies_complete_frames() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let out_dir = output.path().join("out");
        let set = synced_set(input.path());

        let summary = MaterializerBuilder::new(MaterializerConfig::new(&out_dir))
            .build()
            .run(&set)
            .unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.files_copied, 9);
        assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 9);
        assert_eq!(
            fs::read_to_string(out_dir.join("00000000_flood_depth_pc.exr")).unwrap(),
            "100"
        );
        assert_eq!(
            fs::read_to_string(out_dir.join("00000002_spot_depth_pc.exr")).unwrap(),
            "900"
        );
        assert!(!out_dir.join("00000003_rgb_gray_img.png").exists());
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let out_dir = output.path().join("out");
        let set = synced_set(input.path());

        let mut materializer = MaterializerBuilder::new(MaterializerConfig::new(&out_dir))
            .dry_run(true)
            .build();
        let summary = materializer.run(&set).unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.files_copied, 0);
        assert_eq!(summary.sinks.len(), 1);
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_copy_failure_aborts_without_rollback() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let out_dir = output.path().join("out");
        let set = synced_set(input.path());
        // frame 1 loses its flood file
        fs::remove_file(input.path().join("2-500_flood_depth_pc.exr")).unwrap();

        let err = MaterializerBuilder::new(MaterializerConfig::new(&out_dir))
            .build()
            .run(&set)
            .unwrap_err();

        assert!(matches!(err, SyncerError::CopyFailed { .. }));
        assert!(out_dir.join("00000000_rgb_gray_img.png").exists());
        assert!(out_dir.join("00000001_rgb_gray_img.png").exists());
        assert!(!out_dir.join("00000002_rgb_gray_img.png").exists());
    }

    #[test]
    fn test_custom_width_and_suffix() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let mut set = CaptureSet::new(input.path());
        fs::write(input.path().join("1-5_flood_depth_pc.csv"), "x").unwrap();
        set.insert_file(5, 1, SensorType::Flood, "1-5_flood_depth_pc.csv");
        set.records.get_mut(&5).unwrap().frame_index = Some(0);

        let suffixes = SensorSuffixes {
            flood: "flood_depth_pc.csv".to_string(),
            ..SensorSuffixes::default()
        };
        MaterializerBuilder::new(MaterializerConfig::new(output.path()))
            .frame_index_width(4)
            .suffixes(suffixes)
            .build()
            .run(&set)
            .unwrap();

        assert!(output.path().join("0000_flood_depth_pc.csv").exists());
    }
}
