//! SyncerConfig - Config Loader output
//!
//! Everything a run needs besides the input/output directories: sensor file
//! suffixes, output naming, report location and metrics export.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SensorSuffixes;

/// Default zero-padding of the frame index in output file names.
pub const DEFAULT_FRAME_INDEX_WIDTH: usize = 8;

/// Default report location, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "./report.csv";

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncerConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// File name suffix per sensor
    #[serde(default)]
    pub sensors: SensorSuffixes,

    /// Output naming and report location
    #[serde(default)]
    pub output: OutputConfig,

    /// Metrics export
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Output naming and report location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Zero-padded width of the frame index in output file names
    #[serde(default = "default_frame_index_width")]
    pub frame_index_width: usize,

    /// Where the report is written
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
}

fn default_frame_index_width() -> usize {
    DEFAULT_FRAME_INDEX_WIDTH
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frame_index_width: default_frame_index_width(),
            report_path: default_report_path(),
        }
    }
}

/// Metrics export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Prometheus textfile written at the end of the run (None = disabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textfile_path: Option<PathBuf>,
}
