//! CaptureRecord / CaptureSet - per-timestamp grouping of capture files
//!
//! A `CaptureSet` is the working state of one run. The scanner creates it,
//! the synchronizer assigns frame indices, the materializer and the report
//! read it. Nothing outlives the run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{SensorMask, SensorType};

/// Capture timestamp in sensor clock units.
pub type Timestamp = u64;

/// All capture files sharing one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Grouping key
    pub timestamp: Timestamp,

    /// Frame sequence number of the first matched file (diagnostics only)
    pub frame_seq: Option<u64>,

    /// Original file name per sensor, indexed by `SensorType::index`
    pub files: [Option<String>; 3],

    /// OR of the bits of every matched file
    pub mask: SensorMask,

    /// Dense frame index, only set for complete records
    pub frame_index: Option<u64>,
}

impl CaptureRecord {
    /// Create an empty record for `timestamp`.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            frame_seq: None,
            files: [None, None, None],
            mask: SensorMask::EMPTY,
            frame_index: None,
        }
    }

    /// Attach a sensor file.
    ///
    /// Returns `false` without modifying the record if a file for this
    /// sensor is already attached.
    pub fn attach(&mut self, sensor: SensorType, file_name: impl Into<String>) -> bool {
        let slot = &mut self.files[sensor.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(file_name.into());
        self.mask.insert(sensor);
        true
    }

    /// File name recorded for `sensor`.
    pub fn file(&self, sensor: SensorType) -> Option<&str> {
        self.files[sensor.index()].as_deref()
    }

    /// Present sensors with their file names, in bit order.
    pub fn present_files(&self) -> impl Iterator<Item = (SensorType, &str)> {
        SensorType::ALL
            .into_iter()
            .filter_map(|s| self.file(s).map(|name| (s, name)))
    }

    /// True if every sensor in `full` is present.
    #[inline]
    pub fn is_complete(&self, full: SensorMask) -> bool {
        self.mask == full
    }
}

/// Scanner counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Directory entries visited
    pub entries_seen: u64,

    /// Files matched to a sensor
    pub files_matched: u64,

    /// Entries that did not match the naming pattern
    pub files_skipped: u64,

    /// Second file for an already seen (timestamp, sensor) pair
    pub duplicates: u64,
}

/// Working set of one run.
#[derive(Debug, Clone, Default)]
pub struct CaptureSet {
    /// Directory the records were scanned from
    pub input_dir: PathBuf,

    /// Timestamp -> record
    pub records: HashMap<Timestamp, CaptureRecord>,

    /// OR of all record masks
    pub full_mask: SensorMask,

    /// Scanner counters
    pub scan_stats: ScanStats,

    /// Timestamps in ascending order; filled by the synchronizer
    pub order: Vec<Timestamp>,
}

impl CaptureSet {
    /// Create an empty set rooted at `input_dir`.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Default::default()
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record a sensor file for `timestamp`, creating the record on first use.
    ///
    /// Returns `false` if the (timestamp, sensor) pair was already taken.
    pub fn insert_file(
        &mut self,
        timestamp: Timestamp,
        frame_seq: u64,
        sensor: SensorType,
        file_name: impl Into<String>,
    ) -> bool {
        let record = self
            .records
            .entry(timestamp)
            .or_insert_with(|| CaptureRecord::new(timestamp));
        if record.frame_seq.is_none() {
            record.frame_seq = Some(frame_seq);
        }
        let attached = record.attach(sensor, file_name);
        if attached {
            self.full_mask.insert(sensor);
        }
        attached
    }

    /// Record for `timestamp`.
    pub fn get(&self, timestamp: Timestamp) -> Option<&CaptureRecord> {
        self.records.get(&timestamp)
    }

    /// Records in ascending timestamp order.
    ///
    /// Uses the order computed by the synchronizer when available and sorts
    /// the keys otherwise.
    pub fn sorted_records(&self) -> Vec<&CaptureRecord> {
        if self.order.len() == self.records.len() {
            self.order
                .iter()
                .filter_map(|ts| self.records.get(ts))
                .collect()
        } else {
            let mut records: Vec<&CaptureRecord> = self.records.values().collect();
            records.sort_unstable_by_key(|r| r.timestamp);
            records
        }
    }

    /// Complete records ordered by frame index.
    pub fn complete_records(&self) -> Vec<&CaptureRecord> {
        let mut records: Vec<&CaptureRecord> = self
            .records
            .values()
            .filter(|r| r.frame_index.is_some())
            .collect();
        records.sort_unstable_by_key(|r| r.frame_index);
        records
    }

    /// Number of records holding a frame index.
    pub fn complete_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.frame_index.is_some())
            .count()
    }
}
