//! Synchronization result summary.

use std::collections::BTreeMap;

use contracts::{SensorMask, SensorType, Timestamp};
use serde::Serialize;

/// What one `synchronize` call decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Records in the set
    pub records: usize,

    /// Records that received a frame index
    pub complete: usize,

    /// Records left without a frame index
    pub partial: usize,

    /// Mask a record had to match to be complete
    pub full_mask: SensorMask,

    /// Timestamp of frame 0
    pub first_complete: Option<Timestamp>,

    /// Timestamp of the last assigned frame
    pub last_complete: Option<Timestamp>,

    /// Partial records lacking each sensor
    pub missing_per_sensor: BTreeMap<SensorType, usize>,
}

impl SyncSummary {
    /// Share of records that became frames, in `[0, 1]`.
    pub fn completeness(&self) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            self.complete as f64 / self.records as f64
        }
    }
}
