//! Frame synchronizer - assigns dense frame indices to complete captures.

use std::collections::BTreeMap;

use contracts::{CaptureSet, SensorMask, SensorType, SyncerError, Timestamp};
use metrics::{counter, gauge};
use tracing::{debug, info, instrument};

use crate::SyncSummary;

/// Assigns frame indices to the complete records of a [`CaptureSet`].
///
/// A record is complete when its mask equals the full-set mask of the run.
/// Complete records receive `0, 1, 2, ...` in ascending timestamp order;
/// partial records keep `frame_index == None` and stay in the set for the
/// report.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSynchronizer;

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self
    }

    /// Assign frame indices in place.
    ///
    /// Any previous assignment is discarded first, so calling this twice on
    /// the same set yields the same result.
    ///
    /// # Errors
    /// `SynchronizationFailed` if the set is empty or inconsistent.
    #[instrument(name = "synchronize", skip(self, set), fields(records = set.len()))]
    pub fn synchronize(&self, set: &mut CaptureSet) -> Result<SyncSummary, SyncerError> {
        Self::check_consistency(set)?;

        let full = set.full_mask;

        let mut order: Vec<Timestamp> = set.records.keys().copied().collect();
        order.sort_unstable();

        let mut next_index: u64 = 0;
        let mut missing: BTreeMap<SensorType, usize> = BTreeMap::new();
        let mut first_complete = None;
        let mut last_complete = None;

        for ts in &order {
            let Some(record) = set.records.get_mut(ts) else {
                continue;
            };

            if record.is_complete(full) {
                record.frame_index = Some(next_index);
                next_index += 1;
                first_complete.get_or_insert(*ts);
                last_complete = Some(*ts);
            } else {
                record.frame_index = None;
                for sensor in full.iter().filter(|s| !record.mask.contains(*s)) {
                    *missing.entry(sensor).or_default() += 1;
                }
                debug!(
                    timestamp = *ts,
                    mask = %record.mask,
                    full_mask = %full,
                    "Partial capture left unassigned"
                );
            }
        }

        let complete = usize::try_from(next_index).unwrap_or(usize::MAX);
        let summary = SyncSummary {
            records: order.len(),
            complete,
            partial: order.len() - complete,
            full_mask: full,
            first_complete,
            last_complete,
            missing_per_sensor: missing,
        };
        set.order = order;

        gauge!("frame_syncer_frames_complete").set(summary.complete as f64);
        gauge!("frame_syncer_frames_partial").set(summary.partial as f64);
        for (sensor, count) in &summary.missing_per_sensor {
            counter!("frame_syncer_sensor_missing_total", "sensor" => sensor.as_str())
                .increment(*count as u64);
        }

        info!(
            complete = summary.complete,
            partial = summary.partial,
            full_mask = %full,
            "Synchronization finished"
        );

        Ok(summary)
    }

    /// Reject sets the scanner could not have produced.
    fn check_consistency(set: &CaptureSet) -> Result<(), SyncerError> {
        if set.is_empty() {
            return Err(SyncerError::synchronization_failed(
                "no capture records to synchronize",
            ));
        }
        if set.full_mask.is_empty() {
            return Err(SyncerError::synchronization_failed(
                "full-set sensor mask is empty",
            ));
        }

        let mut observed = SensorMask::EMPTY;
        for (key, record) in &set.records {
            if *key != record.timestamp {
                return Err(SyncerError::synchronization_failed(format!(
                    "record keyed {key} carries timestamp {}",
                    record.timestamp
                )));
            }

            let from_files: SensorMask = record.present_files().map(|(s, _)| s).collect();
            if record.mask.is_empty() || record.mask != from_files {
                return Err(SyncerError::synchronization_failed(format!(
                    "record {key} has mask {} but files for {}",
                    record.mask, from_files
                )));
            }
            observed |= record.mask;
        }

        if observed != set.full_mask {
            return Err(SyncerError::synchronization_failed(format!(
                "full-set mask {} differs from union of records {}",
                set.full_mask, observed
            )));
        }
        Ok(())
    }
}
