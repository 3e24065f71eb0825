//! Directory scanner - groups capture files by timestamp.

use std::fs;
use std::path::Path;

use contracts::{CaptureSet, SensorSuffixes, SyncerError};
use metrics::{counter, gauge};
use tracing::{debug, info, instrument, warn};

use crate::pattern::{FilenamePattern, Rejection};

/// Walks one input directory and builds the [`CaptureSet`].
///
/// The scanner never touches the filesystem beyond reading the directory
/// listing.
#[derive(Debug, Clone)]
pub struct Scanner {
    pattern: FilenamePattern,
}

impl Scanner {
    /// Create a scanner recognizing the given sensor suffixes.
    pub fn new(suffixes: SensorSuffixes) -> Result<Self, SyncerError> {
        Ok(Self {
            pattern: FilenamePattern::new(suffixes)?,
        })
    }

    /// Scan `input_dir`.
    ///
    /// Entries are visited in file name order so duplicate resolution does not
    /// depend on the platform's listing order.
    ///
    /// # Errors
    /// - `InputPathNotFound` if `input_dir` is missing or not a directory
    /// - `NoInputFound` if no file matched
    /// - `Io` if the listing itself fails
    #[instrument(name = "scan", skip(self), fields(input = %input_dir.display()))]
    pub fn scan(&self, input_dir: &Path) -> Result<CaptureSet, SyncerError> {
        if !input_dir.is_dir() {
            return Err(SyncerError::input_path_not_found(input_dir));
        }

        let mut names = Vec::new();
        let mut set = CaptureSet::new(input_dir);

        for entry in fs::read_dir(input_dir)? {
            let entry = entry?;
            set.scan_stats.entries_seen += 1;

            if !entry.path().is_file() {
                debug!(entry = ?entry.file_name(), "Skipping non-file entry");
                set.scan_stats.files_skipped += 1;
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    debug!(entry = ?raw, "Skipping non UTF-8 file name");
                    set.scan_stats.files_skipped += 1;
                }
            }
        }

        names.sort_unstable();

        for name in names {
            self.ingest(&mut set, name);
        }

        counter!("frame_syncer_files_scanned_total").increment(set.scan_stats.entries_seen);
        counter!("frame_syncer_files_skipped_total").increment(set.scan_stats.files_skipped);
        counter!("frame_syncer_files_duplicate_total").increment(set.scan_stats.duplicates);
        gauge!("frame_syncer_records").set(set.len() as f64);

        if set.is_empty() || set.full_mask.is_empty() {
            return Err(SyncerError::no_input_found(
                input_dir,
                set.scan_stats.entries_seen,
            ));
        }

        info!(
            records = set.len(),
            matched = set.scan_stats.files_matched,
            skipped = set.scan_stats.files_skipped,
            duplicates = set.scan_stats.duplicates,
            full_mask = %set.full_mask,
            "Scan finished"
        );

        Ok(set)
    }

    fn ingest(&self, set: &mut CaptureSet, name: String) {
        let parsed = match self.pattern.parse(&name) {
            Ok(parsed) => parsed,
            Err(Rejection::Pattern) => {
                debug!(file = %name, "File name does not match capture pattern");
                set.scan_stats.files_skipped += 1;
                return;
            }
            Err(reason) => {
                debug!(file = %name, ?reason, "Capture file rejected");
                set.scan_stats.files_skipped += 1;
                return;
            }
        };

        if set.insert_file(parsed.timestamp, parsed.frame_seq, parsed.sensor, name.as_str()) {
            set.scan_stats.files_matched += 1;
        } else {
            let kept = set
                .get(parsed.timestamp)
                .and_then(|r| r.file(parsed.sensor))
                .unwrap_or_default();
            warn!(
                file = %name,
                kept = %kept,
                timestamp = parsed.timestamp,
                sensor = %parsed.sensor,
                "Duplicate capture file ignored"
            );
            set.scan_stats.duplicates += 1;
        }
    }
}
