//! Capture file name recognition.

use contracts::{SensorSuffixes, SensorType, SyncerError, Timestamp, CAPTURE_FILE_PATTERN};
use regex::Regex;

/// Fields extracted from a matching capture file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName {
    /// Viewer frame sequence number (not used for grouping)
    pub frame_seq: u64,
    /// Grouping key
    pub timestamp: Timestamp,
    /// Sensor owning the file
    pub sensor: SensorType,
}

/// Why a file name was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Does not follow `<seq>-<timestamp>_<a>_<b>_<c>.<ext>`
    Pattern,
    /// Sequence or timestamp has non-ASCII digits
    InvalidNumber,
    /// Sequence or timestamp does not fit in `u64`
    Overflow,
    /// Well-formed, but the suffix belongs to no configured sensor
    UnknownSuffix,
}

/// Compiled file name matcher.
#[derive(Debug, Clone)]
pub struct FilenamePattern {
    regex: Regex,
    suffixes: SensorSuffixes,
}

impl FilenamePattern {
    /// Compile the capture file pattern for the given sensor suffixes.
    pub fn new(suffixes: SensorSuffixes) -> Result<Self, SyncerError> {
        let regex = Regex::new(CAPTURE_FILE_PATTERN)
            .map_err(|e| SyncerError::config_parse(format!("invalid file pattern: {e}")))?;
        Ok(Self { regex, suffixes })
    }

    /// Parse a bare file name (no directory part).
    pub fn parse(&self, file_name: &str) -> Result<ParsedName, Rejection> {
        let caps = self.regex.captures(file_name).ok_or(Rejection::Pattern)?;

        let frame_seq = parse_number(&caps[1])?;
        let timestamp: Timestamp = parse_number(&caps[2])?;
        let sensor = self
            .suffixes
            .sensor_for(&caps[3])
            .ok_or(Rejection::UnknownSuffix)?;

        Ok(ParsedName {
            frame_seq,
            timestamp,
            sensor,
        })
    }
}

/// `\d` in the pattern also matches non-ASCII digits, which `u64` rejects.
fn parse_number(digits: &str) -> Result<u64, Rejection> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::InvalidNumber);
    }
    digits.parse().map_err(|_| Rejection::Overflow)
}
