//! Layered error definitions
//!
//! Categorized by source: config / scan / sync / materialize / report

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum SyncerError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Scan Errors =====
    /// Input directory missing or not a directory
    #[error("cannot find input path: {}", .path.display())]
    InputPathNotFound { path: PathBuf },

    /// No file in the input directory matched the naming pattern
    #[error("no capture files found in {} ({scanned} entries scanned)", .path.display())]
    NoInputFound { path: PathBuf, scanned: u64 },

    // ===== Sync Errors =====
    /// Record set empty or inconsistent
    #[error("synchronization failed: {message}")]
    SynchronizationFailed { message: String },

    // ===== Materialize Errors =====
    /// Copying a capture file failed
    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the report failed
    #[error("failed to write report {}: {source}", .path.display())]
    ReportWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncerError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn input_path_not_found(path: &Path) -> Self {
        Self::InputPathNotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn no_input_found(path: &Path, scanned: u64) -> Self {
        Self::NoInputFound {
            path: path.to_path_buf(),
            scanned,
        }
    }

    pub fn synchronization_failed(message: impl Into<String>) -> Self {
        Self::SynchronizationFailed {
            message: message.into(),
        }
    }

    pub fn copy_failed(from: &Path, to: &Path, source: std::io::Error) -> Self {
        Self::CopyFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    }

    pub fn report_write_failed(path: &Path, source: std::io::Error) -> Self {
        Self::ReportWriteFailed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for conditions caused by the input data rather than the system.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InputPathNotFound { .. } | Self::NoInputFound { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SyncerError>;
