//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `SyncerConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("frame_syncer.toml")).unwrap();
//! println!("Report: {}", config.output.report_path.display());
//! ```

mod parser;
mod validator;

pub use contracts::SyncerConfig;
pub use parser::ConfigFormat;

use contracts::SyncerError;
use std::fs;
use std::path::Path;

/// Configuration loader
///
/// 文件 → 格式推断 → 解析 → 校验。CLI 覆盖之后再单独调 [`ConfigLoader::validate`]。
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate the configuration file at `path`.
    ///
    /// The format comes from the extension (`.toml` / `.json`).
    ///
    /// # Errors
    /// `ConfigParse` for an unknown extension, an unreadable file or bad
    /// syntax; `ConfigValidation` when the values are unusable.
    pub fn load_from_path(path: &Path) -> Result<SyncerConfig, SyncerError> {
        let format = ConfigFormat::of_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| SyncerError::ConfigParse {
            message: format!("cannot read {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
        Self::load_from_str(&content, format)
    }

    /// Parse `content` as `format` and validate the result.
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<SyncerConfig, SyncerError> {
        let config = format.parse(content)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate an already built configuration (e.g. after CLI overrides)
    pub fn validate(config: &SyncerConfig) -> Result<(), SyncerError> {
        validator::validate(config)
    }

    /// Serialize `config` in `format`
    pub fn render(config: &SyncerConfig, format: ConfigFormat) -> Result<String, SyncerError> {
        format.render(config)
    }
}
