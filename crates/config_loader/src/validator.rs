//! 配置校验模块
//!
//! 校验规则：
//! - 传感器后缀非空且互不相同
//! - 后缀形状满足 `\w+_\w+_\w+\.\w+` (否则永远无法匹配输入文件名)
//! - frame_index_width 在 1..=20 之间
//! - report_path / metrics.textfile_path 非空

use std::collections::HashSet;

use contracts::{SensorType, SyncerConfig, SyncerError, SENSOR_SUFFIX_PATTERN};
use regex::Regex;

/// u64 的最大十进制位数
const MAX_FRAME_INDEX_WIDTH: usize = 20;

/// 校验 SyncerConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &SyncerConfig) -> Result<(), SyncerError> {
    validate_sensor_suffixes(config)?;
    validate_output(config)?;
    validate_metrics(config)?;
    Ok(())
}

/// 校验传感器后缀
fn validate_sensor_suffixes(config: &SyncerConfig) -> Result<(), SyncerError> {
    let shape = Regex::new(SENSOR_SUFFIX_PATTERN)
        .map_err(|e| SyncerError::config_parse(format!("invalid suffix pattern: {e}")))?;

    let mut seen = HashSet::new();
    for sensor in SensorType::ALL {
        let suffix = config.sensors.get(sensor);
        let field = format!("sensors.{sensor}");

        if suffix.is_empty() {
            return Err(SyncerError::config_validation(
                field,
                "suffix cannot be empty",
            ));
        }

        if !shape.is_match(suffix) {
            return Err(SyncerError::config_validation(
                field,
                format!(
                    "suffix '{suffix}' must look like <word>_<word>_<word>.<ext>"
                ),
            ));
        }

        if !seen.insert(suffix) {
            return Err(SyncerError::config_validation(
                field,
                format!("duplicate suffix '{suffix}'"),
            ));
        }
    }
    Ok(())
}

/// 校验输出配置
fn validate_output(config: &SyncerConfig) -> Result<(), SyncerError> {
    let width = config.output.frame_index_width;
    if width == 0 || width > MAX_FRAME_INDEX_WIDTH {
        return Err(SyncerError::config_validation(
            "output.frame_index_width",
            format!("frame_index_width must be in 1..={MAX_FRAME_INDEX_WIDTH}, got {width}"),
        ));
    }

    if config.output.report_path.as_os_str().is_empty() {
        return Err(SyncerError::config_validation(
            "output.report_path",
            "report_path cannot be empty",
        ));
    }
    Ok(())
}

/// 校验指标导出配置
fn validate_metrics(config: &SyncerConfig) -> Result<(), SyncerError> {
    if let Some(path) = &config.metrics.textfile_path {
        if path.as_os_str().is_empty() {
            return Err(SyncerError::config_validation(
                "metrics.textfile_path",
                "textfile_path cannot be empty",
            ));
        }
    }
    Ok(())
}
