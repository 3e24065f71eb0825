//! # Observability
//!
//! 可观测性模块：Tracing + Prometheus 指标。
//!
//! ## 功能
//!
//! - Tracing 初始化 (JSON/Pretty/Compact 格式)
//! - Prometheus 指标录制，运行结束时写入 textfile
//! - 帧间隔等在线统计
//!
//! ## 使用示例
//!
//! ```no_run
//! use observability::{init_logging, LogFormat, LoggingConfig};
//!
//! init_logging(&LoggingConfig {
//!     format: LogFormat::Compact,
//!     verbosity: 1,
//!     quiet: false,
//! })?;
//!
//! let metrics = observability::install_prometheus_recorder()?;
//! // ... run the pipeline ...
//! observability::write_textfile(&metrics, std::path::Path::new("frame_syncer.prom"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod metrics;

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Re-exports
pub use crate::metrics::{
    describe_metrics, install_prometheus_recorder, write_textfile, RunningStats, StatsSummary,
};
pub use metrics_exporter_prometheus::PrometheusHandle;

/// 日志格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 结构化日志
    Json,
    /// 人类可读格式
    #[default]
    Pretty,
    /// 紧凑单行格式
    Compact,
}

/// 日志配置
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfig {
    /// 输出格式
    pub format: LogFormat,
    /// `-v` 次数 (0 = info, 1 = debug, 2+ = trace)
    pub verbosity: u8,
    /// 只输出 warn 及以上
    pub quiet: bool,
}

impl LoggingConfig {
    /// 默认过滤级别；`RUST_LOG` 优先（quiet 除外）
    pub fn default_directive(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    fn filter(&self) -> EnvFilter {
        if self.quiet {
            EnvFilter::new(self.default_directive())
        } else {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
        }
    }
}

/// 初始化 Tracing
///
/// 日志写到 stderr，stdout 留给运行摘要和 `--json` 输出。
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!(
        log_format = ?config.format,
        verbosity = config.verbosity,
        "Logging initialized"
    );
    Ok(())
}
