//! 指标模块
//!
//! 各阶段直接通过 `metrics` 宏记录；这里负责描述指标、安装 Prometheus
//! recorder，并在批处理结束时把 exposition 写成 textfile。

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;

/// 注册指标说明 (HELP 行)
pub fn describe_metrics() {
    describe_counter!(
        "frame_syncer_files_scanned_total",
        "Directory entries visited by the scanner"
    );
    describe_counter!(
        "frame_syncer_files_skipped_total",
        "Entries not matching the capture naming pattern"
    );
    describe_counter!(
        "frame_syncer_files_duplicate_total",
        "Second file for an already seen timestamp and sensor"
    );
    describe_gauge!("frame_syncer_records", "Distinct timestamps in the input");
    describe_gauge!(
        "frame_syncer_frames_complete",
        "Timestamps holding every sensor of the run"
    );
    describe_gauge!(
        "frame_syncer_frames_partial",
        "Timestamps missing at least one sensor"
    );
    describe_counter!(
        "frame_syncer_sensor_missing_total",
        "Partial timestamps lacking a given sensor"
    );
    describe_counter!("frame_syncer_files_copied_total", "Files written to the output directory");
    describe_counter!(
        "frame_syncer_bytes_copied_total",
        Unit::Bytes,
        "Bytes written to the output directory"
    );
}

/// 安装全局 Prometheus recorder（不启动 HTTP listener）
///
/// 每个进程只能安装一次。
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    describe_metrics();

    tracing::debug!("Prometheus recorder installed");
    Ok(handle)
}

/// 将当前指标渲染为 Prometheus 文本格式写入 `path`
pub fn write_textfile(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, handle.render())
        .with_context(|| format!("Failed to write metrics textfile {}", path.display()))?;

    tracing::info!(path = %path.display(), "Metrics textfile written");
    Ok(())
}

/// 统计摘要
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.1}, max={:.1}, mean={:.1}, std={:.1} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
///
/// 用于统计相邻完整帧之间的时间戳间隔。
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 从一组样本构建
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Self {
        let mut stats = Self::default();
        for value in samples {
            stats.push(value);
        }
        stats
    }

    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}
