//! # Materializer
//!
//! 帧落盘与报告模块。
//!
//! 负责：
//! - 按帧号顺序把完整帧交给 sinks
//! - `CopySink` 以 `{frame_index:08}_<suffix>` 重命名复制文件
//! - 生成定宽逗号分隔的同步报告

pub mod handle;
pub mod materializer;
pub mod naming;
pub mod report;
pub mod sinks;

pub use contracts::{CompleteFrame, FrameSink, SinkWrite};
pub use handle::{SinkHandle, SinkMetrics};
pub use materializer::{MaterializeSummary, Materializer, MaterializerBuilder, MaterializerConfig};
pub use naming::output_file_name;
pub use report::{render_report, write_report};
pub use sinks::{CopySink, LogSink};
