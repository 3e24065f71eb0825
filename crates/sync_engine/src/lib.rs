//! # Sync Engine
//!
//! 帧同步引擎。
//!
//! 负责：
//! - 按时间戳数值升序排列记录
//! - 只为传感器齐全的记录分配连续帧号 `0..K`
//! - 输出 `SyncSummary`
//!
//! ## 使用示例
//!
//! ```no_run
//! use contracts::SensorSuffixes;
//! use ingestion::Scanner;
//! use sync_engine::FrameSynchronizer;
//! use std::path::Path;
//!
//! let mut set = Scanner::new(SensorSuffixes::default())
//!     .unwrap()
//!     .scan(Path::new("captures"))
//!     .unwrap();
//! let summary = FrameSynchronizer::new().synchronize(&mut set).unwrap();
//! println!("{} complete, {} partial", summary.complete, summary.partial);
//! ```

mod engine;
mod summary;

pub use engine::FrameSynchronizer;
pub use summary::SyncSummary;
