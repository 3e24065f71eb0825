//! Pipeline orchestrator - scan, synchronize, materialize, report.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::SyncerConfig;
use ingestion::Scanner;
use materializer::{write_report, MaterializerBuilder, MaterializerConfig};
use observability::RunningStats;
use sync_engine::FrameSynchronizer;
use tracing::{info, instrument, warn};

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the raw captures
    pub input_dir: PathBuf,

    /// Directory receiving the frame-indexed copies
    pub output_dir: PathBuf,

    /// Loaded and validated configuration
    pub config: SyncerConfig,

    /// Skip copying and directory creation
    pub dry_run: bool,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every stage once.
    ///
    /// The output directory is only touched after scanning and
    /// synchronization succeeded.
    #[instrument(
        name = "pipeline_run",
        skip(self),
        fields(input = %self.config.input_dir.display(), output = %self.config.output_dir.display())
    )]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let PipelineConfig {
            input_dir,
            output_dir,
            config,
            dry_run,
        } = self.config;

        // 1. Scan
        let scanner = Scanner::new(config.sensors.clone()).context("Invalid sensor suffixes")?;
        let mut set = scanner
            .scan(&input_dir)
            .with_context(|| format!("Failed to scan {}", input_dir.display()))?;

        // 2. Synchronize
        let sync = FrameSynchronizer::new()
            .synchronize(&mut set)
            .context("Failed to synchronize captures")?;
        if sync.complete == 0 {
            warn!(
                records = sync.records,
                full_mask = %sync.full_mask,
                "No timestamp holds every sensor, nothing to copy"
            );
        }

        // 3. Materialize
        if dry_run {
            info!("Dry run - nothing will be copied");
        }
        let materialized = MaterializerBuilder::new(MaterializerConfig::new(&output_dir))
            .frame_index_width(config.output.frame_index_width)
            .suffixes(config.sensors.clone())
            .dry_run(dry_run)
            .build()
            .run(&set)
            .with_context(|| format!("Failed to materialize frames into {}", output_dir.display()))?;

        // 4. Report
        let report_path = config.output.report_path.clone();
        let report_rows = write_report(&report_path, &set, &input_dir, &output_dir)
            .context("Failed to write report")?;

        let intervals = RunningStats::from_samples(
            set.complete_records()
                .windows(2)
                .map(|w| (w[1].timestamp - w[0].timestamp) as f64),
        );

        Ok(PipelineStats {
            input_dir,
            output_dir,
            report_path,
            dry_run,
            scan: set.scan_stats,
            sync,
            materialize: materialized,
            report_rows,
            frame_interval: intervals.summary(),
            duration: start_time.elapsed(),
        })
    }
}
