//! Pipeline statistics.

use std::path::PathBuf;
use std::time::Duration;

use contracts::ScanStats;
use materializer::MaterializeSummary;
use observability::StatsSummary;
use serde::Serialize;
use sync_engine::SyncSummary;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub dry_run: bool,

    /// Scanner counters
    pub scan: ScanStats,

    /// Synchronizer result
    pub sync: SyncSummary,

    /// Materializer result
    pub materialize: MaterializeSummary,

    /// Timestamp rows in the report
    pub report_rows: usize,

    /// Timestamp gap between consecutive frames
    pub frame_interval: StatsSummary,

    /// Total duration of the pipeline run
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl PipelineStats {
    /// Complete frames per second of wall time
    pub fn fps(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.materialize.frames as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   Frame Sync Statistics                      ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Input: {}", self.input_dir.display());
        println!("   ├─ Output: {}", self.output_dir.display());
        println!("   ├─ Report: {}", self.report_path.display());
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   └─ Frames/s: {:.2}", self.fps());

        println!("\n🔎 Scan");
        println!("   ├─ Entries seen: {}", self.scan.entries_seen);
        println!("   ├─ Files matched: {}", self.scan.files_matched);
        println!("   ├─ Skipped: {}", self.scan.files_skipped);
        println!("   └─ Duplicates: {}", self.scan.duplicates);

        println!("\n📈 Synchronization");
        println!("   ├─ Timestamps: {}", self.sync.records);
        println!("   ├─ Sensor mask: {}", self.sync.full_mask);
        println!(
            "   ├─ Complete: {} ({:.2}%)",
            self.sync.complete,
            self.sync.completeness() * 100.0
        );
        println!("   ├─ Partial: {}", self.sync.partial);
        println!("   └─ Frame interval: {}", self.frame_interval);

        if !self.sync.missing_per_sensor.is_empty() {
            println!("\n⚠️  Missing Sensor Counts");
            for (sensor, count) in &self.sync.missing_per_sensor {
                println!("   ├─ {}: {}", sensor, count);
            }
        }

        println!("\n💾 Output");
        if self.dry_run {
            println!("   ├─ Dry run: nothing copied");
        }
        println!("   ├─ Frames: {}", self.materialize.frames);
        println!("   ├─ Files copied: {}", self.materialize.files_copied);
        println!("   └─ Bytes copied: {}", self.materialize.bytes_copied);

        println!();
    }
}
