//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 扫描 → 同步 → 落盘 → 报告 的端到端测试

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{SensorSuffixes, SensorType, SyncerConfig, CAPTURE_FILE_PATTERN};

    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(CAPTURE_FILE_PATTERN, r"^(\d+)-(\d+)_(\w+_\w+_\w+\.\w+)$");
    }

    #[test]
    fn test_default_suffixes() {
        let suffixes = SensorSuffixes::default();
        assert_eq!(suffixes.get(SensorType::Rgb), "rgb_gray_img.png");
        assert_eq!(suffixes.get(SensorType::Flood), "flood_depth_pc.exr");
        assert_eq!(suffixes.get(SensorType::Spot), "spot_depth_pc.exr");
    }

    #[test]
    fn test_default_config_snapshot() {
        let toml = ConfigLoader::render(&SyncerConfig::default(), ConfigFormat::Toml).unwrap();
        assert!(toml.contains("frame_index_width = 8"), "got:\n{toml}");
        assert!(toml.contains("report_path = \"./report.csv\""), "got:\n{toml}");

        let back = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        assert_eq!(back, SyncerConfig::default());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;

    use contracts::{SensorSuffixes, SyncerError};
    use ingestion::Scanner;
    use materializer::{write_report, MaterializeSummary, MaterializerBuilder, MaterializerConfig};
    use rand::seq::SliceRandom;
    use sync_engine::{FrameSynchronizer, SyncSummary};
    use tempfile::tempdir;

    const RGB: &str = "rgb_gray_img.png";
    const FLOOD: &str = "flood_depth_pc.exr";
    const SPOT: &str = "spot_depth_pc.exr";

    fn capture(dir: &Path, seq: u64, ts: u64, suffix: &str) {
        let name = format!("{seq}-{ts}_{suffix}");
        fs::write(dir.join(&name), &name).unwrap();
    }

    #[derive(Debug)]
    struct Run {
        sync: SyncSummary,
        materialized: MaterializeSummary,
    }

    /// scan → synchronize → materialize → report, as the binary does.
    fn run(
        input: &Path,
        output: &Path,
        report: &Path,
        suffixes: SensorSuffixes,
        dry_run: bool,
    ) -> Result<Run, SyncerError> {
        let mut set = Scanner::new(suffixes.clone())?.scan(input)?;
        let sync = FrameSynchronizer::new().synchronize(&mut set)?;
        let materialized = MaterializerBuilder::new(MaterializerConfig::new(output))
            .suffixes(suffixes)
            .dry_run(dry_run)
            .build()
            .run(&set)?;
        write_report(report, &set, input, output)?;
        Ok(Run { sync, materialized })
    }

    fn run_default(input: &Path, output: &Path, report: &Path) -> Result<Run, SyncerError> {
        run(input, output, report, SensorSuffixes::default(), false)
    }

    fn names_in(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect()
    }

    /// 100 (rgb+flood) / 200 (all) / 300 (rgb): only 200 becomes frame 0.
    #[test]
    fn test_e2e_partial_and_complete() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");
        let report = work.path().join("report.csv");

        capture(input.path(), 1, 100, RGB);
        capture(input.path(), 1, 100, FLOOD);
        capture(input.path(), 2, 200, RGB);
        capture(input.path(), 2, 200, FLOOD);
        capture(input.path(), 2, 200, SPOT);
        capture(input.path(), 3, 300, RGB);

        let result = run_default(input.path(), &output, &report).unwrap();

        assert_eq!(result.sync.full_mask.bits(), 0x07);
        assert_eq!(result.sync.complete, 1);
        assert_eq!(result.materialized.files_copied, 3);
        assert_eq!(
            names_in(&output),
            BTreeSet::from([
                "00000000_rgb_gray_img.png".to_string(),
                "00000000_flood_depth_pc.exr".to_string(),
                "00000000_spot_depth_pc.exr".to_string(),
            ])
        );
        assert_eq!(
            fs::read_to_string(output.join("00000000_flood_depth_pc.exr")).unwrap(),
            "2-200_flood_depth_pc.exr"
        );

        let content = fs::read_to_string(&report).unwrap();
        let rows: Vec<&str> = content.lines().skip(3).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].trim_start().starts_with(",") && rows[0].contains("100"));
        assert!(rows[1].trim_start().starts_with("0,") && rows[1].contains("200"));
        assert!(rows[2].trim_start().starts_with(",") && rows[2].contains("300"));
    }

    #[test]
    fn test_e2e_empty_input_creates_no_output() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");
        let report = work.path().join("report.csv");

        let err = run_default(input.path(), &output, &report).unwrap_err();

        assert!(matches!(err, SyncerError::NoInputFound { .. }));
        assert!(!output.exists());
        assert!(!report.exists());
    }

    #[test]
    fn test_e2e_missing_input() {
        let work = tempdir().unwrap();
        let output = work.path().join("out");

        let err = run_default(&work.path().join("nope"), &output, &work.path().join("r.csv"))
            .unwrap_err();

        assert!(matches!(err, SyncerError::InputPathNotFound { .. }));
        assert!(!output.exists());
    }

    /// Frame indices follow the numeric timestamp, not the order the files
    /// were written or listed: 500 is captured to disk before 300, yet 300
    /// becomes frame 0 and 500 frame 1.
    #[test]
    fn test_e2e_frame_order_follows_timestamp_value() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");

        for suffix in [RGB, FLOOD, SPOT] {
            capture(input.path(), 1, 500, suffix);
        }
        for suffix in [RGB, FLOOD, SPOT] {
            capture(input.path(), 2, 300, suffix);
        }

        run_default(input.path(), &output, &work.path().join("report.csv")).unwrap();

        assert_eq!(
            fs::read_to_string(output.join("00000000_rgb_gray_img.png")).unwrap(),
            "2-300_rgb_gray_img.png"
        );
        assert_eq!(
            fs::read_to_string(output.join("00000001_rgb_gray_img.png")).unwrap(),
            "1-500_rgb_gray_img.png"
        );
    }

    #[test]
    fn test_e2e_shuffled_creation_order() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");

        // 9 < 10 < 100 numerically but not lexicographically
        let mut files: Vec<(u64, u64, &str)> = Vec::new();
        for (seq, ts) in [(1u64, 9u64), (2, 10), (3, 100), (4, 1000)] {
            for suffix in [RGB, FLOOD, SPOT] {
                files.push((seq, ts, suffix));
            }
        }
        files.shuffle(&mut rand::rng());
        for (seq, ts, suffix) in files {
            capture(input.path(), seq, ts, suffix);
        }

        let result = run_default(input.path(), &output, &work.path().join("report.csv")).unwrap();

        assert_eq!(result.sync.complete, 4);
        for (index, seq_ts) in ["1-9", "2-10", "3-100", "4-1000"].iter().enumerate() {
            assert_eq!(
                fs::read_to_string(output.join(format!("{index:08}_{SPOT}"))).unwrap(),
                format!("{seq_ts}_{SPOT}")
            );
        }
    }

    /// Every complete record keeps its suffix set through the copy.
    #[test]
    fn test_e2e_suffix_sets_preserved() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");

        // spot never captured: rgb+flood is the full set
        for ts in [40u64, 20, 60] {
            capture(input.path(), ts, ts, RGB);
            capture(input.path(), ts, ts, FLOOD);
        }
        capture(input.path(), 7, 30, RGB);

        let result = run_default(input.path(), &output, &work.path().join("report.csv")).unwrap();

        assert_eq!(result.sync.full_mask.bits(), 0x03);
        assert_eq!(result.sync.complete, 3);
        for index in 0..3 {
            let suffixes: BTreeSet<String> = names_in(&output)
                .into_iter()
                .filter_map(|n| n.strip_prefix(&format!("{index:08}_")).map(str::to_string))
                .collect();
            assert_eq!(suffixes, BTreeSet::from([RGB.to_string(), FLOOD.to_string()]));
        }
    }

    #[test]
    fn test_e2e_report_identical_across_runs() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");
        let report = work.path().join("report.csv");

        for ts in [5u64, 15, 25] {
            capture(input.path(), ts, ts, RGB);
            capture(input.path(), ts, ts, SPOT);
        }
        capture(input.path(), 15, 15, FLOOD);

        run_default(input.path(), &output, &report).unwrap();
        let first = fs::read(&report).unwrap();
        let first_names = names_in(&output);

        run_default(input.path(), &output, &report).unwrap();
        let second = fs::read(&report).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_names, names_in(&output));
    }

    #[test]
    fn test_e2e_dry_run_writes_only_report() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");
        let report = work.path().join("report.csv");

        for suffix in [RGB, FLOOD, SPOT] {
            capture(input.path(), 1, 100, suffix);
        }

        let result = run(input.path(), &output, &report, SensorSuffixes::default(), true).unwrap();

        assert_eq!(result.materialized.frames, 1);
        assert_eq!(result.materialized.files_copied, 0);
        assert!(!output.exists());
        assert!(fs::read_to_string(&report).unwrap().contains("100"));
    }

    #[test]
    fn test_e2e_custom_flood_suffix() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        let output = work.path().join("out");
        let suffixes = SensorSuffixes {
            flood: "flood_depth_pc.csv".to_string(),
            ..SensorSuffixes::default()
        };

        capture(input.path(), 1, 100, RGB);
        capture(input.path(), 1, 100, "flood_depth_pc.csv");
        // default flood suffix is no longer recognized
        capture(input.path(), 1, 100, FLOOD);

        let result = run(
            input.path(),
            &output,
            &work.path().join("report.csv"),
            suffixes,
            false,
        )
        .unwrap();

        assert_eq!(result.sync.full_mask.bits(), 0x03);
        assert_eq!(
            names_in(&output),
            BTreeSet::from([
                "00000000_rgb_gray_img.png".to_string(),
                "00000000_flood_depth_pc.csv".to_string(),
            ])
        );
    }

    #[test]
    fn test_e2e_unwritable_output_fails() {
        let input = tempdir().unwrap();
        let work = tempdir().unwrap();
        // output path is an existing file: directory creation fails
        let output = work.path().join("out");
        fs::write(&output, "not a directory").unwrap();

        capture(input.path(), 1, 100, RGB);

        let err = run_default(input.path(), &output, &work.path().join("report.csv")).unwrap_err();
        assert!(matches!(err, SyncerError::CopyFailed { .. }));
        assert!(!work.path().join("report.csv").exists());
    }
}
