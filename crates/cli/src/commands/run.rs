//! Run command implementation.

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::{SyncerConfig, SyncerError};
use tracing::info;

use crate::cli::Cli;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute one synchronization run
pub fn run_pipeline(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    info!(
        input = %cli.input_path.display(),
        output = %cli.output_path.display(),
        report = %config.output.report_path.display(),
        frame_index_width = config.output.frame_index_width,
        dry_run = cli.dry_run,
        "Configuration loaded"
    );

    // Recorder must exist before the stages record anything
    let metrics = match config.metrics.textfile_path {
        Some(_) => Some(observability::install_prometheus_recorder()?),
        None => None,
    };

    let pipeline = Pipeline::new(PipelineConfig {
        input_dir: cli.input_path.clone(),
        output_dir: cli.output_path.clone(),
        config: config.clone(),
        dry_run: cli.dry_run,
    });
    let stats = pipeline.run()?;

    if cli.json {
        let json =
            serde_json::to_string_pretty(&stats).context("Failed to serialize run summary")?;
        println!("{}", json);
    } else if !cli.quiet {
        stats.print_summary();
    }

    if let (Some(handle), Some(path)) = (metrics, config.metrics.textfile_path.as_deref()) {
        observability::write_textfile(&handle, path)?;
    }

    info!(
        frames = stats.materialize.frames,
        files = stats.materialize.files_copied,
        "FINISHED. Total {} frames ({} files) converted",
        stats.materialize.frames,
        stats.materialize.files_copied
    );
    Ok(())
}

/// How a failed run is reported to the user
#[derive(Debug, PartialEq, Eq)]
pub enum Failure {
    /// Missing or empty input; the bare message is enough
    Expected(String),
    /// Everything else, with the full context chain
    Unexpected(String),
}

/// Classify a run error by the [`SyncerError`] underneath its context.
pub fn classify_failure(e: &anyhow::Error) -> Failure {
    match e.downcast_ref::<SyncerError>() {
        Some(err) if err.is_expected() => Failure::Expected(err.to_string()),
        _ => Failure::Unexpected(format!("{e:#}")),
    }
}

/// Config file (if any) with CLI overrides applied, validated.
fn load_config(cli: &Cli) -> Result<SyncerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => SyncerConfig::default(),
    };

    // Apply CLI overrides
    if let Some(ref report) = cli.report {
        info!(report = %report.display(), "Overriding report path from CLI");
        config.output.report_path = report.clone();
    }
    if let Some(width) = cli.frame_index_width {
        info!(width, "Overriding frame index width from CLI");
        config.output.frame_index_width = width;
    }
    if let Some(ref metrics_file) = cli.metrics_file {
        config.metrics.textfile_path = Some(metrics_file.clone());
    }

    ConfigLoader::validate(&config).context("Invalid configuration")?;
    Ok(config)
}
