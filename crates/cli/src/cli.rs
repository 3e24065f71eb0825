//! CLI argument definitions using clap.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Frame Syncer - re-index depth camera captures into synchronized frames
#[derive(Parser, Debug)]
#[command(
    name = "frame-syncer",
    author,
    version,
    about = "Synchronize RGB / flood / spot captures into frame-indexed files",
    long_about = "Groups capture files named <frameSeq>-<timestamp>_<suffix> by timestamp,\n\
                  keeps the timestamps for which every sensor produced a file, and copies\n\
                  them to OUTPUT_PATH as <frameIndex>_<suffix> in ascending timestamp order.\n\
                  A per-timestamp report is written to ./report.csv."
)]
pub struct Cli {
    /// Directory holding the raw capture files
    pub input_path: PathBuf,

    /// Directory receiving the frame-indexed copies
    pub output_path: PathBuf,

    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "FRAME_SYNCER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the report location
    #[arg(long, env = "FRAME_SYNCER_REPORT")]
    pub report: Option<PathBuf>,

    /// Override the zero-padded width of output frame indices
    #[arg(long, env = "FRAME_SYNCER_FRAME_INDEX_WIDTH")]
    pub frame_index_width: Option<usize>,

    /// Write Prometheus metrics to this file when the run ends
    #[arg(long, env = "FRAME_SYNCER_METRICS_FILE")]
    pub metrics_file: Option<PathBuf>,

    /// Scan, synchronize and write the report without copying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "FRAME_SYNCER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        env = "FRAME_SYNCER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

/// Result of parsing the command line
#[derive(Debug)]
pub enum Parsed {
    /// Arguments are usable
    Run(Box<Cli>),
    /// Wrong number of positional arguments
    Usage,
    /// Help, version or a malformed option; clap prints and exits
    Exit(clap::Error),
}

/// Parse `args`, mapping a wrong argument count to [`Parsed::Usage`].
pub fn parse_from<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Parsed::Run(Box::new(cli)),
        Err(e) => match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Parsed::Usage,
            // 多出来的位置参数才算用法错误；拼错的 flag 交给 clap 报错
            ErrorKind::UnknownArgument if !is_flag(&e) => Parsed::Usage,
            _ => Parsed::Exit(e),
        },
    }
}

fn is_flag(e: &clap::Error) -> bool {
    matches!(
        e.get(ContextKind::InvalidArg),
        Some(ContextValue::String(arg)) if arg.starts_with('-')
    )
}

/// Banner and usage line printed for a wrong argument count.
pub fn usage_text() -> String {
    let mut command = Cli::command();
    format!(
        "frame-syncer {} - depth camera frame synchronizer\n\n{}\n\nRun with --help for all options.",
        env!("CARGO_PKG_VERSION"),
        command.render_usage()
    )
}
