//! # Frame Syncer CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 参数解析（参数个数不对时打印用法并以 0 退出）
//! - 配置加载与 CLI 覆盖
//! - 扫描 → 同步 → 落盘 → 报告 的管道编排

mod cli;
mod commands;
mod pipeline;

use anyhow::Result;
use tracing::info;

use cli::{Cli, Parsed};
use commands::{classify_failure, run_pipeline, Failure};
use observability::LoggingConfig;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = match cli::parse_from(std::env::args_os()) {
        Parsed::Run(cli) => cli,
        Parsed::Usage => {
            println!("{}", cli::usage_text());
            std::process::exit(0);
        }
        Parsed::Exit(e) => e.exit(),
    };

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Frame Syncer starting"
    );

    let Err(e) = run_pipeline(&cli) else {
        return Ok(());
    };

    match classify_failure(&e) {
        Failure::Expected(message) => {
            // 输入问题：只打印一行，不带错误链
            tracing::warn!(reason = %message, "Nothing to synchronize");
            eprintln!("{message}");
            std::process::exit(1);
        }
        Failure::Unexpected(chain) => {
            tracing::error!(error = %chain, "Run failed");
            Err(e)
        }
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_logging(&LoggingConfig {
        format: cli.log_format.into(),
        verbosity: cli.verbose,
        quiet: cli.quiet,
    })
}
