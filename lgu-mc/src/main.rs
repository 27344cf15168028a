//! lgu-mc (Mapping Check) - Read-only mapping consistency report
//!
//! Reads the store location from DATABASE_URL, prints the report on stdout and
//! exits non-zero on any store or configuration failure.

use clap::Parser;
use lgu_common::config::load_check_config;
use lgu_mc::{render_report, run_check};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Mapping consistency check
#[derive(Parser, Debug)]
#[clap(name = "lgu-mc", version)]
#[clap(about = "Verify poem/mapping consistency and report chapter statistics")]
struct Args {
    /// Also write the structured report as JSON
    #[clap(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Settings carry the default log level, so load them before tracing init
    let config = load_check_config();
    let log_level = config
        .as_ref()
        .map(|c| c.settings.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting Lugarden mapping check (lgu-mc) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = match run_check(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!("Mapping check failed: {}", e);
            eprintln!("✗ Mapping check failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", render_report(&report));

    if let Some(path) = args.export {
        match report.export_json(&path) {
            Ok(()) => println!("\n✓ Report exported to: {}", path.display()),
            Err(e) => {
                error!("Failed to export report: {}", e);
                eprintln!("✗ Failed to export report to {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
