//! DRM Check CLI - Manifest DRM audit tool
//!
//! Features:
//! - CSV channel list ingestion
//! - Concurrent manifest classification (DASH/HLS)
//! - Live progress with ETA
//! - HTML, JSON, or table reports

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

mod commands;
mod output;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Html,
    Json,
    Table,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// DRM Check - audit streaming manifests for content protection
#[derive(Parser)]
#[command(name = "drmcheck")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Audit HLS/DASH manifest URLs from a CSV for DRM signaling", long_about = None)]
struct Cli {
    /// CSV file with URL and TIMESHIFT_URL columns
    csv: PathBuf,

    /// Report output path
    #[arg(short, long, default_value = "report.html")]
    output: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "html")]
    format: ReportFormat,

    /// Number of concurrent requests
    #[arg(short, long, default_value_t = drmcheck_core::config::DEFAULT_MAX_WORKERS)]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Column holding the primary manifest URL
    #[arg(long, default_value = drmcheck_core::config::DEFAULT_URL_COLUMN)]
    url_column: String,

    /// Column holding the timeshift manifest URL
    #[arg(long, default_value = drmcheck_core::config::DEFAULT_TIMESHIFT_COLUMN)]
    timeshift_column: String,

    /// Exit with status 1 if any URL could not be checked
    #[arg(long)]
    fail_on_error: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

impl Cli {
    fn audit_config(&self) -> drmcheck_core::AuditConfig {
        drmcheck_core::AuditConfig {
            max_workers: self.workers,
            request_timeout: Duration::from_secs(self.timeout),
            url_column: self.url_column.clone(),
            timeshift_column: self.timeshift_column.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    drmcheck_core::init();

    let config = cli.audit_config();
    let summary = commands::audit(&cli.csv, &cli.output, cli.format, config).await?;

    if cli.fail_on_error && summary.errors > 0 {
        eprintln!("{} URL(s) could not be checked", summary.errors);
        std::process::exit(1);
    }

    Ok(())
}
