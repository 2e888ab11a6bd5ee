//! CLI command implementations

use crate::output::{self, ConsoleProgress};
use crate::ReportFormat;
use anyhow::Context;
use drmcheck_core::{
    format_clock, read_rows, render_html, render_json, AuditConfig, Dispatcher, ReportOptions,
    Summary,
};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Audit every manifest URL in a CSV and write the report
pub async fn audit(
    csv: &Path,
    report_path: &Path,
    format: ReportFormat,
    config: AuditConfig,
) -> anyhow::Result<Summary> {
    let start = Instant::now();

    let rows = read_rows(csv).with_context(|| format!("reading {}", csv.display()))?;
    println!("Loaded {} rows from {}", rows.len(), csv.display());

    let dispatcher = Dispatcher::http(config)?;
    let progress = ConsoleProgress::new();
    let results = dispatcher.run_with_progress(&rows, &progress).await?;
    progress.finish();

    let summary = Summary::from_results(&results);
    info!(
        rows = summary.rows,
        protected = summary.protected,
        errors = summary.errors,
        "Audit finished"
    );

    match format {
        ReportFormat::Html => {
            let html = render_html(&rows, &results, &ReportOptions::default())?;
            std::fs::write(report_path, html)
                .with_context(|| format!("writing {}", report_path.display()))?;
        }
        ReportFormat::Json => {
            let json = render_json(&rows, &results)?;
            std::fs::write(report_path, json)
                .with_context(|| format!("writing {}", report_path.display()))?;
        }
        ReportFormat::Table => {
            println!("{}", output::results_table(&rows, &results));
        }
    }

    println!();
    println!("{}", output::summary_line(&summary));
    println!("Process completed in {}", format_clock(start.elapsed()));
    if format != ReportFormat::Table {
        println!("Report generated: {}", report_path.display());
    }

    Ok(summary)
}
