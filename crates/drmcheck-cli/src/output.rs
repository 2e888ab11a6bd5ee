//! Output formatting for CLI

use console::style;
use drmcheck_core::{ProgressEvent, ProgressSink, Row, RowResult, Summary};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::{settings::Style, Table, Tabled};

/// Progress bar plus one log line per completed request
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let template = ProgressStyle::with_template("{bar:40.magenta/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(template);
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_progress(&self, event: &ProgressEvent) {
        self.bar.set_length(event.total as u64);
        self.bar.set_position(event.completed as u64);
        self.bar.set_message(format!("ETA {}", drmcheck_core::format_clock(event.eta)));
        self.bar.println(event.to_string());
    }
}

#[derive(Tabled)]
struct ResultLine {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Row")]
    label: String,
    #[tabled(rename = "DRM (primary)")]
    primary_status: String,
    #[tabled(rename = "Type")]
    primary_type: String,
    #[tabled(rename = "DRM (timeshift)")]
    timeshift_status: String,
    #[tabled(rename = "Type")]
    timeshift_type: String,
}

/// Render results as a console table
pub fn results_table(rows: &[Row], results: &[RowResult]) -> String {
    let lines = rows.iter().zip(results).map(|(row, result)| {
        let designated = [result.primary.column.as_str(), result.timeshift.column.as_str()];
        let label = row
            .fields()
            .iter()
            .find(|(column, _)| !designated.contains(&column.as_str()))
            .map(|(_, value)| value.clone())
            .unwrap_or_default();

        ResultLine {
            number: result.index + 1,
            label,
            primary_status: result.primary.verdict.status().to_string(),
            primary_type: result.primary.verdict.manifest_type().to_string(),
            timeshift_status: result.timeshift.verdict.status().to_string(),
            timeshift_type: result.timeshift.verdict.manifest_type().to_string(),
        }
    });

    Table::new(lines).with(Style::rounded()).to_string()
}

/// One-line run summary
pub fn summary_line(summary: &Summary) -> String {
    format!(
        "Rows: {}  Checked: {}  DRM: {}  No DRM: {}  Errors: {}  Not applicable: {}",
        summary.rows,
        summary.checked(),
        style(summary.protected).green().bold(),
        style(summary.clear).red().bold(),
        style(summary.errors).yellow().bold(),
        style(summary.not_applicable).dim(),
    )
}
