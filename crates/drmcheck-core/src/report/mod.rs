//! Report rendering
//!
//! Pure functions of the input rows and the dispatcher's results:
//! - HTML document with per-row status cells
//! - JSON export for machine consumption
//! - Summary counts

mod html;
pub mod theme;

pub use html::{escape_html, render_html};
pub use theme::ReportColors;

use crate::{ColumnVerdict, DrmStatus, Error, Result, Row, RowResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Rendering options
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Document title and heading
    pub title: String,
    /// Timestamp shown in the header
    pub generated_at: DateTime<Utc>,
    pub colors: ReportColors,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "DRM Verification Report".to_string(),
            generated_at: Utc::now(),
            colors: ReportColors::default(),
        }
    }
}

/// Verdict counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub protected: usize,
    pub clear: usize,
    pub errors: usize,
    pub not_applicable: usize,
}

impl Summary {
    pub fn from_results(results: &[RowResult]) -> Self {
        let mut summary = Summary {
            rows: results.len(),
            ..Default::default()
        };
        for cv in results.iter().flat_map(|r| r.verdicts()) {
            match cv.verdict.status() {
                DrmStatus::Protected => summary.protected += 1,
                DrmStatus::Clear => summary.clear += 1,
                DrmStatus::Error => summary.errors += 1,
                DrmStatus::NotApplicable => summary.not_applicable += 1,
            }
        }
        summary
    }

    /// Number of URLs that were fetched (successfully or not)
    pub fn checked(&self) -> usize {
        self.protected + self.clear + self.errors
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    summary: Summary,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    index: usize,
    fields: &'a [(String, String)],
    verdicts: [&'a ColumnVerdict; 2],
}

/// Render rows and results as pretty-printed JSON
pub fn render_json(rows: &[Row], results: &[RowResult]) -> Result<String> {
    check_aligned(rows, results)?;

    let report = JsonReport {
        generated_at: Utc::now(),
        summary: Summary::from_results(results),
        rows: rows
            .iter()
            .zip(results)
            .map(|(row, result)| JsonRow {
                index: result.index,
                fields: row.fields(),
                verdicts: result.verdicts(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

fn check_aligned(rows: &[Row], results: &[RowResult]) -> Result<()> {
    if rows.len() != results.len() {
        return Err(Error::Internal(format!(
            "report needs one result per row ({} rows, {} results)",
            rows.len(),
            results.len()
        )));
    }
    if let Some(result) = results.iter().enumerate().find(|(i, r)| r.index != *i).map(|(_, r)| r) {
        return Err(Error::Internal(format!("result for row {} is out of order", result.index)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManifestType, Verdict};

    pub(super) fn fixture() -> (Vec<Row>, Vec<RowResult>) {
        let rows: Vec<Row> = vec![
            [("CHANNEL", "News & <Weather>"), ("URL", "https://a/news.mpd"), ("TIMESHIFT_URL", "")]
                .into_iter()
                .collect(),
            [("CHANNEL", "Sports"), ("URL", "https://a/sports.m3u8"), ("TIMESHIFT_URL", "https://down/ts.m3u8")]
                .into_iter()
                .collect(),
        ];
        let cv = |column: &str, verdict| ColumnVerdict { column: column.to_string(), verdict };
        let results = vec![
            RowResult {
                index: 0,
                primary: cv("URL", Verdict::classified(ManifestType::Mpd, true)),
                timeshift: cv("TIMESHIFT_URL", Verdict::not_checked()),
            },
            RowResult {
                index: 1,
                primary: cv("URL", Verdict::classified(ManifestType::M3u8, false)),
                timeshift: cv("TIMESHIFT_URL", Verdict::failed(ManifestType::M3u8, "HTTP 503 for url (https://down/ts.m3u8)")),
            },
        ];
        (rows, results)
    }

    #[test]
    fn test_summary_counts() {
        let (_, results) = fixture();
        let summary = Summary::from_results(&results);
        assert_eq!(
            summary,
            Summary { rows: 2, protected: 1, clear: 1, errors: 1, not_applicable: 1 }
        );
        assert_eq!(summary.checked(), 3);
    }

    #[test]
    fn test_render_json() {
        let (rows, results) = fixture();
        let json: serde_json::Value = serde_json::from_str(&render_json(&rows, &results).unwrap()).unwrap();

        assert_eq!(json["summary"]["errors"], 1);
        assert_eq!(json["rows"][0]["fields"][0][1], "News & <Weather>");
        assert_eq!(json["rows"][0]["verdicts"][0]["verdict"]["type"], "MPD");
        assert_eq!(json["rows"][1]["verdicts"][1]["verdict"]["error"], "HTTP 503 for url (https://down/ts.m3u8)");
    }

    #[test]
    fn test_misaligned_results_rejected() {
        let (rows, mut results) = fixture();
        results.pop();
        assert!(render_json(&rows, &results).is_err());
    }
}
