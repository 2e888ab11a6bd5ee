//! Report palette and stylesheet
//!
//! Status colors follow the spreadsheet convention: green for protected,
//! red for clear, amber for errors, grey for not applicable.

use crate::DrmStatus;
use serde::Serialize;

/// Foreground/background pair for a status cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellColors {
    pub background: &'static str,
    pub text: &'static str,
}

/// Report color palette
#[derive(Debug, Clone, Serialize)]
pub struct ReportColors {
    /// Page background - #f5f5f5
    pub page: &'static str,
    /// Table background - #ffffff
    pub table: &'static str,
    /// Header row - #333333
    pub header: &'static str,
    /// Header text - #ffffff
    pub header_text: &'static str,
    /// Cell borders - #dddddd
    pub border: &'static str,
    pub protected: CellColors,
    pub clear: CellColors,
    pub error: CellColors,
    pub not_applicable: CellColors,
}

impl Default for ReportColors {
    fn default() -> Self {
        Self {
            page: "#f5f5f5",
            table: "#ffffff",
            header: "#333333",
            header_text: "#ffffff",
            border: "#dddddd",
            protected: CellColors { background: "#c6efce", text: "#006100" },
            clear: CellColors { background: "#ffc7ce", text: "#9c0006" },
            error: CellColors { background: "#ffeb9c", text: "#9c6500" },
            not_applicable: CellColors { background: "#e7e6e6", text: "#595959" },
        }
    }
}

impl ReportColors {
    /// Cell colors for a status
    pub fn for_status(&self, status: DrmStatus) -> CellColors {
        match status {
            DrmStatus::Protected => self.protected,
            DrmStatus::Clear => self.clear,
            DrmStatus::Error => self.error,
            DrmStatus::NotApplicable => self.not_applicable,
        }
    }

    /// Generate the report stylesheet
    pub fn to_css(&self) -> String {
        let mut css = format!(
            r#"body {{ font-family: Arial, sans-serif; background: {page}; padding: 20px; }}
table {{ width: 100%; border-collapse: collapse; background: {table}; }}
th, td {{ border: 1px solid {border}; padding: 8px; text-align: center; }}
th {{ background: {header}; color: {header_text}; }}
td.url {{ text-align: left; word-break: break-all; }}
.summary span {{ margin-right: 16px; }}
"#,
            page = self.page,
            table = self.table,
            border = self.border,
            header = self.header,
            header_text = self.header_text,
        );

        for status in [
            DrmStatus::Protected,
            DrmStatus::Clear,
            DrmStatus::Error,
            DrmStatus::NotApplicable,
        ] {
            let colors = self.for_status(status);
            let weight = if status == DrmStatus::NotApplicable { "normal" } else { "bold" };
            css.push_str(&format!(
                "td.{} {{ background: {}; color: {}; font-weight: {}; }}\n",
                status_class(status),
                colors.background,
                colors.text,
                weight
            ));
        }
        css
    }
}

/// CSS class for a status cell
pub fn status_class(status: DrmStatus) -> &'static str {
    match status {
        DrmStatus::Protected => "drm-yes",
        DrmStatus::Clear => "drm-no",
        DrmStatus::Error => "drm-error",
        DrmStatus::NotApplicable => "drm-na",
    }
}
