//! HTML report rendering

use super::{check_aligned, theme::status_class, ReportOptions, Summary};
use crate::{Result, Row, RowResult, Verdict};
use std::fmt::Write;

/// Escape text for HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a standalone HTML report.
///
/// One table row per input row, in input order: the row number, every
/// non-URL column, then URL / status / type for each designated column.
pub fn render_html(rows: &[Row], results: &[RowResult], options: &ReportOptions) -> Result<String> {
    check_aligned(rows, results)?;

    let designated: Vec<&str> = results
        .first()
        .map(|r| r.verdicts().into_iter().map(|cv| cv.column.as_str()).collect())
        .unwrap_or_default();
    let headers: Vec<&str> = rows
        .first()
        .map(|row| row.columns().filter(|c| !designated.contains(c)).collect())
        .unwrap_or_default();

    let summary = Summary::from_results(results);
    let title = escape_html(&options.title);

    let mut html = String::new();
    // Writing into a String cannot fail
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
{css}</style>
</head>
<body>
<h1>{title}</h1>
<p>Generated {generated}</p>
<p class="summary"><span>Rows: {rows}</span><span>DRM: {protected}</span><span>No DRM: {clear}</span><span>Errors: {errors}</span><span>Not applicable: {na}</span></p>
<table>
<thead>
<tr>
<th>#</th>
"#,
        css = options.colors.to_css(),
        generated = options.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        rows = summary.rows,
        protected = summary.protected,
        clear = summary.clear,
        errors = summary.errors,
        na = summary.not_applicable,
    );

    for header in &headers {
        let _ = writeln!(html, "<th>{}</th>", escape_html(header));
    }
    for column in &designated {
        let column = escape_html(column);
        let _ = writeln!(html, "<th>{column}</th>\n<th>DRM ({column})</th>\n<th>Type</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for (row, result) in rows.iter().zip(results) {
        html.push_str("<tr>\n");
        let _ = writeln!(html, "<td>{}</td>", result.index + 1);
        for header in &headers {
            let _ = writeln!(html, "<td>{}</td>", escape_html(row.get(header).unwrap_or_default()));
        }
        for cv in result.verdicts() {
            let url = row.get(&cv.column).unwrap_or_default().trim();
            let _ = writeln!(html, "<td class=\"url\">{}</td>", escape_html(url));
            html.push_str(&status_cell(&cv.verdict));
            let _ = writeln!(html, "<td>{}</td>", cv.verdict.manifest_type());
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    Ok(html)
}

fn status_cell(verdict: &Verdict) -> String {
    let status = verdict.status();
    match verdict.error() {
        Some(error) => format!(
            "<td class=\"{}\" title=\"{}\">{}</td>\n",
            status_class(status),
            escape_html(error),
            status
        ),
        None => format!("<td class=\"{}\">{}</td>\n", status_class(status), status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::fixture;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_html_rows() {
        let (rows, results) = fixture();
        let html = render_html(&rows, &results, &ReportOptions::default()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<th>CHANNEL</th>"));
        assert!(html.contains("<th>DRM (TIMESHIFT_URL)</th>"));
        assert!(html.contains("<td>News &amp; &lt;Weather&gt;</td>"));
        assert!(html.contains("<td class=\"drm-yes\">YES</td>"));
        assert!(html.contains("<td class=\"drm-no\">NO</td>"));
        assert!(html.contains("<td class=\"drm-na\">-</td>"));
        assert!(html.contains("class=\"drm-error\" title=\"HTTP 503 for url (https://down/ts.m3u8)\">ERROR</td>"));
        assert!(html.contains("<td>MPD</td>"));
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn test_designated_columns_not_repeated() {
        let (rows, results) = fixture();
        let html = render_html(&rows, &results, &ReportOptions::default()).unwrap();
        assert_eq!(html.matches("<th>URL</th>").count(), 1);
    }

    #[test]
    fn test_empty_report() {
        let html = render_html(&[], &[], &ReportOptions::default()).unwrap();
        assert!(html.contains("Rows: 0"));
        assert!(html.contains("<tbody>\n</tbody>"));
    }
}
