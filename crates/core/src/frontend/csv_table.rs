//! Parsing of uploaded CSV and its rendering as the dashboard table.
//!
//! The table always shows the same five columns, whatever headers the
//! uploaded file actually has.

use std::collections::HashMap;

use csv::ReaderBuilder;

use crate::error::CoreError;
use crate::severity::{EventCounts, SeverityWeights};

pub const HEADER_MONTH: &str = "Mese";
pub const HEADER_SEVERITY1: &str = "Severity 1 case";
pub const HEADER_CRITICAL: &str = "ProM Critical Alert";
pub const HEADER_WARNING: &str = "ProM Warning Alert";
pub const HEADER_OUTAGE: &str = "System Outage";

/// Columns of the rendered table, in display order.
pub const TABLE_HEADERS: [&str; 5] = [
    HEADER_MONTH,
    HEADER_SEVERITY1,
    HEADER_CRITICAL,
    HEADER_WARNING,
    HEADER_OUTAGE,
];

/// One parsed CSV line keyed by the file's own header names.
pub type CsvRow = HashMap<String, String>;

/// Parse CSV text whose first record is the header.
///
/// Empty lines are skipped; a line of empty cells such as `,,,,` is kept
/// as a row of blanks. Rows shorter than the header simply lack the
/// trailing keys.
pub fn parse_csv(input: &str) -> Result<Vec<CsvRow>, CoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CoreError::Validation(format!("Invalid CSV header: {e}")))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CoreError::Validation(format!("Invalid CSV row: {e}")))?;
        if record.is_empty() {
            continue;
        }
        let row: CsvRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Cell text for `header`, or the empty string when the row lacks it.
pub fn cell<'a>(row: &'a CsvRow, header: &str) -> &'a str {
    row.get(header).map(String::as_str).unwrap_or("")
}

/// Render rows as an HTML table with the fixed five-column header.
pub fn render_table_html(rows: &[CsvRow]) -> String {
    let head: String = TABLE_HEADERS
        .iter()
        .map(|h| format!("<th>{}</th>", html_escape(h)))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = TABLE_HEADERS
                .iter()
                .map(|h| format!("<td>{}</td>", html_escape(cell(row, h))))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
}

/// Event counts of one row; empty or non-numeric cells count as zero.
pub fn event_counts(row: &CsvRow) -> EventCounts {
    EventCounts {
        severity1: numeric_cell(row, HEADER_SEVERITY1),
        critical: numeric_cell(row, HEADER_CRITICAL),
        warning: numeric_cell(row, HEADER_WARNING),
        outage: numeric_cell(row, HEADER_OUTAGE),
    }
}

/// Weighted total per row, in file order (one row per month).
pub fn weighted_monthly_totals(rows: &[CsvRow], weights: &SeverityWeights) -> Vec<f64> {
    rows.iter()
        .map(|row| weights.weighted_total(&event_counts(row)))
        .collect()
}

fn numeric_cell(row: &CsvRow, header: &str) -> f64 {
    cell(row, header)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
