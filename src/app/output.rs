//! Terminal rendering of lookup reports.

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::export::record_rows;
use crate::LookupReport;

/// Pretty-printed JSON.
pub fn render_json(report: &LookupReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize lookup report")
}

/// One block per family, one sub-block per provider record, then failures.
///
/// Absent fields show as `N/A`.
pub fn render_table(report: &LookupReport) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let _ = writeln!(
            out,
            "== {} ({} record{}, {} failure{}) ==",
            outcome.family(),
            outcome.records().len(),
            plural(outcome.records().len()),
            outcome.failures().len(),
            plural(outcome.failures().len())
        );

        if outcome.is_empty() {
            let _ = writeln!(out, "No provider returned data.");
        }

        for record in outcome.records() {
            let rows = record_rows(record);
            let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
            for (label, value) in rows {
                let _ = writeln!(out, "  {:<width$}  {}", label, value, width = width);
            }
            out.push('\n');
        }

        for failure in outcome.failures() {
            let _ = writeln!(out, "  ! {}: {}", failure.provider, failure.message);
        }
        out.push('\n');
    }

    out
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
