//! Output formats for report results: aligned text, JSON, CSV.

use anyhow::Result;
use pulse_core::{ReportId, ReportResult, Value};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ReportEnvelope<'a> {
    report: ReportId,
    section: &'static str,
    generated_at: String,
    row_count: usize,
    rows: &'a ReportResult,
}

/// Column headers the way the dashboards label them.
fn header_label(column: &str) -> String {
    column.replace('_', " ")
}

/// Cells print exactly as stored; SQL rounding decides the precision.
fn cell(value: &Value) -> String {
    value.to_string()
}

pub fn tables<W: Write>(out: &mut W, results: &[(ReportId, ReportResult)]) -> Result<()> {
    for (id, result) in results {
        writeln!(out, "=== {} ===", id.description().to_uppercase())?;
        writeln!(out, "  ({id})")?;

        if result.is_empty() {
            writeln!(out, "  (no rows)")?;
            writeln!(out)?;
            continue;
        }

        let headers: Vec<String> = result.columns().iter().map(|c| header_label(c)).collect();
        let body: Vec<Vec<String>> = result
            .rows()
            .map(|row| row.values().iter().map(cell).collect())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
        for row in &body {
            for (w, c) in widths.iter_mut().zip(row) {
                *w = (*w).max(c.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        writeln!(out, "  {}", line(headers.as_slice()))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(out, "  {}", rule.join("-+-"))?;
        for row in &body {
            writeln!(out, "  {}", line(row.as_slice()))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn json<W: Write>(out: &mut W, results: &[(ReportId, ReportResult)]) -> Result<()> {
    let generated_at = chrono::Utc::now().to_rfc3339();
    let envelopes: Vec<ReportEnvelope<'_>> = results
        .iter()
        .map(|(id, result)| ReportEnvelope {
            report: *id,
            section: id.section().key(),
            generated_at: generated_at.clone(),
            row_count: result.len(),
            rows: result,
        })
        .collect();

    if let [single] = envelopes.as_slice() {
        serde_json::to_writer_pretty(&mut *out, single)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &envelopes)?;
    }
    writeln!(out)?;
    Ok(())
}

/// One CSV block per report, separated by a blank line.
pub fn csv<W: Write>(out: &mut W, results: &[(ReportId, ReportResult)]) -> Result<()> {
    for (i, (id, result)) in results.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        if results.len() > 1 {
            writeln!(out, "# {id}")?;
        }
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut *out);
        wtr.write_record(result.columns())?;
        for row in result.rows() {
            wtr.write_record(row.values().iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
    }
    Ok(())
}
