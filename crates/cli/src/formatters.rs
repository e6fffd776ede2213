//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render the client's generic `Table` collections and label/value summaries
//!   as aligned text tables, JSON or CSV.
//! - Render domain results (snapshots, REST responses, reload reports) on top of those.
//!
//! Does NOT handle:
//! - Writing to stdout (callers print the returned string).

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use clap::ValueEnum;
use serde_json::{Map, Value, json};
use splunkd_client::{ReloadReport, RestResponse, Snapshot, Table};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

const NO_RECORDS: &str = "No records.";

/// Column-aligned text: header, dashed rule, one line per row.
pub fn table_text(table: &Table) -> String {
    if table.is_empty() {
        return NO_RECORDS.to_string();
    }

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(table.len() + 2);
    out.push(line(&table.columns));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(table.rows.iter().map(|row| line(row.as_slice())));
    out.join("\n")
}

fn table_csv(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?.trim_end().to_string())
}

/// Render one table.
pub fn format_table(table: &Table, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table_text(table)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.to_json_rows())?),
        OutputFormat::Csv => table_csv(table),
    }
}

fn summary_table(summary: &[(&str, String)]) -> Table {
    Table {
        name: "summary".to_string(),
        columns: vec!["field".to_string(), "value".to_string()],
        rows: summary
            .iter()
            .map(|(label, value)| vec![label.to_string(), value.clone()])
            .collect(),
    }
}

fn summary_object(summary: &[(&str, String)]) -> Map<String, Value> {
    summary
        .iter()
        .map(|(label, value)| (label.to_string(), Value::String(value.clone())))
        .collect()
}

/// Render a full snapshot: summary first, then every table.
pub fn format_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Result<String> {
    let summary = snapshot.summary();
    let tables = snapshot.tables();

    match format {
        OutputFormat::Json => {
            let tables: BTreeMap<String, Value> = tables
                .iter()
                .map(|t| (t.name.clone(), Value::from(t.to_json_rows())))
                .collect();
            let doc = json!({
                "polled_at": snapshot.polled_at.to_rfc3339(),
                "summary": summary_object(&summary),
                "tables": tables,
            });
            Ok(serde_json::to_string_pretty(&doc)?)
        }
        OutputFormat::Table => {
            let polled_at = snapshot
                .polled_at
                .with_timezone(&chrono::Local)
                .format("%m/%d/%Y %I:%M:%S %p");
            let mut sections = vec![format!(
                "Polled at {polled_at}\n\n{}",
                table_text(&summary_table(&summary))
            )];
            sections.extend(
                tables
                    .iter()
                    .map(|t| format!("== {} ({}) ==\n{}", t.name, t.len(), table_text(t))),
            );
            Ok(sections.join("\n\n"))
        }
        OutputFormat::Csv => {
            let mut sections = vec![table_csv(&summary_table(&summary))?];
            for table in tables.iter().filter(|t| !t.is_empty()) {
                sections.push(format!("# {}\n{}", table.name, table_csv(table)?));
            }
            Ok(sections.join("\n\n"))
        }
    }
}

/// Render an ad-hoc REST response.
pub fn format_response(response: &RestResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(response.to_plaintext()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => bail!("csv output is not available for REST responses"),
    }
}

/// Render a configuration reload report.
pub fn format_report(report: &ReloadReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(report.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            let table = Table {
                name: "reload".to_string(),
                columns: vec!["endpoint".to_string(), "result".to_string()],
                rows: report
                    .outcomes
                    .iter()
                    .map(|o| {
                        vec![
                            o.endpoint.clone(),
                            o.error.clone().unwrap_or_else(|| "OK".to_string()),
                        ]
                    })
                    .collect(),
            };
            table_csv(&table)
        }
    }
}
