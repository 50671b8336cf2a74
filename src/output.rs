//! Output management module
//!
//! Renders reports as plain-text tables and writes them to stdout or a file.

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::agents::AgentKind;
use crate::report::{Cell, Report, Table};

/// Write buffer size (1MB)
const BUFFER_SIZE: usize = 1024 * 1024;

/// Format a cell for display
pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Count(count) => count.to_string(),
        Cell::Percent(percent) => format!("{:.2}%", percent),
        Cell::Ratio(ratio) => format_ratio(*ratio),
    }
}

/// Plain notation for readable magnitudes, scientific otherwise
fn format_ratio(ratio: f64) -> String {
    if ratio == 0.0 {
        "0".to_string()
    } else if (1e-3..1e9).contains(&ratio.abs()) {
        let text = format!("{:.4}", ratio);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{:.4e}", ratio)
    }
}

fn render_table(table: &Table, out: &mut String) {
    if let Some(heading) = &table.heading {
        out.push_str(heading);
        out.push('\n');
    }

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(format_cell).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // a column is right-aligned when its first row holds a number
    let numeric: Vec<bool> = (0..table.columns.len())
        .map(|i| table.rows.first().and_then(|row| row.get(i)).is_some_and(Cell::is_numeric))
        .collect();

    let line = |out: &mut String, values: &[String]| {
        let formatted: Vec<String> = values
            .iter()
            .zip(&widths)
            .zip(&numeric)
            .map(|((value, &width), &right)| {
                if right {
                    format!("{:>width$}", value, width = width)
                } else {
                    format!("{:<width$}", value, width = width)
                }
            })
            .collect();
        out.push_str(formatted.join("  ").trim_end());
        out.push('\n');
    };

    line(out, &table.columns);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &cells {
        line(out, row);
    }
}

/// Render one report
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&"=".repeat(report.title.chars().count()));
    out.push('\n');

    for (i, table) in report.tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_table(table, &mut out);
    }

    if !report.notes.is_empty() {
        if !report.tables.is_empty() {
            out.push('\n');
        }
        for note in &report.notes {
            out.push_str(note);
            out.push('\n');
        }
    }

    out
}

/// Render reports in order, separated by a blank line
pub fn render_reports(reports: &[(AgentKind, Report)]) -> String {
    reports
        .iter()
        .map(|(_, report)| render_report(report))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Write the rendered reports to the target
    pub fn write_reports(&self, reports: &[(AgentKind, Report)]) -> anyhow::Result<()> {
        let text = render_reports(reports);

        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                let mut writer = BufWriter::with_capacity(BUFFER_SIZE, stdout.lock());
                writer.write_all(text.as_bytes())?;
                writer.flush()?;
            }
            Self::File(path) => {
                ensure_parent_dir(path)?;
                let file = File::create(path).with_context(|| format!("cannot create {:?}", path))?;
                let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);
                writer
                    .write_all(text.as_bytes())
                    .and_then(|_| writer.flush())
                    .with_context(|| format!("cannot write {:?}", path))?;
            }
        }

        Ok(())
    }
}

/// Ensure the directory of an output file exists
fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| format!("cannot create {:?}", parent))?;
        }
    }
    Ok(())
}
