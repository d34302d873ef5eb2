//! CSV report rendering.
//!
//! Renders dependency analysis results in CSV format for spreadsheet use.

use super::{AnalysisReport, Renderer};
use std::io::{self, Write};

/// CSV renderer implementation.
pub struct CsvRenderer;

impl CsvRenderer {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Renderer for CsvRenderer {
    fn render<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        // Write header
        writeln!(writer, "file,build_position,in_cycle,unresolved_dependencies")?;

        // Build a set of files in cycles for quick lookup
        let cycle_files: std::collections::HashSet<&str> = report
            .cycles
            .iter()
            .flat_map(|c| c.files.iter().map(|s| s.as_str()))
            .collect();

        // Write each file as a row. Build positions are 1-based and empty
        // when cycles block strict ordering.
        for name in &report.files {
            let position = report
                .build_order
                .as_ref()
                .and_then(|order| order.iter().position(|f| f == name))
                .map(|p| (p + 1).to_string())
                .unwrap_or_default();
            let in_cycle = cycle_files.contains(name.as_str());
            let unresolved = report.unresolved.iter().filter(|u| &u.from == name).count();

            writeln!(
                writer,
                "{},{},{},{}",
                Self::escape_field(name),
                position,
                in_cycle,
                unresolved
            )?;
        }

        Ok(())
    }
}
