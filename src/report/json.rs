//! JSON report rendering.
//!
//! Renders dependency analysis results in JSON format for machine-readable output.

use super::{AnalysisReport, Renderer};
use serde::Serialize;
use std::io::{self, Write};

/// JSON renderer implementation.
pub struct JsonRenderer;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    dependency_edges: usize,
    circular_dependencies: usize,
    unresolved_dependencies: usize,
    buildable: bool,
}

/// Serializable cycle for JSON output.
#[derive(Serialize)]
struct JsonCycle {
    files: Vec<String>,
    path: String,
}

/// Serializable unresolved dependency for JSON output.
#[derive(Serialize)]
struct JsonUnresolved {
    from: String,
    missing: String,
}

/// Root JSON report structure.
#[derive(Serialize)]
struct JsonReport {
    project: String,
    summary: JsonSummary,
    files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    circular_dependencies: Vec<JsonCycle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unresolved_dependencies: Vec<JsonUnresolved>,
}

impl Renderer for JsonRenderer {
    fn render<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        let circular_dependencies: Vec<JsonCycle> = report
            .cycles
            .iter()
            .map(|c| JsonCycle {
                files: c.files.clone(),
                path: c.cycle_path(),
            })
            .collect();

        let unresolved_dependencies: Vec<JsonUnresolved> = report
            .unresolved
            .iter()
            .map(|u| JsonUnresolved {
                from: u.from.clone(),
                missing: u.missing.clone(),
            })
            .collect();

        let out = JsonReport {
            project: report.project.clone(),
            summary: JsonSummary {
                files: report.file_count,
                dependency_edges: report.edge_count,
                circular_dependencies: report.cycles.len(),
                unresolved_dependencies: report.unresolved.len(),
                buildable: report.is_buildable(),
            },
            files: report.files.clone(),
            build_order: report.build_order.clone(),
            circular_dependencies,
            unresolved_dependencies,
        };

        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
