//! Report rendering for dependency analysis results.
//!
//! This module snapshots a graph's query results into an
//! [`AnalysisReport`] and renders it for downstream consumers in various
//! formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::file::SourceFile;
use crate::graph::{CycleInfo, DependencyGraph, UnresolvedDependency};
use std::io::{self, Write};

/// Report output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Unknown report format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Snapshot of one graph's analysis results.
///
/// Queries run once at construction; rendering afterwards touches no
/// graph state.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Name of the analysed project or file set.
    pub project: String,
    /// All analysed file names in insertion order.
    pub files: Vec<String>,
    /// Number of files in the graph.
    pub file_count: usize,
    /// Number of resolved dependency edges.
    pub edge_count: usize,
    /// Topological build order, absent when cycles block strict ordering.
    pub build_order: Option<Vec<String>>,
    /// Detected dependency cycles.
    pub cycles: Vec<CycleInfo>,
    /// Dependency declarations that did not resolve to a known file.
    pub unresolved: Vec<UnresolvedDependency>,
}

impl AnalysisReport {
    /// Builds a report by running the graph's queries once.
    pub fn from_graph<F: SourceFile>(
        project: impl Into<String>,
        graph: &DependencyGraph<F>,
    ) -> Self {
        Self {
            project: project.into(),
            files: graph.files().map(|f| f.name().to_string()).collect(),
            file_count: graph.node_count(),
            edge_count: graph.edge_count(),
            build_order: graph.topological_order().ok().map(|order| order.files),
            cycles: graph.find_cycles(),
            unresolved: graph.unresolved_dependencies(),
        }
    }

    /// Returns true if a full build order could be computed.
    pub fn is_buildable(&self) -> bool {
        self.build_order.is_some()
    }
}

/// Trait for report renderers.
pub trait Renderer {
    /// Render the report to the given writer.
    fn render<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()>;
}

/// Render a report in the specified format.
pub fn render<W: Write>(
    format: ReportFormat,
    report: &AnalysisReport,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ReportFormat::Json => json::JsonRenderer.render(report, writer),
        ReportFormat::Csv => csv::CsvRenderer.render(report, writer),
        ReportFormat::Markdown => markdown::MarkdownRenderer.render(report, writer),
    }
}

/// Render a report to a string.
pub fn render_to_string(format: ReportFormat, report: &AnalysisReport) -> io::Result<String> {
    let mut buffer = Vec::new();
    render(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
