//! Markdown report rendering.
//!
//! Renders dependency analysis results in Markdown format for documentation and reporting.

use super::{AnalysisReport, Renderer};
use std::io::{self, Write};

/// Markdown renderer implementation.
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Dependency Analysis Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Project:** {}", report.project)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Files | {} |", report.file_count)?;
        writeln!(writer, "| Dependency Edges | {} |", report.edge_count)?;
        writeln!(
            writer,
            "| Circular Dependencies | {} |",
            report.cycles.len()
        )?;
        writeln!(
            writer,
            "| Unresolved Dependencies | {} |",
            report.unresolved.len()
        )?;
        writeln!(writer)?;

        // Build order
        writeln!(writer, "## Build Order")?;
        writeln!(writer)?;
        match &report.build_order {
            Some(order) if order.is_empty() => {
                writeln!(writer, "No files analysed.")?;
                writeln!(writer)?;
            }
            Some(order) => {
                for (i, name) in order.iter().enumerate() {
                    writeln!(writer, "{}. `{}`", i + 1, name)?;
                }
                writeln!(writer)?;
            }
            None => {
                writeln!(
                    writer,
                    "No build order exists: the dependency graph contains cycles."
                )?;
                writeln!(writer)?;
            }
        }

        // Circular dependencies
        if !report.cycles.is_empty() {
            writeln!(writer, "## Circular Dependencies")?;
            writeln!(writer)?;
            writeln!(writer, "The following circular dependencies were detected:")?;
            writeln!(writer)?;
            for (i, cycle) in report.cycles.iter().enumerate() {
                writeln!(writer, "{}. `{}`", i + 1, cycle.cycle_path())?;
            }
            writeln!(writer)?;
        }

        // Unresolved dependencies
        if !report.unresolved.is_empty() {
            writeln!(writer, "## Unresolved Dependencies")?;
            writeln!(writer)?;
            writeln!(writer, "| File | Missing Dependency |")?;
            writeln!(writer, "|------|--------------------|")?;
            for u in &report.unresolved {
                writeln!(writer, "| {} | {} |", u.from, u.missing)?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by BuildGraph*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::AnalysedFile;
    use crate::graph::DependencyGraph;

    fn file(name: &str, deps: &[&str]) -> AnalysedFile {
        AnalysedFile::new(name, deps.iter().map(|d| d.to_string()).collect())
    }

    fn create_test_report() -> AnalysisReport {
        let graph = DependencyGraph::build(vec![
            file("app.c", &["lib.c", "sys.h"]),
            file("lib.c", &[]),
        ])
        .unwrap();

        AnalysisReport::from_graph("test-project", &graph)
    }

    #[test]
    fn test_markdown_render_basic() {
        let report = create_test_report();
        let mut output = Vec::new();

        MarkdownRenderer.render(&report, &mut output).unwrap();

        let md_str = String::from_utf8(output).unwrap();

        assert!(md_str.contains("# Dependency Analysis Report"));
        assert!(md_str.contains("**Project:** test-project"));
        assert!(md_str.contains("| Files | 2 |"));
        assert!(md_str.contains("| Dependency Edges | 1 |"));
    }

    #[test]
    fn test_markdown_render_build_order() {
        let report = create_test_report();
        let mut output = Vec::new();

        MarkdownRenderer.render(&report, &mut output).unwrap();

        let md_str = String::from_utf8(output).unwrap();

        assert!(md_str.contains("## Build Order"));
        assert!(md_str.contains("1. `lib.c`"));
        assert!(md_str.contains("2. `app.c`"));
        assert!(md_str.contains("| app.c | sys.h |"));
    }

    #[test]
    fn test_markdown_render_with_cycles() {
        let graph =
            DependencyGraph::build(vec![file("a.c", &["b.c"]), file("b.c", &["a.c"])]).unwrap();
        let report = AnalysisReport::from_graph("test", &graph);

        let mut output = Vec::new();
        MarkdownRenderer.render(&report, &mut output).unwrap();

        let md_str = String::from_utf8(output).unwrap();

        assert!(md_str.contains("No build order exists"));
        assert!(md_str.contains("## Circular Dependencies"));
        assert!(md_str.contains("`a.c -> b.c -> a.c`"));
    }

    #[test]
    fn test_markdown_render_empty_graph() {
        let graph = DependencyGraph::build(Vec::<AnalysedFile>::new()).unwrap();
        let report = AnalysisReport::from_graph("empty", &graph);

        let mut output = Vec::new();
        MarkdownRenderer.render(&report, &mut output).unwrap();

        let md_str = String::from_utf8(output).unwrap();
        assert!(md_str.contains("No files analysed."));
    }
}
