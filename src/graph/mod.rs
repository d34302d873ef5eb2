//! Graph module for dependency relationship modeling.
//!
//! This module provides the [`DependencyGraph`] struct for assembling
//! analysed files into a directed graph and answering build-order and
//! cycle queries over it.
//!
//! # Example
//!
//! ```rust
//! use buildgraph::file::AnalysedFile;
//! use buildgraph::graph::DependencyGraph;
//!
//! let files = vec![
//!     AnalysedFile::new("app.c", vec!["lib.c".to_string()]),
//!     AnalysedFile::new("lib.c", vec![]),
//! ];
//!
//! let graph = DependencyGraph::build(files).unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod dependency_graph;

pub use dependency_graph::{
    BuildOrder, CycleInfo, DependencyGraph, GraphError, GraphResult, PartialOrder,
    UnresolvedDependency,
};
