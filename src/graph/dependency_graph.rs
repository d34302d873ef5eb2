//! Dependency graph implementation using petgraph.
//!
//! Provides a directed graph over analysed source files, with cycle
//! detection and deterministic topological ordering for build scheduling.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::file::{AnalysedFile, SourceFile};

/// Errors raised while building or querying a dependency graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Two input files declared the same name. Construction fails
    /// atomically; no partial graph is returned.
    #[error("duplicate file name: {0}")]
    DuplicateFile(String),

    /// The dependency graph is not a DAG. Carries the offending cycle.
    #[error("dependency cycle detected: {}", .0.cycle_path())]
    Cycle(CycleInfo),
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// One circular dependency chain.
///
/// `files` holds the cycle in path order (the last element depends on the
/// first), rotated so the lexicographically smallest name comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleInfo {
    /// The file names forming the cycle.
    pub files: Vec<String>,
}

impl CycleInfo {
    /// Rotates a raw traversal path so the smallest name leads, giving
    /// every cycle a single canonical representation.
    fn from_path(mut files: Vec<String>) -> Self {
        if let Some(min_pos) = files
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.cmp(b.1))
            .map(|(pos, _)| pos)
        {
            files.rotate_left(min_pos);
        }
        Self { files }
    }

    /// Returns a formatted representation of the cycle path.
    ///
    /// For example: "a.c -> b.c -> c.c -> a.c"
    pub fn cycle_path(&self) -> String {
        if self.files.is_empty() {
            return String::new();
        }
        let mut path = self.files.join(" -> ");
        path.push_str(" -> ");
        path.push_str(&self.files[0]);
        path
    }

    /// Returns the number of files in the cycle.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A dependency declaration with no matching analysed file.
///
/// Unresolved names impose no ordering constraint and never fail a query;
/// they are surfaced alongside results so consumers can decide whether a
/// missing file is acceptable (e.g. a system header) in their context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedDependency {
    /// The file declaring the dependency.
    pub from: String,
    /// The declared name with no corresponding file in the graph.
    pub missing: String,
}

/// A valid processing order for every file in the graph.
///
/// For every resolved dependency, the dependency precedes its dependent
/// in `files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOrder {
    /// All known file names, dependencies first.
    pub files: Vec<String>,
    /// Dependency declarations that did not resolve to a known file.
    pub unresolved: Vec<UnresolvedDependency>,
}

/// A best-effort processing order for a graph that may contain cycles.
///
/// Every file still appears exactly once; one edge of each detected cycle
/// is ignored to make that possible. A non-empty `broken_cycles` marks the
/// order as non-authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialOrder {
    /// All known file names; ordering constraints inside broken cycles
    /// are not honored.
    pub files: Vec<String>,
    /// Dependency declarations that did not resolve to a known file.
    pub unresolved: Vec<UnresolvedDependency>,
    /// The cycles that had to be broken. Empty means the order is a true
    /// topological order.
    pub broken_cycles: Vec<CycleInfo>,
}

/// Traversal mark for the three-color depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Result of one depth-first pass: post-order emission plus every cycle
/// discovered through back edges.
struct Traversal {
    order: Vec<NodeIndex>,
    cycles: Vec<CycleInfo>,
}

/// A directed graph of analysed source files.
///
/// Nodes are files, edges point from a dependent file to its dependency.
/// The graph is immutable once built; queries allocate their own traversal
/// state, so a shared reference can be queried concurrently.
///
/// The graph is generic over the [`SourceFile`] capability so synthetic
/// file descriptions can stand in for scanner output in tests.
///
/// # Example
///
/// ```rust
/// use buildgraph::file::AnalysedFile;
/// use buildgraph::graph::DependencyGraph;
///
/// let files = vec![
///     AnalysedFile::new("app.c", vec!["lib.c".to_string()]),
///     AnalysedFile::new("lib.c", vec![]),
/// ];
///
/// let graph = DependencyGraph::build(files).unwrap();
/// let order = graph.topological_order().unwrap();
///
/// assert_eq!(order.files, vec!["lib.c".to_string(), "app.c".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<F: SourceFile = AnalysedFile> {
    /// The underlying directed graph, owning the analysed files.
    graph: DiGraph<F, ()>,
    /// Maps file names to their node indices for O(1) lookup. Node
    /// indices follow insertion order, which is what makes the ordering
    /// queries deterministic.
    node_indices: HashMap<String, NodeIndex>,
}

impl<F: SourceFile> DependencyGraph<F> {
    /// Builds a graph from a finite collection of analysed files,
    /// consuming them.
    ///
    /// Edges are added only for dependency names that resolve to another
    /// file in the collection; dangling names are kept in the file's
    /// declared list and surface via [`unresolved_dependencies`]. An
    /// empty collection yields an empty graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateFile`] if two files share a name.
    /// A silent overwrite would hide a build-configuration mistake, so
    /// construction fails instead and no graph is returned.
    ///
    /// [`unresolved_dependencies`]: DependencyGraph::unresolved_dependencies
    ///
    /// # Example
    ///
    /// ```rust
    /// use buildgraph::file::AnalysedFile;
    /// use buildgraph::graph::{DependencyGraph, GraphError};
    ///
    /// let files = vec![
    ///     AnalysedFile::new("a.c", vec![]),
    ///     AnalysedFile::new("a.c", vec!["b.c".to_string()]),
    /// ];
    ///
    /// assert!(matches!(
    ///     DependencyGraph::build(files),
    ///     Err(GraphError::DuplicateFile(name)) if name == "a.c"
    /// ));
    /// ```
    pub fn build<I>(files: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = F>,
    {
        let files: Vec<F> = files.into_iter().collect();
        let mut graph = DiGraph::with_capacity(files.len(), files.len());
        let mut node_indices: HashMap<String, NodeIndex> = HashMap::with_capacity(files.len());

        for file in files {
            let name = file.name().to_string();
            if node_indices.contains_key(&name) {
                return Err(GraphError::DuplicateFile(name));
            }
            let idx = graph.add_node(file);
            node_indices.insert(name, idx);
        }

        let indices: Vec<NodeIndex> = graph.node_indices().collect();
        for idx in indices {
            let resolved: Vec<NodeIndex> = graph[idx]
                .dependencies()
                .iter()
                .filter_map(|name| node_indices.get(name).copied())
                .collect();
            for dep_idx in resolved {
                graph.add_edge(idx, dep_idx, ());
            }
        }

        debug!(
            files = graph.node_count(),
            edges = graph.edge_count(),
            "dependency graph built"
        );

        Ok(Self {
            graph,
            node_indices,
        })
    }

    /// Computes a topological processing order over all known files.
    ///
    /// For every edge `A depends on B` with `B` present in the graph,
    /// `B` precedes `A` in the output. Nodes are visited in insertion
    /// order and each file's dependency list in declaration order, so the
    /// same input always yields the same output. Unresolved names impose
    /// no constraint; they are returned in [`BuildOrder::unresolved`]
    /// while the declaring file still appears in the order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Cycle`] with the first cycle encountered if
    /// the graph is not a DAG. The graph itself stays valid and other
    /// queries may still be run on it.
    pub fn topological_order(&self) -> GraphResult<BuildOrder> {
        let Traversal { order, mut cycles } = self.traverse();
        if !cycles.is_empty() {
            return Err(GraphError::Cycle(cycles.remove(0)));
        }
        Ok(BuildOrder {
            files: self.file_names(&order),
            unresolved: self.unresolved_dependencies(),
        })
    }

    /// Computes a processing order even when the graph contains cycles.
    ///
    /// The traversal ignores the back edge of each cycle it meets, so
    /// every file appears exactly once. The ignored cycles are reported
    /// in [`PartialOrder::broken_cycles`]; an empty list means the result
    /// is a true topological order. Intended for tooling that wants to
    /// proceed anyway (e.g. an IDE hint) rather than hard-fail.
    pub fn best_effort_order(&self) -> PartialOrder {
        let Traversal { order, cycles } = self.traverse();
        if !cycles.is_empty() {
            warn!(
                cycles = cycles.len(),
                "breaking dependency cycles to produce a best-effort order"
            );
        }
        PartialOrder {
            files: self.file_names(&order),
            unresolved: self.unresolved_dependencies(),
            broken_cycles: cycles,
        }
    }

    /// Enumerates the distinct dependency cycles reachable by depth-first
    /// search from each unvisited node.
    ///
    /// Each cycle is reported once, in path order, starting from its
    /// lexicographically smallest member. An empty result means the graph
    /// is acyclic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use buildgraph::file::AnalysedFile;
    /// use buildgraph::graph::DependencyGraph;
    ///
    /// let files = vec![
    ///     AnalysedFile::new("a.c", vec!["b.c".to_string()]),
    ///     AnalysedFile::new("b.c", vec!["a.c".to_string()]),
    /// ];
    ///
    /// let graph = DependencyGraph::build(files).unwrap();
    /// let cycles = graph.find_cycles();
    ///
    /// assert_eq!(cycles.len(), 1);
    /// assert_eq!(cycles[0].files, vec!["a.c".to_string(), "b.c".to_string()]);
    /// ```
    pub fn find_cycles(&self) -> Vec<CycleInfo> {
        self.traverse().cycles
    }

    /// Checks whether the graph contains at least one cycle.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns every dependency declaration with no matching file, in
    /// insertion and declaration order.
    pub fn unresolved_dependencies(&self) -> Vec<UnresolvedDependency> {
        let mut unresolved = Vec::new();
        for idx in self.graph.node_indices() {
            let file = &self.graph[idx];
            for dep in file.dependencies() {
                if !self.node_indices.contains_key(dep) {
                    unresolved.push(UnresolvedDependency {
                        from: file.name().to_string(),
                        missing: dep.clone(),
                    });
                }
            }
        }
        unresolved
    }

    /// Gets a file by name.
    pub fn file(&self, name: &str) -> Option<&F> {
        self.node_indices
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Iterates over all files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &F> {
        self.graph.node_weights()
    }

    /// Gets the resolved dependencies of a file, in declaration order.
    ///
    /// Returns files the named file depends on; unresolved names are
    /// omitted. Unknown names yield an empty list.
    pub fn dependencies_of(&self, name: &str) -> Vec<&F> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        self.resolved_dependencies(idx)
            .into_iter()
            .filter_map(|dep_idx| self.graph.node_weight(dep_idx))
            .collect()
    }

    /// Gets the dependents of a file (files that depend on it).
    pub fn dependents_of(&self, name: &str) -> Vec<&F> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| self.graph.node_weight(edge.source()))
            .collect()
    }

    /// Checks if a file exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Returns the number of files in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of resolved dependency edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Depth-first post-order pass over the whole graph.
    ///
    /// Emits each node after its resolved dependencies, so `order` is a
    /// valid dependency-first sequence once any back edges are ignored.
    /// Every back edge met along the way yields the cycle formed by the
    /// stack slice from the revisited node to the top. All traversal
    /// state is local to the call.
    fn traverse(&self) -> Traversal {
        let mut marks = vec![Mark::Unvisited; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut cycles = Vec::new();
        let mut seen: HashSet<Vec<String>> = HashSet::new();

        for start in self.graph.node_indices() {
            if marks[start.index()] != Mark::Unvisited {
                continue;
            }
            marks[start.index()] = Mark::InProgress;
            let mut stack = vec![(start, self.resolved_dependencies(start), 0usize)];

            loop {
                let next = match stack.last_mut() {
                    Some((_, deps, cursor)) if *cursor < deps.len() => {
                        *cursor += 1;
                        Some(deps[*cursor - 1])
                    }
                    Some(_) => None,
                    None => break,
                };

                match next {
                    Some(dep) => match marks[dep.index()] {
                        Mark::Unvisited => {
                            marks[dep.index()] = Mark::InProgress;
                            stack.push((dep, self.resolved_dependencies(dep), 0));
                        }
                        Mark::InProgress => {
                            // Back edge: the stack slice from `dep` to the
                            // top is the cycle path.
                            if let Some(pos) = stack.iter().position(|(n, _, _)| *n == dep) {
                                let path = stack[pos..]
                                    .iter()
                                    .map(|(n, _, _)| self.graph[*n].name().to_string())
                                    .collect();
                                let cycle = CycleInfo::from_path(path);
                                if seen.insert(cycle.files.clone()) {
                                    cycles.push(cycle);
                                }
                            }
                        }
                        Mark::Done => {}
                    },
                    None => {
                        if let Some((node, _, _)) = stack.pop() {
                            marks[node.index()] = Mark::Done;
                            order.push(node);
                        }
                    }
                }
            }
        }

        Traversal { order, cycles }
    }

    /// Node indices of a file's dependencies that exist in the graph,
    /// in declaration order.
    fn resolved_dependencies(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph[idx]
            .dependencies()
            .iter()
            .filter_map(|name| self.node_indices.get(name).copied())
            .collect()
    }

    fn file_names(&self, order: &[NodeIndex]) -> Vec<String> {
        order
            .iter()
            .map(|&idx| self.graph[idx].name().to_string())
            .collect()
    }
}
