//! The analysed-file record and the capability trait it implements.
//!
//! Scanning source text and extracting dependency declarations happens
//! upstream of this crate; what arrives here is the finished result, one
//! record per file.

/// Capability exposed by an analysed source file: its identity and the
/// dependency names declared in it.
///
/// Graph construction depends on this trait rather than on a concrete
/// type, so file metadata can come from anywhere - a real scanner, a
/// cache, or a synthetic description in a test.
pub trait SourceFile {
    /// Returns the file's unique identifier within the analysis universe,
    /// e.g. a logical module name or a path.
    fn name(&self) -> &str;

    /// Returns the declared dependency names in declaration order.
    ///
    /// The returned slice borrows from the file; callers get a read-only
    /// view, never a copy. Names without a corresponding analysed file
    /// are legal here and surface later as unresolved dependencies.
    fn dependencies(&self) -> &[String];
}

/// Immutable record of one analysed source file.
///
/// Holds the file's name and the dependency names an upstream parser
/// extracted from it. Both are moved in at construction and never change
/// afterwards.
///
/// # Example
///
/// ```rust
/// use buildgraph::file::{AnalysedFile, SourceFile};
///
/// let file = AnalysedFile::new(
///     "renderer.c",
///     vec!["math.c".to_string(), "texture.c".to_string()],
/// );
///
/// assert_eq!(file.name(), "renderer.c");
/// assert_eq!(file.dependencies().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysedFile {
    name: String,
    dependencies: Vec<String>,
}

impl AnalysedFile {
    /// Creates a new analysed file, taking ownership of the name and
    /// dependency list.
    ///
    /// `name` must be non-empty; uniqueness across a collection is
    /// checked when the collection is handed to a graph.
    pub fn new(name: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }
}

impl SourceFile for AnalysedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}
