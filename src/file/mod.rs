//! Analysed source file metadata.
//!
//! This module defines the [`SourceFile`] capability trait and
//! [`AnalysedFile`], the concrete record produced by an upstream scanner
//! for each source file it has analysed.
//!
//! # Example
//!
//! ```rust
//! use buildgraph::file::{AnalysedFile, SourceFile};
//!
//! let file = AnalysedFile::new("main.c", vec!["util.c".to_string()]);
//!
//! assert_eq!(file.name(), "main.c");
//! assert_eq!(file.dependencies(), ["util.c".to_string()]);
//! ```

mod analysed_file;

pub use analysed_file::{AnalysedFile, SourceFile};
