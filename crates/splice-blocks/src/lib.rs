//! Structural text-block replacement for blocksplice.
//!
//! Locates blocks in a line-oriented document by a start-marker substring and
//! a pluggable end rule, then splices replacement text over them:
//!
//! ```text
//! prefix ++ replacement 1 ++ middle ++ replacement 2 ++ suffix
//! ```
//!
//! All blocks are found in one forward scan. A later block's start must come
//! after the previous block's end; anything else is an error, and nothing is
//! produced unless every block resolved.
//!
//! # Example
//! ```
//! use splice_blocks::{BlockSpec, Document, replace_blocks};
//!
//! let document = Document::parse("keep\nfn old() {\n  body\n}\nkeep\n");
//! let specs = [BlockSpec::closing_line("old", "fn old", "}", 1, "fn new() {}\n")];
//!
//! let outcome = replace_blocks(&document, &specs).unwrap();
//! assert_eq!(outcome.document.to_text(), "keep\nfn new() {}\nkeep\n");
//! assert_eq!(outcome.line_delta(), -2);
//! ```

pub mod boundary;
pub mod document;
pub mod error;
pub mod file;
pub mod plan;
pub mod scanner;
pub mod spec;
pub mod splice;

pub use boundary::{BoundaryDetector, BoundaryStrategy, BraceDepth, ClosingLine, EndRule, LinePattern};
pub use document::{Document, LineEnding};
pub use error::{Boundary, Error, Result};
pub use file::{FileSplice, locate_in_file, splice_file};
pub use plan::{PlanEntry, SplicePlan};
pub use scanner::{ScanState, locate_blocks};
pub use spec::{BlockSpec, Span};
pub use splice::{ResolvedBlock, SpliceOutcome, replace_blocks};
