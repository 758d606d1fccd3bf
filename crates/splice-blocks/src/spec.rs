//! Block specifications and resolved spans.

use crate::boundary::{BoundaryStrategy, ClosingLine};
use std::fmt;
use std::sync::Arc;

/// One block to find and replace.
#[derive(Debug, Clone)]
pub struct BlockSpec {
    /// Label used in reports and errors.
    pub name: String,
    /// Substring identifying the block's first line.
    pub start_marker: String,
    /// Rule deciding which line closes the block.
    pub end: Arc<dyn BoundaryStrategy>,
    /// Literal text replacing the whole block, start and end lines included.
    pub replacement: String,
}

impl BlockSpec {
    pub fn new(
        name: impl Into<String>,
        start_marker: impl Into<String>,
        end: impl BoundaryStrategy + 'static,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_marker: start_marker.into(),
            end: Arc::new(end),
            replacement: replacement.into(),
        }
    }

    /// A spec ending on an exact closing line beyond a distance guard.
    pub fn closing_line(
        name: impl Into<String>,
        start_marker: impl Into<String>,
        token: impl Into<String>,
        min_lines_after_start: usize,
        replacement: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            start_marker,
            ClosingLine::new(token, min_lines_after_start),
            replacement,
        )
    }
}

/// Inclusive 0-based line range matched by a [`BlockSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a span covers at least its start line.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 1-based first line, for display.
    pub fn first_line(&self) -> usize {
        self.start + 1
    }

    /// 1-based last line, for display.
    pub fn last_line(&self) -> usize {
        self.end + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lines {}-{}", self.first_line(), self.last_line())
    }
}
