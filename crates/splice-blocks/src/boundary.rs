//! Boundary-detection strategies.
//!
//! Once a block's start line is known, a strategy decides which later line
//! closes it. A strategy hands out a fresh [`BoundaryDetector`] per located
//! block; the detector sees the start line (offset 0) and every line after it
//! until it reports the end.
//!
//! # Limitation
//!
//! None of the built-in strategies parse the host language. The closing-line
//! heuristic in particular cannot tell a block's own closing line from a
//! nested closing line that happens to sit beyond the distance guard; when
//! that happens the split is silently wrong. Prefer [`BraceDepth`] for
//! brace-delimited code.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Per-block end detector.
pub trait BoundaryDetector {
    /// Returns `true` if `line` closes the block.
    ///
    /// `offset` is the distance from the start line; `line` has no terminator.
    fn ends_block(&mut self, offset: usize, line: &str) -> bool;
}

/// Pluggable rule for finding the line that ends a block.
pub trait BoundaryStrategy: fmt::Debug + Send + Sync {
    /// A fresh detector for one located block.
    fn detector(&self) -> Box<dyn BoundaryDetector>;
}

/// Ends on the first line whose trimmed content equals `token`, at least
/// `min_lines_after_start + 1` lines below the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingLine {
    pub token: String,
    pub min_lines_after_start: usize,
}

impl ClosingLine {
    pub fn new(token: impl Into<String>, min_lines_after_start: usize) -> Self {
        Self {
            token: token.into(),
            min_lines_after_start,
        }
    }
}

impl BoundaryStrategy for ClosingLine {
    fn detector(&self) -> Box<dyn BoundaryDetector> {
        Box::new(self.clone())
    }
}

impl BoundaryDetector for ClosingLine {
    fn ends_block(&mut self, offset: usize, line: &str) -> bool {
        offset > self.min_lines_after_start && line.trim() == self.token
    }
}

/// Ends on the line where delimiter depth, counted from the start line,
/// returns to zero.
///
/// Closing delimiters before the first opening one are ignored, so a start
/// line like `} else {` opens the block rather than closing it. Delimiters
/// inside string literals or comments are counted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceDepth {
    pub open: char,
    pub close: char,
}

impl Default for BraceDepth {
    fn default() -> Self {
        Self {
            open: '{',
            close: '}',
        }
    }
}

impl BoundaryStrategy for BraceDepth {
    fn detector(&self) -> Box<dyn BoundaryDetector> {
        Box::new(BraceDepthDetector {
            open: self.open,
            close: self.close,
            depth: 0,
            opened: false,
        })
    }
}

struct BraceDepthDetector {
    open: char,
    close: char,
    depth: i64,
    opened: bool,
}

impl BoundaryDetector for BraceDepthDetector {
    fn ends_block(&mut self, _offset: usize, line: &str) -> bool {
        for ch in line.chars() {
            if ch == self.open {
                self.depth += 1;
                self.opened = true;
            } else if ch == self.close && self.opened {
                self.depth -= 1;
            }
        }
        self.opened && self.depth <= 0
    }
}

/// Like [`ClosingLine`] but the trimmed line must match a regular expression.
#[derive(Debug, Clone)]
pub struct LinePattern {
    regex: Regex,
    min_lines_after_start: usize,
}

impl LinePattern {
    pub fn new(pattern: &str, min_lines_after_start: usize) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            min_lines_after_start,
        })
    }
}

impl BoundaryStrategy for LinePattern {
    fn detector(&self) -> Box<dyn BoundaryDetector> {
        Box::new(self.clone())
    }
}

impl BoundaryDetector for LinePattern {
    fn ends_block(&mut self, offset: usize, line: &str) -> bool {
        offset > self.min_lines_after_start && self.regex.is_match(line.trim())
    }
}

fn default_open() -> char {
    '{'
}

fn default_close() -> char {
    '}'
}

/// Serializable description of a boundary strategy, as written in plan files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EndRule {
    ClosingLine {
        token: String,
        #[serde(default)]
        min_lines_after_start: usize,
    },
    BraceDepth {
        #[serde(default = "default_open")]
        open: char,
        #[serde(default = "default_close")]
        close: char,
    },
    Pattern {
        regex: String,
        #[serde(default)]
        min_lines_after_start: usize,
    },
}

impl EndRule {
    /// Build the strategy this rule describes.
    pub fn build(&self) -> Result<Arc<dyn BoundaryStrategy>> {
        Ok(match self {
            EndRule::ClosingLine {
                token,
                min_lines_after_start,
            } => Arc::new(ClosingLine::new(token.clone(), *min_lines_after_start)),
            EndRule::BraceDepth { open, close } => Arc::new(BraceDepth {
                open: *open,
                close: *close,
            }),
            EndRule::Pattern {
                regex,
                min_lines_after_start,
            } => Arc::new(LinePattern::new(regex, *min_lines_after_start)?),
        })
    }
}
