//! Splicing replacement text into located spans.

use crate::document::{Document, LineEnding, has_terminator, split_lines};
use crate::error::Result;
use crate::scanner::locate_blocks;
use crate::spec::{BlockSpec, Span};
use std::borrow::Cow;

/// A block that was located and replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBlock {
    pub name: String,
    /// Span in the original document.
    pub span: Span,
    /// Number of lines the replacement occupies in the new document.
    pub replacement_lines: usize,
}

/// Result of [`replace_blocks`].
#[derive(Debug, Clone)]
pub struct SpliceOutcome {
    pub document: Document,
    pub blocks: Vec<ResolvedBlock>,
    pub lines_before: usize,
}

impl SpliceOutcome {
    pub fn lines_after(&self) -> usize {
        self.document.len()
    }

    /// Signed change in line count, negative when the document shrank.
    pub fn line_delta(&self) -> isize {
        self.lines_after() as isize - self.lines_before as isize
    }
}

/// Replace every block described by `specs` and return the new document.
///
/// The input is never modified. Lines outside the located spans are copied
/// verbatim and in order; each span is swapped for its spec's replacement
/// text. A replacement without a trailing newline gets the document's
/// dominant line ending appended unless the replaced block was the
/// unterminated last line, so it never merges with the following line.
///
/// # Errors
///
/// Any error from [`locate_blocks`]; nothing is produced unless every span
/// resolved.
pub fn replace_blocks(document: &Document, specs: &[BlockSpec]) -> Result<SpliceOutcome> {
    let spans = locate_blocks(document, specs)?;
    let ending = document.line_ending();
    let source = document.lines();

    let mut lines: Vec<String> = Vec::with_capacity(source.len());
    let mut blocks = Vec::with_capacity(specs.len());
    let mut next = 0;

    for (spec, span) in specs.iter().zip(&spans) {
        lines.extend_from_slice(&source[next..span.start]);

        let terminated = has_terminator(&source[span.end]);
        let replacement = normalize_replacement(&spec.replacement, terminated, ending);
        let replacement_lines = split_lines(&replacement);

        tracing::debug!(
            block = %spec.name,
            range = %span,
            replacement_lines = replacement_lines.len(),
            "replacing block"
        );

        blocks.push(ResolvedBlock {
            name: spec.name.clone(),
            span: *span,
            replacement_lines: replacement_lines.len(),
        });
        lines.extend(replacement_lines);
        next = span.end + 1;
    }
    lines.extend_from_slice(&source[next..]);

    Ok(SpliceOutcome {
        document: Document::from_lines(lines),
        blocks,
        lines_before: document.len(),
    })
}

fn normalize_replacement(text: &str, terminated: bool, ending: LineEnding) -> Cow<'_, str> {
    if terminated && !text.is_empty() && !text.ends_with('\n') {
        Cow::Owned(format!("{}{}", text, ending.as_str()))
    } else {
        Cow::Borrowed(text)
    }
}
