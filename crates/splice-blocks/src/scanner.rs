//! Single forward scan that resolves block spans.
//!
//! The scan keeps explicit per-spec state instead of loop-local flags. A spec
//! only starts looking for its start marker once the previous spec's start has
//! been seen, and a recorded start is never overwritten by a later match.

use crate::boundary::BoundaryDetector;
use crate::document::Document;
use crate::error::{Boundary, Error, Result};
use crate::spec::{BlockSpec, Span};

enum Slot {
    AwaitingStart,
    AwaitingEnd {
        start: usize,
        detector: Box<dyn BoundaryDetector>,
    },
    Resolved(Span),
}

impl Slot {
    fn start(&self) -> Option<usize> {
        match self {
            Slot::AwaitingStart => None,
            Slot::AwaitingEnd { start, .. } => Some(*start),
            Slot::Resolved(span) => Some(span.start),
        }
    }

    fn end(&self) -> Option<usize> {
        match self {
            Slot::Resolved(span) => Some(span.end),
            _ => None,
        }
    }
}

/// Scan state threaded through the pass over a document.
pub struct ScanState<'a> {
    specs: &'a [BlockSpec],
    slots: Vec<Slot>,
    cursor: usize,
}

impl<'a> ScanState<'a> {
    pub fn new(specs: &'a [BlockSpec]) -> Self {
        Self {
            specs,
            slots: specs.iter().map(|_| Slot::AwaitingStart).collect(),
            cursor: 0,
        }
    }

    /// Index of the next line to be fed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once every spec has a resolved span.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| matches!(slot, Slot::Resolved(_)))
    }

    /// Feed the next line (without terminator) to every spec still in play.
    pub fn feed(&mut self, line: &str) {
        let specs = self.specs;
        let index = self.cursor;
        self.cursor += 1;

        for k in 0..self.slots.len() {
            let previous_started = k == 0 || self.slots[k - 1].start().is_some();
            let spec = &specs[k];

            match &mut self.slots[k] {
                Slot::AwaitingStart => {
                    if previous_started && line.contains(spec.start_marker.as_str()) {
                        tracing::debug!(block = %spec.name, line = index + 1, "found start marker");
                        let mut detector = spec.end.detector();
                        self.slots[k] = if detector.ends_block(0, line) {
                            tracing::debug!(block = %spec.name, line = index + 1, "block closes on its start line");
                            Slot::Resolved(Span::new(index, index))
                        } else {
                            Slot::AwaitingEnd {
                                start: index,
                                detector,
                            }
                        };
                    }
                }
                Slot::AwaitingEnd { start, detector } => {
                    let start = *start;
                    if detector.ends_block(index - start, line) {
                        tracing::debug!(block = %spec.name, line = index + 1, "found end boundary");
                        self.slots[k] = Slot::Resolved(Span::new(start, index));
                    }
                }
                Slot::Resolved(_) => {}
            }
        }
    }

    /// Validate the final state and return one span per spec, in spec order.
    ///
    /// Overlap is reported before missing boundaries when both apply, since a
    /// later start landing inside an earlier block is the more specific fault.
    pub fn finish(self) -> Result<Vec<Span>> {
        let specs = self.specs;
        for k in 1..self.slots.len() {
            if let (Some(previous_end), Some(start)) = (self.slots[k - 1].end(), self.slots[k].start()) {
                if start <= previous_end {
                    return Err(Error::InvalidSpanOrder {
                        spec_index: k,
                        name: specs[k].name.clone(),
                        start,
                        previous_end,
                    });
                }
            }
        }

        self.slots
            .into_iter()
            .enumerate()
            .map(|(k, slot)| match slot {
                Slot::Resolved(span) => Ok(span),
                Slot::AwaitingStart => Err(Error::BlockNotFound {
                    spec_index: k,
                    name: specs[k].name.clone(),
                    boundary: Boundary::Start,
                }),
                Slot::AwaitingEnd { .. } => Err(Error::BlockNotFound {
                    spec_index: k,
                    name: specs[k].name.clone(),
                    boundary: Boundary::End,
                }),
            })
            .collect()
    }
}

/// Resolve one span per spec in a single forward pass over `document`.
///
/// # Errors
///
/// - [`Error::EmptyDocument`] if the document has no lines
/// - [`Error::EmptyPlan`] if `specs` is empty
/// - [`Error::BlockNotFound`] if a start or end boundary never matches
/// - [`Error::InvalidSpanOrder`] if a block starts at or before the previous block's end
pub fn locate_blocks(document: &Document, specs: &[BlockSpec]) -> Result<Vec<Span>> {
    if document.is_empty() {
        return Err(Error::EmptyDocument);
    }
    if specs.is_empty() {
        return Err(Error::EmptyPlan);
    }
    for (k, spec) in specs.iter().enumerate() {
        if spec.start_marker.is_empty() {
            return Err(Error::InvalidSpec {
                spec_index: k,
                name: spec.name.clone(),
                reason: "start marker is empty".into(),
            });
        }
    }

    let mut state = ScanState::new(specs);
    for index in 0..document.len() {
        if state.is_complete() {
            break;
        }
        if let Some(line) = document.line(index) {
            state.feed(line);
        }
    }
    tracing::debug!(lines_scanned = state.cursor(), "scan finished");
    state.finish()
}
