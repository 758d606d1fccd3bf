//! Error types for splice-blocks

use std::fmt;

/// Result type for splice-blocks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which edge of a block could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end"),
        }
    }
}

/// Errors that can occur while locating or replacing blocks.
///
/// `spec_index` fields are 0-based; messages number blocks from 1.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("No block specs given")]
    EmptyPlan,

    #[error("Block {} ('{name}'): {boundary} not found", .spec_index + 1)]
    BlockNotFound {
        spec_index: usize,
        name: String,
        boundary: Boundary,
    },

    #[error(
        "Block {} ('{name}') starts at line {} but the previous block ends at line {}",
        .spec_index + 1,
        .start + 1,
        .previous_end + 1
    )]
    InvalidSpanOrder {
        spec_index: usize,
        name: String,
        start: usize,
        previous_end: usize,
    },

    #[error("Invalid block spec {} ('{name}'): {reason}", .spec_index + 1)]
    InvalidSpec {
        spec_index: usize,
        name: String,
        reason: String,
    },

    #[error("Invalid end pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Filesystem error: {0}")]
    Fs(#[from] splice_fs::Error),
}

impl Error {
    /// The 0-based index of the block spec this error concerns, if any.
    pub fn spec_index(&self) -> Option<usize> {
        match self {
            Error::BlockNotFound { spec_index, .. }
            | Error::InvalidSpanOrder { spec_index, .. }
            | Error::InvalidSpec { spec_index, .. } => Some(*spec_index),
            _ => None,
        }
    }
}
