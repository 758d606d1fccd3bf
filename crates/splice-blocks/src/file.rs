//! Applying block specs to a file on disk.

use crate::document::Document;
use crate::error::Result;
use crate::spec::BlockSpec;
use crate::splice::{SpliceOutcome, replace_blocks};
use splice_fs::{LockedFile, NormalizedPath, compute_content_checksum, io};

/// What happened to a file.
#[derive(Debug, Clone)]
pub struct FileSplice {
    pub path: NormalizedPath,
    /// Text read from disk before splicing.
    pub original: String,
    pub outcome: SpliceOutcome,
    /// False for dry runs.
    pub written: bool,
}

impl FileSplice {
    /// Spliced text as it was (or would be) written.
    pub fn updated(&self) -> String {
        self.outcome.document.to_text()
    }
}

/// Lock `path`, splice every block, and write the result back.
///
/// The file stays locked for the whole cycle. Nothing is written when any
/// block fails to resolve or when the file changed on disk after it was read.
/// With `dry_run` the file is only read, without taking the lock.
pub fn splice_file(path: &NormalizedPath, specs: &[BlockSpec], dry_run: bool) -> Result<FileSplice> {
    if dry_run {
        let original = io::read_text(path)?;
        let outcome = replace_blocks(&Document::parse(&original), specs)?;
        tracing::info!(path = %path, "dry run, leaving file untouched");
        return Ok(FileSplice {
            path: path.clone(),
            original,
            outcome,
            written: false,
        });
    }

    let locked = LockedFile::open(path)?;
    let original = locked.read_text()?;
    let checksum = compute_content_checksum(&original);

    let outcome = replace_blocks(&Document::parse(&original), specs)?;
    locked.replace(&outcome.document.to_text(), &checksum)?;

    Ok(FileSplice {
        path: path.clone(),
        original,
        outcome,
        written: true,
    })
}

/// Resolve spans for `path` without modifying it.
pub fn locate_in_file(path: &NormalizedPath, specs: &[BlockSpec]) -> Result<Vec<crate::Span>> {
    let text = io::read_text(path)?;
    crate::locate_blocks(&Document::parse(&text), specs)
}
