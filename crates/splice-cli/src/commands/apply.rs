//! Apply command implementation
//!
//! Locates every block in the plan and splices in the replacements.

use std::path::Path;

use splice_blocks::splice_file;

use super::{load_inputs, report};
use crate::error::Result;

/// Flags for [`run_apply`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    pub dry_run: bool,
    pub diff: bool,
    pub json: bool,
}

/// Run the apply command
///
/// Nothing is written when any block fails to resolve or when `dry_run` is
/// set.
pub fn run_apply(file: &Path, plan: &Path, options: ApplyOptions) -> Result<()> {
    let (target, specs) = load_inputs(file, plan)?;

    let result = splice_file(&target, &specs, options.dry_run)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report::outcome_json(&result))?);
        return Ok(());
    }

    if options.diff {
        report::print_diff(&result.path, &result.original, &result.updated());
        println!();
    }
    report::print_outcome(&result.path, &result.outcome, result.written);
    Ok(())
}
