//! Command implementations for the splice CLI

mod apply;
mod locate;
mod report;

pub use apply::{ApplyOptions, run_apply};
pub use locate::run_locate;

use std::path::Path;

use splice_blocks::{BlockSpec, SplicePlan};
use splice_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Resolve the target file and load the plan's block specs.
fn load_inputs(file: &Path, plan: &Path) -> Result<(NormalizedPath, Vec<BlockSpec>)> {
    if !plan.is_file() {
        return Err(CliError::user(format!(
            "Plan file not found: {}",
            plan.display()
        )));
    }
    if !file.is_file() {
        return Err(CliError::user(format!(
            "Target file not found: {}",
            file.display()
        )));
    }

    let target = NormalizedPath::canonicalize(file)?;
    let specs = SplicePlan::load(&NormalizedPath::canonicalize(plan)?)?.into_specs()?;
    tracing::debug!(target = %target, blocks = specs.len(), "inputs loaded");
    Ok((target, specs))
}
