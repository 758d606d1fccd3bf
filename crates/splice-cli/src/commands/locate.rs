//! Locate command implementation
//!
//! Reports block spans without touching the file.

use std::path::Path;

use splice_blocks::locate_in_file;

use super::{load_inputs, report};
use crate::error::Result;

/// Run the locate command
pub fn run_locate(file: &Path, plan: &Path, json: bool) -> Result<()> {
    let (target, specs) = load_inputs(file, plan)?;
    let spans = locate_in_file(&target, &specs)?;
    let names: Vec<&str> = specs.iter().map(|spec| spec.name.as_str()).collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report::spans_json(&target, &names, &spans))?
        );
    } else {
        report::print_spans(&target, &names, &spans);
    }
    Ok(())
}
