//! Splice plans: block specs loaded from a TOML, JSON or YAML file.
//!
//! ```toml
//! [[block]]
//! name = "handleExportPdf"
//! start = "const handleExportPdf = () => {"
//! end = { kind = "closing-line", token = "};", min_lines_after_start = 300 }
//! replacement_file = "export_pdf.tsx"
//!
//! [[block]]
//! name = "handleExportPlaceCards"
//! start = "const handleExportPlaceCards = () => {"
//! end = { kind = "brace-depth" }
//! replacement = """
//!   const handleExportPlaceCards = () => {
//!     generatePlaceCardsPdf(currentProject, tables);
//!   };
//! """
//! ```
//!
//! `replacement_file` paths are resolved relative to the plan file.

use crate::boundary::EndRule;
use crate::error::{Error, Result};
use crate::spec::BlockSpec;
use serde::Deserialize;
use splice_fs::{ConfigStore, NormalizedPath, io};

/// One block entry in a plan file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanEntry {
    pub name: String,
    /// Substring identifying the block's first line.
    pub start: String,
    pub end: EndRule,
    #[serde(default)]
    pub replacement: Option<String>,
    #[serde(default)]
    pub replacement_file: Option<String>,
}

/// Ordered list of blocks to replace in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SplicePlan {
    #[serde(default, rename = "block", alias = "blocks")]
    pub blocks: Vec<PlanEntry>,
    /// Directory `replacement_file` paths are relative to.
    #[serde(skip)]
    base_dir: Option<NormalizedPath>,
}

impl SplicePlan {
    pub fn new(blocks: Vec<PlanEntry>) -> Self {
        Self {
            blocks,
            base_dir: None,
        }
    }

    /// Load a plan, picking the format from the file extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let mut plan: Self = ConfigStore::new().load(path)?;
        plan.base_dir = path.parent();
        tracing::debug!(path = %path, blocks = plan.blocks.len(), "loaded splice plan");
        Ok(plan)
    }

    /// Resolve replacements and boundary strategies into block specs.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPlan`] if the plan lists no blocks
    /// - [`Error::InvalidSpec`] if an entry has an empty start marker, or not
    ///   exactly one of `replacement` / `replacement_file`
    /// - [`Error::InvalidPattern`] for a bad `pattern` regex
    /// - [`Error::Fs`] if a replacement file cannot be read
    pub fn into_specs(self) -> Result<Vec<BlockSpec>> {
        if self.blocks.is_empty() {
            return Err(Error::EmptyPlan);
        }

        let base_dir = self.base_dir;
        self.blocks
            .into_iter()
            .enumerate()
            .map(|(k, entry)| entry.into_spec(k, base_dir.as_ref()))
            .collect()
    }
}

impl PlanEntry {
    fn into_spec(self, spec_index: usize, base_dir: Option<&NormalizedPath>) -> Result<BlockSpec> {
        let invalid = |reason: &str| Error::InvalidSpec {
            spec_index,
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.start.is_empty() {
            return Err(invalid("start marker is empty"));
        }

        let replacement = match (&self.replacement, &self.replacement_file) {
            (Some(text), None) => text.clone(),
            (None, Some(file)) => {
                let path = match base_dir {
                    Some(dir) => dir.join(file),
                    None => NormalizedPath::new(file),
                };
                io::read_text(&path)?
            }
            (Some(_), Some(_)) => {
                return Err(invalid("set either replacement or replacement_file, not both"));
            }
            (None, None) => return Err(invalid("missing replacement or replacement_file")),
        };

        Ok(BlockSpec {
            end: self.end.build()?,
            name: self.name,
            start_marker: self.start,
            replacement,
        })
    }
}
