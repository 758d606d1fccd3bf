//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// blocksplice - replace marked blocks of a text file in one pass
#[derive(Parser, Debug)]
#[command(name = "splice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Replace every block listed in a plan and write the file back
    ///
    /// Blocks are located in a single top-to-bottom pass. If any block
    /// cannot be located the file is left untouched.
    ///
    /// Examples:
    ///   splice apply src/page.tsx --plan splice.toml
    ///   splice apply src/page.tsx --plan splice.toml --dry-run --diff
    Apply {
        /// File to edit in place
        file: PathBuf,

        /// Plan file (.toml, .json, .yaml) listing the blocks
        #[arg(short, long)]
        plan: PathBuf,

        /// Compute the result without writing it
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff of the change
        #[arg(long)]
        diff: bool,

        /// Output as JSON for scripting
        #[arg(long, conflicts_with = "diff")]
        json: bool,
    },

    /// Report where each block is, without modifying the file
    Locate {
        /// File to scan
        file: PathBuf,

        /// Plan file (.toml, .json, .yaml) listing the blocks
        #[arg(short, long)]
        plan: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
