//! blocksplice CLI
//!
//! Replaces marked blocks of a text file according to a splice plan.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::ApplyOptions;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Block splicing tool", "splice".green().bold());
            println!();
            println!("Run {} for available commands.", "splice --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply {
            file,
            plan,
            dry_run,
            diff,
            json,
        } => commands::run_apply(&file, &plan, ApplyOptions { dry_run, diff, json }),
        Commands::Locate { file, plan, json } => commands::run_locate(&file, &plan, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_fixture(dir: &std::path::Path) {
        fs::write(dir.join("page.tsx"), "a\nstart {\n  b\n}\nc\n").unwrap();
        fs::write(
            dir.join("plan.json"),
            r#"{"block": [{"name": "s", "start": "start", "end": {"kind": "closing-line", "token": "}"}, "replacement": "S\n"}]}"#,
        )
        .unwrap();
    }

    #[test]
    fn execute_locate_does_not_write() {
        let temp = TempDir::new().unwrap();
        write_fixture(temp.path());

        let cmd = Commands::Locate {
            file: temp.path().join("page.tsx"),
            plan: temp.path().join("plan.json"),
            json: true,
        };
        execute_command(cmd).unwrap();

        let content = fs::read_to_string(temp.path().join("page.tsx")).unwrap();
        assert_eq!(content, "a\nstart {\n  b\n}\nc\n");
    }

    #[test]
    fn execute_apply_json() {
        let temp = TempDir::new().unwrap();
        write_fixture(temp.path());

        let cmd = Commands::Apply {
            file: temp.path().join("page.tsx"),
            plan: temp.path().join("plan.json"),
            dry_run: false,
            diff: false,
            json: true,
        };
        execute_command(cmd).unwrap();

        let content = fs::read_to_string(temp.path().join("page.tsx")).unwrap();
        assert_eq!(content, "a\nS\nc\n");
    }

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
