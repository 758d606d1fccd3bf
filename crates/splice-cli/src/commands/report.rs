//! Console and JSON rendering of splice results

use colored::Colorize;
use serde_json::{Value, json};
use similar::{ChangeTag, TextDiff};

use splice_blocks::{FileSplice, Span, SpliceOutcome};
use splice_fs::NormalizedPath;

pub(super) fn outcome_json(report: &FileSplice) -> Value {
    let outcome = &report.outcome;
    json!({
        "file": report.path.as_str(),
        "written": report.written,
        "lines_before": outcome.lines_before,
        "lines_after": outcome.lines_after(),
        "line_delta": outcome.line_delta(),
        "blocks": outcome.blocks.iter().map(|block| json!({
            "name": block.name,
            "start_line": block.span.first_line(),
            "end_line": block.span.last_line(),
            "replacement_lines": block.replacement_lines,
        })).collect::<Vec<_>>(),
    })
}

pub(super) fn spans_json(path: &NormalizedPath, names: &[&str], spans: &[Span]) -> Value {
    json!({
        "file": path.as_str(),
        "blocks": names.iter().zip(spans).map(|(name, span)| json!({
            "name": name,
            "start_line": span.first_line(),
            "end_line": span.last_line(),
            "lines": span.len(),
        })).collect::<Vec<_>>(),
    })
}

/// Print each replaced block and the overall line-count change.
pub(super) fn print_outcome(path: &NormalizedPath, outcome: &SpliceOutcome, written: bool) {
    let verb = if written { "Replaced" } else { "Would replace" };
    for block in &outcome.blocks {
        println!(
            "{} {}: {} ({} lines) -> {} lines",
            verb.green().bold(),
            block.name.cyan(),
            block.span,
            block.span.len(),
            block.replacement_lines
        );
    }

    let delta = outcome.line_delta();
    let delta_text = format!("{:+}", delta);
    let delta_text = if delta < 0 {
        delta_text.green()
    } else if delta > 0 {
        delta_text.yellow()
    } else {
        delta_text.normal()
    };
    println!(
        "{} {}: {} -> {} lines ({})",
        "Lines".bold(),
        path.as_str().yellow(),
        outcome.lines_before,
        outcome.lines_after(),
        delta_text
    );

    if !written {
        println!("{} Dry run, file not modified.", "OK".green().bold());
    }
}

pub(super) fn print_spans(path: &NormalizedPath, names: &[&str], spans: &[Span]) {
    println!("{} {}", "Blocks in".blue().bold(), path.as_str().yellow());
    for (name, span) in names.iter().zip(spans) {
        println!("  {}: {} ({} lines)", name.cyan(), span, span.len());
    }
}

/// Print a coloured unified diff between the original and spliced text.
pub(super) fn print_diff(path: &NormalizedPath, original: &str, updated: &str) {
    let diff = TextDiff::from_lines(original, updated);
    let a = format!("a/{}", path.as_str().trim_start_matches('/'));
    let b = format!("b/{}", path.as_str().trim_start_matches('/'));

    println!("{}", format!("--- {}", a).bold());
    println!("{}", format!("+++ {}", b).bold());
    let mut unified = diff.unified_diff();
    unified.context_radius(3);
    for hunk in unified.iter_hunks() {
        println!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let line = change.to_string_lossy();
            let line = line.trim_end_matches(['\n', '\r']);
            match change.tag() {
                ChangeTag::Delete => println!("{}", format!("-{}", line).red()),
                ChangeTag::Insert => println!("{}", format!("+{}", line).green()),
                ChangeTag::Equal => println!(" {}", line),
            }
        }
    }
}
