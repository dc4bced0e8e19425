//! CLI output formatting.
//!
//! Tiles are shown by their position on the poster, grouped by era, so the
//! listing reads as the poster's reading order:
//!
//! ```text
//! BC (2 tiles)
//! 001 BC0500_b.png
//! 002 BC0100_a.png
//! AD (2 tiles)
//! 003 0250_c.png
//! 004 1800_d.png
//! ```
//!
//! Each `format_*` function returns `Vec<String>` and is pure; `print_*`
//! wrappers write to stdout.

use crate::assemble::{AssembleEvent, AssembleReport};
use crate::naming::Era;
use crate::scan::OrderedFileList;
use std::ffi::OsString;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// File list
// ============================================================================

/// Format the ordered list with era headers and poster positions.
pub fn format_file_list(files: &OrderedFileList) -> Vec<String> {
    if files.is_empty() {
        return vec!["No tiles found (expected BC*.png or [0-9]*.png)".to_string()];
    }

    let mut lines = Vec::new();
    let mut current: Option<Era> = None;
    for (i, file) in files.files().iter().enumerate() {
        if current != Some(file.era) {
            current = Some(file.era);
            lines.push(format!(
                "{} ({})",
                file.era.label(),
                plural(files.count(file.era), "tile")
            ));
        }
        lines.push(format!("{} {}", format_index(i + 1), file.name));
    }
    lines
}

pub fn print_file_list(files: &OrderedFileList) {
    for line in format_file_list(files) {
        println!("{}", line);
    }
}

// ============================================================================
// Assembly progress
// ============================================================================

/// Format a single assembly event as display lines.
pub fn format_assemble_event(event: &AssembleEvent) -> Vec<String> {
    match event {
        AssembleEvent::StaleOutputRemoved { path, removed } => {
            let name = file_name(path);
            if *removed {
                vec![format!("==> Removed stale {name}")]
            } else {
                vec![format!("==> No stale {name} to remove")]
            }
        }
        AssembleEvent::Listed(files) => {
            let mut lines = vec![format!("==> Listing tiles ({})", plural(files.len(), "file"))];
            lines.extend(format_file_list(files).into_iter().map(|l| format!("    {l}")));
            lines
        }
        AssembleEvent::Composing {
            compositor,
            tiles,
            grid,
            geometry,
        } => vec![format!(
            "==> Composing {} with {compositor}: {grid} grid, {geometry} cells",
            plural(*tiles, "tile")
        )],
        AssembleEvent::Composed { output } => {
            vec![format!("==> Wrote {}", output.display())]
        }
    }
}

pub fn print_assemble_event(event: &AssembleEvent) {
    for line in format_assemble_event(event) {
        println!("{}", line);
    }
}

/// One-line summary after a successful run.
pub fn format_summary(report: &AssembleReport) -> String {
    format!(
        "Poster complete: {} ({} BC, {} AD)",
        file_name(&report.output),
        report.files.count(Era::BeforeEpoch),
        report.files.count(Era::AfterEpoch),
    )
}

/// In-place progress line for the native compositor (no newline).
pub fn format_progress(done: usize, total: usize) -> String {
    format!("composing {done}/{total}")
}

// ============================================================================
// Plan (dry run)
// ============================================================================

/// Quote an argument for display when it contains shell-significant characters.
fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.,+/:=@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Render a command line the way a user would type it.
pub fn format_command(program: &str, args: &[OsString]) -> String {
    std::iter::once(quote_arg(program))
        .chain(args.iter().map(|a| quote_arg(&a.to_string_lossy())))
        .collect::<Vec<_>>()
        .join(" ")
}
