// aipatch/src/ui/diff_viewer.rs
//! Unified diff rendering for the terminal.
//!
//! Highlights exactly what a patch run removed (red) and inserted (green).

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::Write;

/// Prints a line-oriented diff of `original` against `patched`.
pub fn print_diff(
    original: &str,
    patched: &str,
    writer: &mut dyn Write,
    enable_colors: bool,
) -> Result<()> {
    let patch = create_patch(original, patched);

    if patch.hunks().is_empty() {
        writeln!(writer, "No changes detected.")?;
        return Ok(());
    }

    for hunk in patch.hunks() {
        for line_change in hunk.lines() {
            match line_change {
                DiffLine::Delete(s) => {
                    let text = s.strip_suffix('\n').unwrap_or(s);
                    if enable_colors {
                        writeln!(writer, "{}", format!("- {}", text).red())?;
                    } else {
                        writeln!(writer, "- {}", text)?;
                    }
                }
                DiffLine::Insert(s) => {
                    let text = s.strip_suffix('\n').unwrap_or(s);
                    if enable_colors {
                        writeln!(writer, "{}", format!("+ {}", text).green())?;
                    } else {
                        writeln!(writer, "+ {}", text)?;
                    }
                }
                DiffLine::Context(s) => {
                    let text = s.strip_suffix('\n').unwrap_or(s);
                    writeln!(writer, "  {}", text)?;
                }
            }
        }
    }

    Ok(())
}
