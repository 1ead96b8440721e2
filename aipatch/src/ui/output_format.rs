// aipatch/src/ui/output_format.rs
//! Console message formatting helpers.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

/// Prints the success confirmation line, with a green check mark when colors
/// are supported.
pub fn print_success_message(writer: &mut dyn Write, msg: &str, enable_colors: bool) -> Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "✓".green().bold(), msg)?;
    } else {
        writeln!(writer, "✓ {}", msg)?;
    }
    Ok(())
}

pub fn print_info_message(writer: &mut dyn Write, msg: &str, enable_colors: bool) -> Result<()> {
    if enable_colors {
        writeln!(writer, "{}", msg.cyan())?;
    } else {
        writeln!(writer, "{}", msg)?;
    }
    Ok(())
}
