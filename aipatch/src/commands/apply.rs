//! Apply command implementation: load the rule set, patch the target file,
//! and print the confirmation output.

use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{self, Write};
use std::path::Path;

use aipatch_core::{
    applier::{self, PatchOutcome},
    config::PatchConfig,
    engine::PatchEngine,
};

use crate::cli::Cli;
use crate::ui::diff_viewer;
use crate::ui::output_format;
use is_terminal::IsTerminal;

/// The main operation runner for the aipatch CLI.
pub fn run(args: &Cli) -> Result<()> {
    info!("Starting aipatch operation.");

    let config = match &args.rules {
        Some(path) => PatchConfig::load_from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => PatchConfig::load_default_rules()?,
    };

    let engine = PatchEngine::new(config)?;

    let outcome = if args.dry_run {
        applier::preview(&args.file, &engine)?
    } else {
        applier::apply_file(&args.file, &engine)?
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let supports_color = stdout.is_terminal();

    if args.dry_run || args.diff {
        diff_viewer::print_diff(&outcome.original, &outcome.patched, &mut writer, supports_color)?;
    }

    report_stale_rules(&outcome);
    print_confirmation(&mut writer, &outcome, &args.file, args.dry_run, supports_color)?;

    info!("aipatch operation completed.");
    Ok(())
}

/// A stale rule means the target no longer contains the anchor text the rule
/// expects, usually because the edit is already in place.
fn report_stale_rules(outcome: &PatchOutcome) {
    for item in outcome.report.stale_rules() {
        warn!(
            "Rule '{}' ({}) did not apply; its anchor pattern was not found.",
            item.rule_name, item.category
        );
    }
}

fn print_confirmation(
    writer: &mut dyn Write,
    outcome: &PatchOutcome,
    path: &Path,
    dry_run: bool,
    supports_color: bool,
) -> Result<()> {
    if dry_run {
        output_format::print_info_message(
            writer,
            &format!("Dry run: {} was not modified.", path.display()),
            supports_color,
        )?;
        return Ok(());
    }

    output_format::print_success_message(
        writer,
        &format!("Successfully applied AI accuracy improvements to {}", path.display()),
        supports_color,
    )?;

    writeln!(writer, "Changes made:")?;
    let categories = outcome.report.categories_applied();
    if categories.is_empty() {
        writeln!(writer, "  (no patterns matched; file left unchanged)")?;
    } else {
        for (index, category) in categories.iter().enumerate() {
            writeln!(writer, "  {}. {}", index + 1, category.describe())?;
        }
    }

    Ok(())
}
