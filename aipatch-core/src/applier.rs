//! applier.rs
//! In-place application of a patch run to the target file.
//!
//! Reads the whole file as UTF-8, runs the engine over it, and writes the
//! result back to the same path. The write truncates; no backup or temp-file
//! rename is taken, matching the tool's single-small-file use case.
//!
//! License: MIT OR Apache-2.0

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::config::{ChangeCategory, PatchSummaryItem};
use crate::engine::PatchEngine;

/// Per-run report returned by [`apply_file`] and [`preview`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    /// One entry per applied rule, in application order.
    pub summary: Vec<PatchSummaryItem>,
    /// True if at least one rule matched and the buffer changed.
    pub changed: bool,
}

impl PatchReport {
    /// Categories with at least one matching rule, in first-seen order.
    pub fn categories_applied(&self) -> Vec<ChangeCategory> {
        let mut categories = Vec::new();
        for item in &self.summary {
            if item.occurrences > 0 && !categories.contains(&item.category) {
                categories.push(item.category);
            }
        }
        categories
    }

    /// Rules whose anchor pattern matched nowhere.
    pub fn stale_rules(&self) -> impl Iterator<Item = &PatchSummaryItem> {
        self.summary.iter().filter(|item| item.occurrences == 0)
    }
}

/// Full outcome of a patch run, including both text buffers so callers can
/// render a diff.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub original: String,
    pub patched: String,
    pub report: PatchReport,
}

fn run_engine<P: AsRef<Path>>(path: P, engine: &PatchEngine) -> Result<PatchOutcome> {
    let path = path.as_ref();
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read target file {}", path.display()))?;

    let (patched, summary) = engine.apply(&original)?;
    let changed = patched != original;

    Ok(PatchOutcome {
        original,
        patched,
        report: PatchReport { summary, changed },
    })
}

/// Reads `path`, applies every rule in order, and overwrites the file with
/// the result.
///
/// I/O failures propagate; a missing target file is an error and is never
/// created. A run where no rule matches still rewrites the file with its
/// unchanged contents and succeeds.
pub fn apply_file<P: AsRef<Path>>(path: P, engine: &PatchEngine) -> Result<PatchOutcome> {
    let path = path.as_ref();
    info!("Patching {} in place.", path.display());

    let outcome = run_engine(path, engine)?;
    fs::write(path, &outcome.patched)
        .with_context(|| format!("Failed to write target file {}", path.display()))?;

    info!(
        "Patched {} ({} of {} rules matched).",
        path.display(),
        outcome.report.summary.iter().filter(|s| s.occurrences > 0).count(),
        outcome.report.summary.len()
    );
    Ok(outcome)
}

/// Runs the engine over `path` without writing anything back.
pub fn preview<P: AsRef<Path>>(path: P, engine: &PatchEngine) -> Result<PatchOutcome> {
    let path = path.as_ref();
    info!("Previewing patch of {} (dry run).", path.display());
    run_engine(path, engine)
}
