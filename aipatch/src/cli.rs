// aipatch/src/cli.rs
//! This file defines the command-line interface (CLI) for the aipatch
//! application.

use clap::Parser;
use std::path::PathBuf;

/// Default target, relative to the web app checkout the tool is run from.
pub const DEFAULT_TARGET: &str = "src/utils/aiAnalysis.js";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "aipatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Apply the AI accuracy improvements to the classification post-processing module",
    long_about = "aipatch rewrites the image-classification post-processing module in place, applying six ordered regex edits that make object misclassifications (black garbage bags read as backpacks or suitcases, debris near potholes) come out right. Patterns anchor on exact surrounding text; a rule whose anchor is absent is skipped and reported as stale."
)]
pub struct Cli {
    /// Target file to patch in place.
    #[arg(value_name = "FILE", default_value = DEFAULT_TARGET, help = "Target file to patch in place.")]
    pub file: PathBuf,

    /// Show the diff of what would change without writing anything.
    #[arg(long = "dry-run", short = 'n', help = "Print a unified diff of the pending changes without modifying the file.")]
    pub dry_run: bool,

    /// Print a unified diff of the changes after applying them.
    #[arg(long, short = 'D', help = "Print a unified diff of the changes after applying them.")]
    pub diff: bool,

    /// Path to an alternate YAML rule set.
    #[arg(long = "rules", value_name = "FILE", help = "Load patch rules from a YAML file instead of the built-in set.")]
    pub rules: Option<PathBuf>,

    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and warning messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for this run)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,
}
