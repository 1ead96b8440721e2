// aipatch-core/src/lib.rs
//! # aipatch Core Library
//!
//! `aipatch-core` provides the logic for applying an ordered set of regex
//! find-and-replace rules to a text file in place. It was built to maintain
//! the image-classification post-processing module of the reporting app:
//! six built-in rules adjust its misclassification heuristics (black plastic
//! bags read as backpacks/suitcases by COCO-SSD, debris filters, severity and
//! confidence tweaks).
//!
//! The library is deliberately not a parser: the target file is opaque text
//! and every edit is anchored on exact surrounding context. A rule whose
//! anchor is absent is a no-op for the buffer (reported as stale in the run
//! summary).
//!
//! ## Modules
//!
//! * `config`: Defines `PatchRule`s and `PatchConfig`, including loading and
//!   validating YAML rule sets.
//! * `compiler`: Compiles rules into cached `CompiledRules`.
//! * `engine`: The `PatchEngine`, which threads a single buffer through the
//!   rules in fixed order.
//! * `applier`: Read/apply/overwrite helpers for the target file, plus the
//!   dry-run `preview`.
//! * `errors`: The `AipatchError` enum.
//!
//! ## Usage Example
//!
//! ```no_run
//! use aipatch_core::{PatchConfig, PatchEngine, apply_file};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = PatchConfig::load_default_rules()?;
//!     let engine = PatchEngine::new(config)?;
//!     let outcome = apply_file("src/utils/aiAnalysis.js", &engine)?;
//!     for item in &outcome.report.summary {
//!         println!("{}: {} substitution(s)", item.rule_name, item.occurrences);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! License: MIT OR Apache-2.0

pub mod applier;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;

/// Re-exports the public configuration types and functions for managing patch rules.
pub use config::{
    validate_rules,
    ChangeCategory,
    PatchConfig,
    PatchRule,
    PatchSummaryItem,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::AipatchError;

/// Re-exports the patch engine.
pub use engine::PatchEngine;

/// Re-exports the in-place file applier and its report types.
pub use applier::{apply_file, preview, PatchOutcome, PatchReport};

/// Re-exports key types from the compiler module for advanced usage.
pub use compiler::{compile_rules, CompiledRule, CompiledRules};
