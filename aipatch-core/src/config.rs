//! Configuration management for `aipatch-core`.
//!
//! This module defines the core data structures for patch rules. It handles
//! serialization/deserialization of YAML rule sets and provides utilities for
//! loading and validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The area of the target module a rule adjusts.
///
/// Each category corresponds to one line of the confirmation output printed
/// after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeCategory {
    /// HSV/brightness heuristics in `analyzeGarbageComposition`.
    ColorAnalysis,
    /// Object filters and warnings in `analyzePotholesAdvanced`.
    PotholeAnalysis,
    /// Object filters, severity, and confidence in `analyzeGarbageAdvanced`.
    GarbageAnalysis,
}

impl ChangeCategory {
    /// Human-readable summary line for the confirmation output.
    pub fn describe(&self) -> &'static str {
        match self {
            ChangeCategory::ColorAnalysis => {
                "Added black plastic bag detection in color analysis"
            }
            ChangeCategory::PotholeAnalysis => {
                "Updated pothole analysis to handle misclassified garbage bags"
            }
            ChangeCategory::GarbageAnalysis => {
                "Updated garbage analysis to recognize and boost confidence for misclassified bags"
            }
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ChangeCategory::ColorAnalysis => "color-analysis",
            ChangeCategory::PotholeAnalysis => "pothole-analysis",
            ChangeCategory::GarbageAnalysis => "garbage-analysis",
        };
        write!(f, "{}", name)
    }
}

/// Represents a single find-and-replace patch rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct PatchRule {
    /// Unique identifier for the rule (e.g., "black_bag_color_detection").
    pub name: String,
    /// Human-readable description of the edit the rule performs.
    pub description: Option<String>,
    /// The regex pattern anchoring the edit.
    pub pattern: Option<String>,
    /// The replacement template. `$N` references capture group `N` of the
    /// pattern; any other `$` sequence is emitted verbatim.
    pub replacement: String,
    /// Which confirmation category this rule belongs to.
    pub category: ChangeCategory,
    /// If true, enables multiline mode for the regex engine.
    pub multiline: bool,
    /// If true, the dot character `.` in regex will match newlines.
    pub dot_matches_new_line: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for PatchRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            replacement: String::new(),
            category: ChangeCategory::GarbageAnalysis,
            multiline: false,
            dot_matches_new_line: false,
            enabled: None,
        }
    }
}

/// Represents the top-level rule set for aipatch.
///
/// Rule order is load order and application order; rules are never reordered.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct PatchConfig {
    /// An ordered list of patch rules.
    pub rules: Vec<PatchRule>,
}

/// Represents the outcome of one rule within a patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSummaryItem {
    pub rule_name: String,
    pub category: ChangeCategory,
    /// Number of non-overlapping matches replaced. Zero means the rule's
    /// anchor was absent and the buffer passed through unchanged.
    pub occurrences: usize,
}

impl PatchConfig {
    /// Loads an alternate rule set from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let config: PatchConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the six built-in rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: PatchConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }
}

/// Validates rule integrity (regex compilation, capture groups).
///
/// Malformed patterns are an authoring error, so they fail the load rather
/// than surfacing at apply time.
pub fn validate_rules(rules: &[PatchRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();
    let capture_group_regex = Regex::new(r"\$(\d+)").unwrap();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
        }

        if let Err(e) = Regex::new(pattern) {
            errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
            continue;
        }

        let mut group_count = 0;
        let mut is_escaped = false;
        for c in pattern.chars() {
            match c {
                '\\' => is_escaped = !is_escaped,
                '(' if !is_escaped => group_count += 1,
                _ => is_escaped = false,
            }
        }

        for cap in capture_group_regex.captures_iter(&rule.replacement) {
            if let Some(group_num_str) = cap.get(1) {
                if let Ok(group_num) = group_num_str.as_str().parse::<usize>() {
                    if group_num > group_count {
                        errors.push(format!(
                            "Rule '{}': replacement references non-existent capture group '${}'.",
                            rule.name, group_num
                        ));
                    }
                }
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
