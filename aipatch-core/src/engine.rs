//! The sequential patch engine.
//!
//! Applies an ordered rule set to a single in-memory text buffer. Each rule
//! performs a global substitution over the buffer produced by the rule before
//! it, so rules are not commutative and their order is never changed.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};

use crate::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};
use crate::config::{PatchConfig, PatchRule, PatchSummaryItem};

#[derive(Debug)]
pub struct PatchEngine {
    compiled_rules: Arc<CompiledRules>,
    config: PatchConfig,
}

impl PatchEngine {
    pub fn new(config: PatchConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile patch rules for PatchEngine")?;

        Ok(Self { compiled_rules, config })
    }

    /// Applies every rule in order to `content` and returns the patched text
    /// together with a per-rule summary.
    ///
    /// A rule whose pattern matches nowhere leaves the buffer unchanged for
    /// that step. That outcome is recorded as `occurrences: 0` and logged as
    /// a warning, because it usually means the target file has drifted from
    /// (or already contains) what the pattern expects.
    pub fn apply(&self, content: &str) -> Result<(String, Vec<PatchSummaryItem>)> {
        let rules_by_name: HashMap<&str, &PatchRule> = self
            .config
            .rules
            .iter()
            .map(|rule| (rule.name.as_str(), rule))
            .collect();

        let mut buffer = content.to_string();
        let mut summary = Vec::with_capacity(self.compiled_rules.rules.len());

        for compiled_rule in &self.compiled_rules.rules {
            if let Some(rule_config) = rules_by_name.get(compiled_rule.name.as_str()) {
                if let Some(false) = rule_config.enabled {
                    debug!("Rule '{}' is disabled; skipping.", compiled_rule.name);
                    continue;
                }
            }

            let (next, occurrences) = apply_rule(compiled_rule, &buffer)?;
            if occurrences == 0 {
                warn!(
                    "Rule '{}' matched nothing; the target may already be patched or has drifted.",
                    compiled_rule.name
                );
            } else {
                debug!("Rule '{}' applied {} substitution(s).", compiled_rule.name, occurrences);
            }

            summary.push(PatchSummaryItem {
                rule_name: compiled_rule.name.clone(),
                category: compiled_rule.category,
                occurrences,
            });
            buffer = next;
        }

        Ok((buffer, summary))
    }

    pub fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }
}

/// Performs one global substitution pass of `rule` over `content`.
///
/// Replacement templates substitute `$N` with the match's capture groups by
/// literal string replacement, so `$` sequences that are not group references
/// (such as JavaScript `${...}` template syntax) pass through verbatim.
fn apply_rule(rule: &CompiledRule, content: &str) -> Result<(String, usize)> {
    let mut patched = String::with_capacity(content.len());
    let mut last_end = 0usize;
    let mut occurrences = 0usize;

    for caps in rule.regex.captures_iter(content) {
        let full_match = caps.get(0).ok_or_else(|| anyhow!("Regex capture failed"))?;

        let mut replacement = rule.replacement.clone();
        // Highest group first, so `$12` is consumed before `$1` can eat its prefix.
        for i in (1..caps.len()).rev() {
            if let Some(group) = caps.get(i) {
                replacement = replacement.replace(&format!("${}", i), group.as_str());
            }
        }

        patched.push_str(&content[last_end..full_match.start()]);
        patched.push_str(&replacement);
        last_end = full_match.end();
        occurrences += 1;
    }
    patched.push_str(&content[last_end..]);

    Ok((patched, occurrences))
}
