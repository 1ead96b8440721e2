//! compiler.rs - Manages the compilation and caching of patch rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `PatchConfig` into `CompiledRules`, which are ready for application to a
//! text buffer. It uses a global, shared cache to avoid redundant compilation.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{ChangeCategory, PatchConfig, PatchRule, MAX_PATTERN_LENGTH};
use crate::errors::AipatchError;

/// Represents a single compiled patch rule.
///
/// This struct holds a compiled regular expression along with its associated
/// replacement template and metadata, ready for application to content.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The replacement template for matches of this rule's pattern.
    pub replacement: String,
    /// The unique name of the patch rule.
    pub name: String,
    /// The confirmation category the rule belongs to.
    pub category: ChangeCategory,
}

/// Represents the ordered collection of compiled rules for a patch run.
///
/// Rule order is preserved from the source `PatchConfig`; the engine relies
/// on it because rule `N` matches against the output of rule `N-1`.
#[derive(Debug)]
pub struct CompiledRules {
    /// Compiled rules, in application order.
    pub rules: Vec<CompiledRule>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled rules.
    /// The key is a hash of the `PatchConfig`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

/// Hashes the `PatchConfig` to create a stable, unique key for the cache.
///
/// The rules are hashed in their given order: application order is part of a
/// config's identity, so the same rules in a different order must not share a
/// cache entry.
fn hash_config(config: &PatchConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.rules.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a list of `PatchRule`s into `CompiledRules`.
/// This is the low-level function that performs the actual regex compilation.
pub fn compile_rules(rules_to_compile: Vec<PatchRule>) -> Result<CompiledRules, AipatchError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        match rule.pattern.as_ref() {
            Some(pattern) => {
                debug!(
                    "Attempting to compile rule: '{}' with pattern '{:?}'",
                    &rule.name, pattern
                );

                if pattern.len() > MAX_PATTERN_LENGTH {
                    compilation_errors.push(AipatchError::PatternLengthExceeded(
                        rule.name,
                        pattern.len(),
                        MAX_PATTERN_LENGTH,
                    ));
                    continue;
                }

                let regex_result = RegexBuilder::new(pattern)
                    .multi_line(rule.multiline)
                    .dot_matches_new_line(rule.dot_matches_new_line)
                    .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                    .build();

                match regex_result {
                    Ok(regex) => {
                        debug!("Rule '{}' compiled successfully.", &rule.name);
                        compiled_rules.push(CompiledRule {
                            regex,
                            replacement: rule.replacement,
                            name: rule.name,
                            category: rule.category,
                        });
                    }
                    Err(e) => {
                        compilation_errors.push(AipatchError::RuleCompilationError(rule.name, e));
                    }
                }
            }
            None => {
                warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
                continue;
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(AipatchError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
        Ok(CompiledRules { rules: compiled_rules })
    }
}

/// Gets a `CompiledRules` instance from the cache or compiles them if not found.
///
/// This is the public entry point for retrieving compiled rules. It returns an
/// `Arc` to a `CompiledRules` instance, allowing for cheap sharing.
pub fn get_or_compile_rules(config: &PatchConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_RULES_CACHE.read().unwrap();
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rules));
        }
    } // Read lock is released here.

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = compile_rules(config.rules.clone())?;
    let compiled_arc = Arc::new(compiled);

    COMPILED_RULES_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}
