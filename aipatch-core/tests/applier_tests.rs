// aipatch-core/tests/applier_tests.rs
//! Integration tests applying the six built-in rules to a condensed copy of
//! the target module, exercising the full read/patch/overwrite cycle.

use anyhow::Result;
use std::fs;
use tempfile::TempDir;

use aipatch_core::{apply_file, preview, ChangeCategory, PatchConfig, PatchEngine};

/// A condensed pre-patch rendition of `aiAnalysis.js` containing all six
/// anchor contexts with their original indentation and trailing whitespace.
fn pre_patch_fixture() -> String {
    [
        "// aiAnalysis.js — classification post-processing (fixture)",
        "const analyzeGarbageComposition = (data) => {",
        "      let wasteType = null;",
        "      ",
        "      // Enhanced waste classification",
        "      if (hsv.s > 0.8 && hsv.v > 0.6 && colorVariance > 100) {",
        "        // Bright, saturated colors = plastic bottles, bags, containers",
        "        wasteType = 'plastic';",
        "      } else if (hsv.h >= 15 && hsv.h <= 45 && hsv.s > 0.4) {",
        "        // Brown/orange tones = organic waste, food scraps",
        "        wasteType = 'organic';",
        "      }",
        "      return wasteType;",
        "};",
        "",
        "const analyzePotholesAdvanced = (predictions) => {",
        "  const detectedObjects = predictions.filter(p => p.score > 0.3);",
        "  const vehicles = detectedObjects.filter(obj => ",
        "    ['car', 'truck', 'bus', 'motorcycle', 'bicycle'].includes(obj.class)",
        "  );",
        "  const people = detectedObjects.filter(obj => obj.class === 'person');",
        "  ",
        "  // Check for garbage/debris in potholes or on road",
        "  const roadDebris = detectedObjects.filter(obj => ",
        "    ['bottle', 'cup', 'bowl', 'banana', 'apple', 'book', 'cell phone', 'backpack'].includes(obj.class)",
        "  );",
        "  ",
        "  if (garbageAnalysis.hasGarbage) {",
        "    if (roadDebris.length > 0) {",
        "      analysis += `Garbage/debris detected in pothole area. `;",
        "      confidence += 0.1;",
        "    }",
        "  }",
        "  ",
        "  // Traffic safety assessment",
        "  if (vehicles.length >= 2 || (vehicles.length >= 1 && people.length >= 1)) {",
        "    analysis += `High traffic area (${vehicles.length} vehicles). `;",
        "  }",
        "};",
        "",
        "const analyzeGarbageAdvanced = (predictions) => {",
        "  const detectedObjects = predictions.filter(p => p.score > 0.3);",
        "  const animals = detectedObjects.filter(obj => ",
        "    ['bird', 'cat', 'dog', 'mouse', 'cow', 'sheep'].includes(obj.class)",
        "  );",
        "  ",
        "  const people = detectedObjects.filter(obj => obj.class === 'person');",
        "  ",
        "  let severityScore = 0;",
        "  ",
        "    // Determine severity level and priority",
        "    if (severityScore >= 10 || animals.length > 0) {",
        "      priority = 'critical';",
        "      severityLevel = 'severe';",
        "    } else if (severityScore >= 7) {",
        "      priority = 'high';",
        "    }",
        "  ",
        "  // Objétnames résumé — naïve heuristics below", // non-ASCII must survive
        "  const highConfidenceObjects = detectedObjects.filter(obj => obj.score > 0.6);",
        "  if (highConfidenceObjects.length > 0) {",
        "    const objectNames = highConfidenceObjects.map(obj => ",
        "      `${obj.class} (${Math.round(obj.score * 100)}%)`",
        "    ).join(', ');",
        "    analysis += `Detected objects: ${objectNames}. `;",
        "  }",
        "  ",
        "  // Cap confidence",
        "  confidence = Math.min(confidence, 0.95);",
        "};",
    ]
    .join("\n")
}

fn default_engine() -> PatchEngine {
    PatchEngine::new(PatchConfig::load_default_rules().unwrap()).unwrap()
}

#[test_log::test]
fn test_all_six_rules_apply_in_order() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("aiAnalysis.js");
    fs::write(&target, pre_patch_fixture())?;

    let outcome = apply_file(&target, &default_engine())?;
    assert!(outcome.report.changed);
    assert_eq!(outcome.report.summary.len(), 6);
    for item in &outcome.report.summary {
        assert_eq!(item.occurrences, 1, "rule {} should match exactly once", item.rule_name);
    }
    assert_eq!(
        outcome.report.categories_applied(),
        vec![
            ChangeCategory::ColorAnalysis,
            ChangeCategory::PotholeAnalysis,
            ChangeCategory::GarbageAnalysis,
        ]
    );

    let patched = fs::read_to_string(&target)?;
    // Rule 1: the black bag branch lands between the plastic and organic branches.
    assert!(patched.contains("} else if (brightness < 50 && hsv.s < 0.2 && colorVariance < 20) {"));
    assert!(patched.contains("// Very dark, low saturation, low variance = likely black plastic bags"));
    // Rule 2: backpack is dropped from road debris and tracked separately.
    assert!(!patched.contains("'cell phone', 'backpack'"));
    assert!(patched.contains("// Check for potential garbage bags misclassified as personal items"));
    // Rule 3: the warning sits inside the pothole analysis, before traffic safety.
    assert!(patched.contains("if (potentialGarbageBags.length > 1) {"));
    assert!(patched.contains("Might be garbage accumulation."));
    // Rule 4: the bag filter is inserted between the animal and people filters.
    assert!(patched.contains("// Common misclassifications for garbage bags"));
    // Rule 5: the severity condition grows a third disjunct.
    assert!(patched.contains("if (severityScore >= 10 || animals.length > 0 || potentialGarbageBags.length >= 3) {"));
    // Rule 6: the note and confidence boost precede the confidence cap.
    assert!(patched.contains("analysis += `AI recognized ${potentialGarbageBags.length} object(s) likely to be garbage bags. `;"));
    assert!(patched.contains("confidence += 0.15; // Boost confidence as we handled the misclassification"));
    // Untouched non-ASCII text survives byte-for-byte.
    assert!(patched.contains("// Objétnames résumé — naïve heuristics below"));
    Ok(())
}

#[test_log::test]
fn test_inserted_branch_stays_in_its_conditional_chain() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("aiAnalysis.js");
    fs::write(&target, pre_patch_fixture())?;

    apply_file(&target, &default_engine())?;
    let patched = fs::read_to_string(&target)?;

    // The new branch must chain directly from the bright-plastic branch and
    // into the pre-existing organic branch.
    let plastic = patched.find("wasteType = 'plastic';").unwrap();
    let black_bag = patched.find("} else if (brightness < 50").unwrap();
    let organic = patched.find("} else if (hsv.h >= 15").unwrap();
    assert!(plastic < black_bag && black_bag < organic);
    Ok(())
}

#[test_log::test]
fn test_noop_input_is_byte_identical() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("other.js");
    let content = "const unrelated = 1;\n// naïve café ☂ — nothing to patch\n";
    fs::write(&target, content)?;

    let outcome = apply_file(&target, &default_engine())?;
    assert!(!outcome.report.changed);
    assert_eq!(outcome.report.stale_rules().count(), 6);
    assert_eq!(fs::read_to_string(&target)?, content);
    Ok(())
}

#[test_log::test]
fn test_single_rule_isolation() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("severity.js");
    let content = "    if (severityScore >= 10 || animals.length > 0) {\n      priority = 'critical';\n    }\n";
    fs::write(&target, content)?;

    let outcome = apply_file(&target, &default_engine())?;
    let matched: Vec<&str> = outcome
        .report
        .summary
        .iter()
        .filter(|s| s.occurrences > 0)
        .map(|s| s.rule_name.as_str())
        .collect();
    assert_eq!(matched, vec!["garbage_severity_condition"]);

    let patched = fs::read_to_string(&target)?;
    assert_eq!(
        patched,
        "    if (severityScore >= 10 || animals.length > 0 || potentialGarbageBags.length >= 3) {\n      priority = 'critical';\n    }\n"
    );
    Ok(())
}

#[test_log::test]
fn test_missing_file_errors_and_is_not_created() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("does_not_exist.js");

    let result = apply_file(&target, &default_engine());
    assert!(result.is_err());
    assert!(!target.exists());
}

#[test_log::test]
fn test_preview_does_not_write() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("aiAnalysis.js");
    let content = pre_patch_fixture();
    fs::write(&target, &content)?;

    let outcome = preview(&target, &default_engine())?;
    assert!(outcome.report.changed);
    assert_ne!(outcome.patched, outcome.original);
    assert_eq!(fs::read_to_string(&target)?, content);
    Ok(())
}

#[test_log::test]
fn test_double_application_duplicates_only_the_color_branch() -> Result<()> {
    // The patterns give no idempotence guarantee. After the first pass, five
    // of the six anchors no longer match, but rule 1's anchor (the bright
    // plastic branch) is still present, so a second run inserts the black bag
    // branch again. This test documents that behavior.
    let dir = TempDir::new()?;
    let target = dir.path().join("aiAnalysis.js");
    fs::write(&target, pre_patch_fixture())?;

    let engine = default_engine();
    apply_file(&target, &engine)?;
    let second = apply_file(&target, &engine)?;

    let rerun_matches: Vec<&str> = second
        .report
        .summary
        .iter()
        .filter(|s| s.occurrences > 0)
        .map(|s| s.rule_name.as_str())
        .collect();
    assert_eq!(rerun_matches, vec!["black_bag_color_detection"]);

    let patched = fs::read_to_string(&target)?;
    assert_eq!(patched.matches("likely black plastic bags").count(), 2);
    assert_eq!(patched.matches("potentialGarbageBags.length >= 3").count(), 1);
    Ok(())
}
