//! Heuristic explainer for `.em` sources.
//!
//! Combines the feature detector, keyword scanner and statistics into a
//! [`Prediction`]. Nothing here parses EMP: the pass list is a fixed narrative
//! and the hints are gated on surface-detected feature ids only.

use std::sync::LazyLock;

use regex::Regex;

use crate::features::detect_features;
use crate::keywords::scan_keywords;
use crate::stats::extract_stats;
use crate::types::Prediction;

/// Test files named `*_fail.em` are expected to be rejected by the compiler.
static FAIL_PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)_fail\.em$").unwrap());

/// The conceptual compiler pipeline, in order.
pub const PASSES: [&str; 6] = [
    "Lexer: turns source into tokens (comments/strings/f-strings/ranges/::/=> etc). See #22_lexer_tokens.md",
    "Parser: builds an AST (items, stmts, expressions, types). See #23_grammar_implemented.md",
    "Typecheck: resolves names, infers/coerces literals, checks calls/method sugar, validates match arms.",
    "Borrow/ownership: enforces move/borrow rules unless inside @emp off/@emp mm off regions.",
    "Drop insertion: inserts deterministic drops (disabled in @emp off/@emp mm off regions).",
    "Codegen (LLVM): lowers typed AST to LLVM IR and links.",
];

pub const FAIL_HINT: &str =
    "This file name ends with _fail.em, so tests expect the compiler to reject it.";
pub const MANUAL_MEMORY_HINT: &str = "Manual memory mode is active for at least part of the file; some allocation/free primitives become available and drop insertion is disabled in the region.";
pub const EMP_OFF_HINT: &str = "@emp off disables ownership/borrow checking in that block, but still has 'no escape' boundary checks.";
pub const FSTRING_HINT: &str = "f-strings parse {expr} interpolations and {{/}} escaping; typecheck only allows certain interpolation types (string/*u8/int/bool/char). ";
pub const IMPORT_HINT: &str =
    "Imports are parsed as a top-level item; module resolution is handled later by the resolver.";

/// True if `path` follows the `_fail.em` naming convention (case-insensitive).
pub fn is_fail_path(path: &str) -> bool {
    FAIL_PATH_RE.is_match(path)
}

/// Explain `src`. `file_path` is only used for the `_fail.em` convention and
/// is echoed back in the result.
pub fn predict(src: &str, file_path: Option<&str>) -> Prediction {
    let is_fail = file_path.is_some_and(is_fail_path);
    let statistics = extract_stats(src);
    let features = detect_features(src);
    let keywords = scan_keywords(src).into_iter().map(String::from).collect();

    let mut pred = Prediction {
        file_path: file_path.map(String::from),
        is_fail,
        statistics,
        features,
        keywords,
        passes: PASSES.iter().map(|p| p.to_string()).collect(),
        hints: Vec::new(),
    };
    pred.hints = hints(&pred);

    log::debug!(
        "predicted {}: {} features, {} keywords, {} hints",
        file_path.unwrap_or("(pasted)"),
        pred.features.len(),
        pred.keywords.len(),
        pred.hints.len()
    );

    pred
}

/// Contextual notes, each gated independently.
fn hints(pred: &Prediction) -> Vec<String> {
    let gates = [
        (pred.is_fail, FAIL_HINT),
        (
            pred.has_feature("mm_file") || pred.has_feature("mm_block"),
            MANUAL_MEMORY_HINT,
        ),
        (pred.has_feature("emp_off"), EMP_OFF_HINT),
        (pred.has_feature("fstring"), FSTRING_HINT),
        (pred.has_feature("use"), IMPORT_HINT),
    ];

    gates
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, hint)| hint.to_string())
        .collect()
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
