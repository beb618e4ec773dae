//! Surface statistics for `.em` sources.
//!
//! All counts are raw pattern occurrences over the whole text, including
//! comments and string literals.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Statistics;

static FN_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)fn\s+[A-Za-z_][A-Za-z0-9_]*\s*\(").unwrap());

static USE_STMT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*use(?-u:\b).*?;").unwrap());

static MATCH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?-u:\b)match(?-u:\b)").unwrap());

static DEFER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?-u:\b)defer(?-u:\b)").unwrap());

/// Gather line, function, import, `match` and `defer` counts.
pub fn extract_stats(src: &str) -> Statistics {
    Statistics {
        line_count: count_lines(src),
        function_count: FN_DECL_RE.find_iter(src).count(),
        import_count: USE_STMT_RE.find_iter(src).count(),
        match_count: MATCH_RE.find_iter(src).count(),
        defer_count: DEFER_RE.find_iter(src).count(),
    }
}

/// Lines after CRLF normalisation. Empty text is one line, and a trailing
/// newline starts a final empty line.
pub fn count_lines(src: &str) -> usize {
    src.replace("\r\n", "\n").split('\n').count()
}
