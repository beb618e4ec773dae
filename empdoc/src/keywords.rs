//! Reserved-word scanner.

use std::sync::LazyLock;

use regex::Regex;

/// The EMP reserved-word vocabulary, in reporting order.
pub const KEYWORDS: [&str; 35] = [
    "fn", "auto", "let", "mut", "if", "else", "while", "for", "in", "return", "break",
    "continue", "struct", "enum", "match", "defer", "true", "false", "null", "export", "use",
    "from", "as", "extern", "unsafe", "class", "trait", "virtual", "new", "impl", "const", "dyn",
    "mm", "emp", "off",
];

static KEYWORD_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    KEYWORDS
        .iter()
        .map(|k| (*k, Regex::new(&format!(r"(?-u:\b){k}(?-u:\b)")).unwrap()))
        .collect()
});

/// Return the keywords that occur at least once as whole words in `src`.
///
/// Order follows [`KEYWORDS`], not the order of occurrence.
pub fn scan_keywords(src: &str) -> Vec<&'static str> {
    KEYWORD_RES
        .iter()
        .filter(|(_, re)| re.is_match(src))
        .map(|(k, _)| *k)
        .collect()
}
