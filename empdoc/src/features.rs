//! Syntax feature detector for `.em` sources.
//!
//! A fixed, ordered catalog of surface-pattern rules. Every rule is an
//! independent existence test over the whole text, not a tokenizer: a pattern
//! inside a comment or string literal still fires, and constructs split in
//! ways the pattern does not anticipate are missed.
//!
//! Catalog order is load-bearing. Output is deduplicated by id in first-fire
//! order, and the first rule that fires for an id owns its label and doc page.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::FeatureDescriptor;

/// How the patterns of one rule combine.
enum Test {
    /// Fires if any pattern matches.
    Any(Vec<Regex>),
    /// Fires only if every pattern matches somewhere in the text.
    All(Vec<Regex>),
}

impl Test {
    fn fires(&self, src: &str) -> bool {
        match self {
            Test::Any(patterns) => patterns.iter().any(|re| re.is_match(src)),
            Test::All(patterns) => patterns.iter().all(|re| re.is_match(src)),
        }
    }
}

/// One catalog entry.
pub struct Rule {
    pub id: &'static str,
    pub label: &'static str,
    pub doc: &'static str,
    test: Test,
}

impl Rule {
    fn descriptor(&self) -> FeatureDescriptor {
        FeatureDescriptor {
            id: self.id.to_string(),
            label: self.label.to_string(),
            doc: self.doc.to_string(),
        }
    }
}

const IDENT: &str = "[A-Za-z_][A-Za-z0-9_]*";

fn any(id: &'static str, label: &'static str, doc: &'static str, patterns: &[&str]) -> Rule {
    Rule {
        id,
        label,
        doc,
        test: Test::Any(compile(patterns)),
    }
}

fn all(id: &'static str, label: &'static str, doc: &'static str, patterns: &[&str]) -> Rule {
    Rule {
        id,
        label,
        doc,
        test: Test::All(compile(patterns)),
    }
}

/// Whole-word match. Boundaries are ASCII-only, so `λmatch` still matches.
fn word(id: &'static str, label: &'static str, doc: &'static str, keyword: &str) -> Rule {
    any(id, label, doc, &[format!(r"(?-u:\b){keyword}(?-u:\b)").as_str()])
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("bad catalog pattern {p:?}: {e}")))
        .collect()
}

/// The detection catalog, in evaluation order.
pub static CATALOG: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        any("mm_file", "@emp mm off; (file directive)", "07_mm_off.md", &[r"@emp\s+mm\s+off\s*;"]),
        any("mm_block", "@emp mm off { ... }", "07_mm_off.md", &[r"@emp\s+mm\s+off\s*\{"]),
        any("emp_off", "@emp off { ... }", "06_emp_off.md", &[r"@emp\s+off\s*\{"]),
        any("use", "use imports", "13_modules_packages.md", &[r"(?m)^\s*use(?-u:\b)"]),
        any("tag", "#tag statements/items", "03_syntax.md", &[format!(r"(?m)^\s*#\s*{IDENT}(?-u:\b)").as_str()]),
        word("extern", "extern functions", "09_functions.md", "extern"),
        word("unsafe", "unsafe", "06_emp_off.md", "unsafe"),
        word("defer", "defer", "08_control_flow.md", "defer"),
        word("match", "match", "11_enums_match.md", "match"),
        any("match_arms", "match arms (=>)", "08_control_flow.md", &["=>"]),
        word("enum", "enum", "11_enums_match.md", "enum"),
        word("struct", "struct", "10_structs_oop.md", "struct"),
        word("class", "class", "10_structs_oop.md", "class"),
        word("trait", "trait", "12_traits_ufcs.md", "trait"),
        word("impl", "impl", "12_traits_ufcs.md", "impl"),
        word("dyn", "dyn", "04_types.md", "dyn"),
        word("new", "new Class(...)", "10_structs_oop.md", "new"),
        any("fstring", "f-strings", "14_strings.md", &[r#"\$""#, r"\$`"]),
        any("ns", "namespace access (::)", "23_grammar_implemented.md", &["::"]),
        word("as_cast", "casts (as Type)", "23_grammar_implemented.md", "as"),
        any("c_cast", "C-style casts ((i32)expr)", "23_grammar_implemented.md", &[r"\([iu][0-9]+\)\s*\S"]),
        any("ranges", "range operators (.., ..=, ...)", "03_syntax.md", &[r"\.\.", r"\.\.=|\.\.\."]),
        any("ternary", "ternary operator (?:)", "03_syntax.md", &[r"\?\s*[^\n]*\s*:"]),
        any("brackets", "[] list literals / indexing", "15_arrays_lists.md", &[r"\[\s*\]", r"\[[^\]]+\]"]),
        any("list_type", "list types (T[])", "04_types.md", &[format!(r":\s*{IDENT}\s*\[\s*\]").as_str()]),
        any("array_type", "array types (T[n])", "04_types.md", &[format!(r":\s*{IDENT}\s*\[\s*[0-9]").as_str()]),
        any("tuple_destructure", "tuple destructuring let (a, b) = ...", "23_grammar_implemented.md", &[r"(?-u:\b)let\s*\("]),
        word("for", "for loops", "08_control_flow.md", "for"),
        any("for_two", "for idx, val in expr", "08_control_flow.md", &[format!(r"(?-u:\b)for\s+{IDENT}\s*,\s*{IDENT}\s+in(?-u:\b)").as_str()]),
        word("while", "while loops", "08_control_flow.md", "while"),
        word("if", "if/else", "08_control_flow.md", "if"),
        word("let", "let bindings", "03_syntax.md", "let"),
        any("borrow_mut", "&mut borrow", "04_types.md", &[r"(?-u:\b)&mut(?-u:\b)"]),
        any("borrow", "& borrow", "04_types.md", &[r"(?-u:\b)&(?-u:\b)"]),
        any("strings", "string literals", "14_strings.md", &[r"(?-u:\b)string(?-u:\b)", "\""]),
        all("block_comments", "block comments (nestable)", "03_syntax.md", &[r"/\*", r"\*/"]),
    ]
});

/// Detect syntax features in `src`, in catalog order, one descriptor per id.
pub fn detect_features(src: &str) -> Vec<FeatureDescriptor> {
    detect_with(&CATALOG, src)
}

fn detect_with(catalog: &[Rule], src: &str) -> Vec<FeatureDescriptor> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .filter(|rule| rule.test.fires(src))
        .filter(|rule| seen.insert(rule.id))
        .map(Rule::descriptor)
        .collect()
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
