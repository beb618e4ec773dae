//! Line-oriented markdown parser.
//!
//! A single forward pass over the lines of a page. The parser is always in
//! exactly one [`Mode`]: normal text, inside a code fence, or inside one of the
//! two list kinds. Only a subset of markdown is recognised:
//!
//! - headings (`#`, `##`, `###`)
//! - fenced code blocks (```` ``` ````, optional language tag)
//! - unordered (`- item`) and ordered (`1. item`) lists, one line per item
//! - blockquotes (`> text`, single level)
//! - paragraphs (every other non-blank line)
//!
//! Anything else degrades to a paragraph. The parser never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Diagnostic, Severity};
use crate::types::{Block, Document, Span};

const FENCE: &str = "```";

/// `N. rest`. The number is matched but never used for output.
///
/// Whitespace is the browser set: Unicode spaces plus U+FEFF, minus U+0085.
/// The item text stops at any line terminator, a lone `\r` included.
static ORDERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[[\s\x{FEFF}]&&[^\x{85}]]+([^\r\n\x{2028}\x{2029}]*)$").unwrap()
});

/// Result of parsing a markdown page.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    /// The parsed document.
    pub doc: Document,
    /// Non-fatal diagnostics collected during parsing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parser state between lines.
enum Mode {
    Normal,
    Fence {
        lang: String,
        lines: Vec<String>,
        start_line: usize,
    },
    List {
        ordered: bool,
        items: Vec<String>,
        span: Span,
    },
}

/// Parse a markdown page into blocks.
///
/// This function never panics. An unterminated fence is flushed at end of
/// input and reported as a warning.
pub fn parse(input: &str) -> ParseResult {
    let mut diagnostics = Vec::new();

    // Normalise CRLF → LF.
    let normalised = input.replace("\r\n", "\n");

    let mut blocks: Vec<Block> = Vec::new();
    let mut mode = Mode::Normal;
    let mut line_count = 0;

    for (idx, line) in normalised.split('\n').enumerate() {
        let line_no = idx + 1;
        line_count = line_no;

        if let Some(rest) = line.strip_prefix(FENCE) {
            match std::mem::replace(&mut mode, Mode::Normal) {
                Mode::Fence {
                    lang,
                    lines,
                    start_line,
                } => {
                    blocks.push(Block::Code {
                        lang: Some(lang).filter(|l| !l.is_empty()),
                        content: lines.join("\n"),
                        closed: true,
                        span: Span {
                            start_line,
                            end_line: line_no,
                        },
                    });
                }
                previous => {
                    close_list(previous, &mut blocks);
                    mode = Mode::Fence {
                        lang: trim_blank(rest).to_string(),
                        lines: Vec::new(),
                        start_line: line_no,
                    };
                }
            }
            continue;
        }

        if let Mode::Fence { lines, .. } = &mut mode {
            lines.push(line.to_string());
            continue;
        }

        if let Some((level, text)) = heading(line) {
            close_list(std::mem::replace(&mut mode, Mode::Normal), &mut blocks);
            blocks.push(Block::Heading {
                level,
                text: text.to_string(),
                span: Span::line(line_no),
            });
            continue;
        }

        if let Some(text) = line.strip_prefix("> ") {
            close_list(std::mem::replace(&mut mode, Mode::Normal), &mut blocks);
            blocks.push(Block::Blockquote {
                text: text.to_string(),
                span: Span::line(line_no),
            });
            continue;
        }

        if let Some(text) = line.strip_prefix("- ") {
            push_item(&mut mode, &mut blocks, false, text, line_no);
            continue;
        }

        if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
            push_item(&mut mode, &mut blocks, true, &caps[1], line_no);
            continue;
        }

        close_list(std::mem::replace(&mut mode, Mode::Normal), &mut blocks);

        if trim_blank(line).is_empty() {
            continue;
        }

        blocks.push(Block::Paragraph {
            text: line.to_string(),
            span: Span::line(line_no),
        });
    }

    // End of input: flush whatever is still open.
    match mode {
        Mode::Fence {
            lang,
            lines,
            start_line,
        } => {
            diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                message: format!("Unterminated code fence opened at line {start_line}"),
                span: Some(Span {
                    start_line,
                    end_line: line_count,
                }),
                code: Some("W001".into()),
            });
            log::debug!("flushing unterminated fence from line {start_line}");
            blocks.push(Block::Code {
                lang: Some(lang).filter(|l| !l.is_empty()),
                content: lines.join("\n"),
                closed: false,
                span: Span {
                    start_line,
                    end_line: line_count,
                },
            });
        }
        other => close_list(other, &mut blocks),
    }

    ParseResult {
        doc: Document {
            blocks,
            source: normalised,
        },
        diagnostics,
    }
}

/// Whitespace as browsers trim it: no U+0085, but U+FEFF counts.
fn is_blank_char(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn trim_blank(s: &str) -> &str {
    s.trim_matches(is_blank_char)
}

/// Match `# `, `## ` or `### ` and return the level and the heading text.
fn heading(line: &str) -> Option<(u8, &str)> {
    if let Some(text) = line.strip_prefix("# ") {
        Some((1, text))
    } else if let Some(text) = line.strip_prefix("## ") {
        Some((2, text))
    } else {
        line.strip_prefix("### ").map(|text| (3, text))
    }
}

/// Append a list item, switching list kind if the other kind is open.
fn push_item(mode: &mut Mode, blocks: &mut Vec<Block>, ordered: bool, text: &str, line_no: usize) {
    if let Mode::List {
        ordered: open_ordered,
        items,
        span,
    } = mode
    {
        if *open_ordered == ordered {
            items.push(text.to_string());
            span.end_line = line_no;
            return;
        }
    }

    close_list(std::mem::replace(mode, Mode::Normal), blocks);
    *mode = Mode::List {
        ordered,
        items: vec![text.to_string()],
        span: Span::line(line_no),
    };
}

/// Emit a list block if `mode` was a list. Other modes are dropped.
fn close_list(mode: Mode, blocks: &mut Vec<Block>) {
    if let Mode::List {
        ordered,
        items,
        span,
    } = mode
    {
        blocks.push(Block::List {
            ordered,
            items,
            span,
        });
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
