//! HTML renderers.
//!
//! Produces the page markup for parsed documents, the runner panel for a
//! [`Prediction`], and the standalone page shell used by the static site
//! build. Every interpolated value goes through [`escape_html`].

use crate::escape::escape_html;
use crate::inline::render_inline;
use crate::types::{Block, Document, Prediction};

/// Render a `Document` as an HTML fragment.
///
/// Blocks are concatenated with no separators, so the output for a given
/// page is byte-for-byte stable.
pub fn to_html(doc: &Document) -> String {
    doc.blocks.iter().map(render_block).collect()
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text, .. } => {
            format!("<h{level}>{}</h{level}>", render_text(text))
        }

        Block::Code {
            lang,
            content,
            closed,
            ..
        } => {
            let lang_attr = match lang {
                Some(l) if *closed => format!(" data-lang=\"{}\"", escape_html(l)),
                _ => String::new(),
            };
            format!("<pre{lang_attr}><code>{}</code></pre>", escape_html(content))
        }

        Block::List { ordered, items, .. } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", render_text(item)))
                .collect();
            format!("<{tag}>{items}</{tag}>")
        }

        Block::Blockquote { text, .. } => {
            format!("<blockquote>{}</blockquote>", render_text(text))
        }

        Block::Paragraph { text, .. } => format!("<p>{}</p>", render_text(text)),
    }
}

/// Escape, then render inline spans.
fn render_text(text: &str) -> String {
    render_inline(&escape_html(text))
}

// ------------------------------------------------------------------
// Prediction report
// ------------------------------------------------------------------

/// Render a prediction as the runner's explanation panel.
pub fn prediction_to_html(pred: &Prediction) -> String {
    let features_html = if pred.features.is_empty() {
        r#"<span class="pill">(no specific features detected)</span>"#.to_string()
    } else {
        pred.features
            .iter()
            .map(|f| {
                format!(
                    r##"<span class="pill" title="{}"><a href="#{}">{}</a></span>"##,
                    escape_html(&f.id),
                    escape_html(&f.doc),
                    escape_html(&f.label)
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let keywords_html = if pred.keywords.is_empty() {
        r#"<span class="pill">(none)</span>"#.to_string()
    } else {
        pred.keywords
            .iter()
            .map(|k| format!(r#"<span class="pill">{}</span>"#, escape_html(k)))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let hints_html = if pred.hints.is_empty() {
        "<p>No extra hints.</p>".to_string()
    } else {
        let items: String = pred
            .hints
            .iter()
            .map(|h| format!("<li>{}</li>", escape_html(h)))
            .collect();
        format!("<ul>{items}</ul>")
    };

    let passes_html: String = pred
        .passes
        .iter()
        .map(|p| format!("<li>{}</li>", escape_html(p)))
        .collect();

    let file = escape_html(pred.file_path.as_deref().unwrap_or("(pasted)"));
    let fail_pill = if pred.is_fail {
        r#" <span class="pill">expected fail</span>"#
    } else {
        ""
    };
    let raw = match &pred.file_path {
        Some(path) => format!(
            r#"<a href="/{}" target="_blank" rel="noreferrer">open file</a>"#,
            escape_html(path)
        ),
        None => "(n/a)".to_string(),
    };

    let stats = &pred.statistics;
    let mut html = String::new();
    html.push_str(r#"<div class="runner-output"><div class="runner-kv">"#);
    html.push_str(&format!("<div>File</div><div>{file}{fail_pill}</div>"));
    html.push_str(&format!("<div>Raw</div><div>{raw}</div>"));
    for (key, value) in [
        ("Lines", stats.line_count),
        ("fn", stats.function_count),
        ("use", stats.import_count),
        ("match", stats.match_count),
        ("defer", stats.defer_count),
    ] {
        html.push_str(&format!("<div>{key}</div><div>{value}</div>"));
    }
    html.push_str("</div>");
    html.push_str(&format!("<h3>Keywords seen</h3><div>{keywords_html}</div>"));
    html.push_str(&format!("<h3>Syntax features found</h3><div>{features_html}</div>"));
    html.push_str(&format!(
        "<h3>What the compiler is doing (predictor)</h3><ol>{passes_html}</ol>"
    ));
    html.push_str(&format!("<h3>Notes</h3>{hints_html}"));
    html.push_str("</div>");
    html
}

// ------------------------------------------------------------------
// Page shell
// ------------------------------------------------------------------

/// Configuration for full-page HTML rendering.
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    /// Page title. Falls back to "EMP docs".
    pub title: Option<String>,
    /// Optional language code (default: "en").
    pub lang: Option<String>,
    /// Optional meta description.
    pub description: Option<String>,
}

/// Wrap a pre-rendered navigation list and body into a standalone page.
///
/// `nav` and `body` are inserted verbatim; they are expected to be markup
/// produced by this crate.
pub fn page_html(config: &PageConfig, nav: &str, body: &str) -> String {
    let title = escape_html(config.title.as_deref().unwrap_or("EMP docs"));
    let lang = escape_html(config.lang.as_deref().unwrap_or("en"));
    let description = config
        .description
        .as_deref()
        .map(|d| format!("\n<meta name=\"description\" content=\"{}\">", escape_html(d)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>{description}\n<style>{PAGE_CSS}</style>\n</head>\n<body>\n\
<nav id=\"nav\">{nav}</nav>\n<main id=\"doc\">{body}</main>\n</body>\n</html>\n"
    )
}

const PAGE_CSS: &str = "body{display:flex;margin:0;font-family:system-ui,sans-serif}\
#nav{display:flex;flex-direction:column;min-width:14rem;padding:1rem;border-right:1px solid #ddd}\
#nav a{padding:.2rem 0;color:#333;text-decoration:none}\
#nav a.active{font-weight:bold}\
#doc{flex:1;padding:1rem 2rem;max-width:60rem}\
#doc>section{border-bottom:1px solid #eee;padding-bottom:1rem}\
pre{background:#f6f6f6;padding:.75rem;overflow:auto}\
.pill{display:inline-block;padding:.1rem .5rem;border:1px solid #ccc;border-radius:1rem}";

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
