//! ANSI terminal renderer.
//!
//! Console output for parsed pages and predictions, using the `colored`
//! crate. Inline markdown is shown as written.

use colored::Colorize;

use crate::types::{Block, Document, Prediction};

/// Render a `Document` as ANSI-colored terminal text.
pub fn to_terminal(doc: &Document) -> String {
    doc.blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text, .. } => match level {
            1 => format!("{}", text.bold().underline()),
            2 => format!("{}", text.bold()),
            _ => format!("{}", text.bold().dimmed()),
        },

        Block::Code {
            lang, content, ..
        } => {
            let lang_label = match lang {
                Some(l) => format!(" {}", l.dimmed()),
                None => String::new(),
            };
            let border = format!("{}", "\u{2500}\u{2500}\u{2500}".dimmed()); // ───
            let mut lines = vec![format!("{border}{lang_label}")];
            for line in content.lines() {
                lines.push(format!("  {line}"));
            }
            lines.push(border.clone());
            lines.join("\n")
        }

        Block::List { ordered, items, .. } => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if *ordered {
                    format!("{}.", i + 1)
                } else {
                    "\u{2022}".to_string() // •
                };
                format!("  {} {item}", marker.cyan())
            })
            .collect::<Vec<_>>()
            .join("\n"),

        Block::Blockquote { text, .. } => {
            format!("{} {}", "\u{2502}".dimmed(), text.italic()) // │
        }

        Block::Paragraph { text, .. } => text.clone(),
    }
}

/// Render a prediction as a console report.
pub fn prediction_to_terminal(pred: &Prediction) -> String {
    let mut lines = Vec::new();

    let file = pred.file_path.as_deref().unwrap_or("(pasted)");
    let fail = if pred.is_fail {
        format!(" {}", "[expected fail]".red().bold())
    } else {
        String::new()
    };
    lines.push(format!("{} {file}{fail}", "File".bold()));

    let stats = &pred.statistics;
    for (key, value) in [
        ("Lines", stats.line_count),
        ("fn", stats.function_count),
        ("use", stats.import_count),
        ("match", stats.match_count),
        ("defer", stats.defer_count),
    ] {
        lines.push(format!("  {:<6} {value}", key.dimmed()));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Keywords seen".bold()));
    if pred.keywords.is_empty() {
        lines.push(format!("  {}", "(none)".dimmed()));
    } else {
        lines.push(format!("  {}", pred.keywords.join(" ")));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Syntax features found".bold()));
    if pred.features.is_empty() {
        lines.push(format!("  {}", "(no specific features detected)".dimmed()));
    }
    for f in &pred.features {
        lines.push(format!("  {} {}", f.label.green(), format!("({})", f.doc).dimmed()));
    }

    lines.push(String::new());
    lines.push(format!("{}", "What the compiler is doing (predictor)".bold()));
    for (i, pass) in pred.passes.iter().enumerate() {
        lines.push(format!("  {}. {pass}", i + 1));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Notes".bold()));
    if pred.hints.is_empty() {
        lines.push(format!("  {}", "No extra hints.".dimmed()));
    }
    for hint in &pred.hints {
        lines.push(format!("  {} {hint}", "\u{2022}".yellow()));
    }

    lines.join("\n")
}
