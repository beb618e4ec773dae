//! `empdoc`: the engines behind the EMP docs viewer.
//!
//! Two deterministic text transformations:
//!
//! - a line-oriented markdown renderer for a small subset (headings, fences,
//!   inline code, links, two list kinds, blockquotes, paragraphs), and
//! - a heuristic predictor that scans `.em` source text and explains which
//!   syntax features and compiler passes it likely exercises.
//!
//! Both are pure, total functions of their input. The crate also carries the
//! plain data types the viewer is wired with: the page manifest, navigation
//! state, and the index of `.em` files.
//!
//! # Quick start
//!
//! ```
//! let html = empdoc::render_markdown("# Hello\n\n- one\n- two\n");
//! assert_eq!(html, "<h1>Hello</h1><ul><li>one</li><li>two</li></ul>");
//!
//! let pred = empdoc::predict("use std;\nfn main() {}\n", Some("tests/x_fail.em"));
//! assert!(pred.is_fail);
//! assert_eq!(pred.statistics.function_count, 1);
//! ```

pub mod error;
pub mod escape;
pub mod features;
pub mod index;
pub mod inline;
pub mod keywords;
pub mod markdown;
pub mod nav;
pub mod predict;
pub mod render_html;
#[cfg(feature = "terminal")]
pub mod render_term;
pub mod stats;
pub mod types;

pub use error::*;
pub use escape::escape_html;
pub use features::detect_features;
pub use index::{FileIndex, IndexEntry};
pub use inline::render_inline;
pub use keywords::scan_keywords;
pub use markdown::{ParseResult, parse};
pub use nav::{Manifest, NavState, PageEntry};
pub use predict::predict;
pub use render_html::{PageConfig, page_html, prediction_to_html};
#[cfg(feature = "terminal")]
pub use render_term::prediction_to_terminal;
pub use stats::extract_stats;
pub use types::*;

/// Render a markdown page straight to an HTML fragment.
pub fn render_markdown(input: &str) -> String {
    parse(input).doc.to_html()
}

impl Document {
    /// Render this document as an HTML fragment.
    pub fn to_html(&self) -> String {
        render_html::to_html(self)
    }

    /// Render this document as ANSI-colored terminal text.
    #[cfg(feature = "terminal")]
    pub fn to_terminal(&self) -> String {
        render_term::to_terminal(self)
    }
}
