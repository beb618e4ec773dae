//! Inline span renderer.
//!
//! Rewrites `[label](url)` links and `` `code` `` spans inside a line that has
//! already been HTML-escaped. Links are substituted before code spans so a
//! backtick inside a link label cannot break bracket matching.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;

/// `[label](url)` with a non-empty label and url.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// `` `code` `` with non-empty content.
static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Render links and inline code spans in an already-escaped line.
///
/// Label, url and code text are escaped again on substitution. Neither
/// substitution is applied recursively.
pub fn render_inline(escaped: &str) -> String {
    let linked = LINK_RE.replace_all(escaped, |caps: &Captures| {
        let label = escape_html(&caps[1]);
        let url = escape_html(&caps[2]);
        render_link(&label, &url)
    });

    CODE_SPAN_RE
        .replace_all(&linked, |caps: &Captures| {
            format!("<code>{}</code>", escape_html(&caps[1]))
        })
        .into_owned()
}

/// Hash links stay inside the viewer; everything else opens in a new tab.
fn render_link(label: &str, url: &str) -> String {
    if url.starts_with('#') {
        format!("<a href=\"{url}\">{label}</a>")
    } else {
        format!("<a href=\"{url}\" target=\"_blank\" rel=\"noreferrer\">{label}</a>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn external_link_opens_new_tab() {
        assert_eq!(
            render_inline("[x](http://example.com)"),
            r#"<a href="http://example.com" target="_blank" rel="noreferrer">x</a>"#
        );
    }

    #[test]
    fn hash_link_stays_in_document() {
        assert_eq!(render_inline("[x](#local)"), r##"<a href="#local">x</a>"##);
    }

    #[test]
    fn inline_code_is_wrapped() {
        assert_eq!(
            render_inline("call `main()` first"),
            "call <code>main()</code> first"
        );
    }

    #[test]
    fn link_values_are_escaped_again() {
        // The caller already escaped `&` once.
        let escaped = escape_html("[a & b](http://x.io/?p=1&q=2)");
        assert_eq!(
            render_inline(&escaped),
            r#"<a href="http://x.io/?p=1&amp;amp;q=2" target="_blank" rel="noreferrer">a &amp;amp; b</a>"#
        );
    }

    #[test]
    fn code_span_content_is_escaped_again() {
        let escaped = escape_html("`a < b`");
        assert_eq!(render_inline(&escaped), "<code>a &amp;lt; b</code>");
    }

    #[test]
    fn empty_brackets_and_backticks_are_left_alone() {
        assert_eq!(render_inline("[](x) and ``"), "[](x) and ``");
    }

    #[test]
    fn multiple_links_on_one_line() {
        assert_eq!(
            render_inline("[a](#one) or [b](#two)"),
            r##"<a href="#one">a</a> or <a href="#two">b</a>"##
        );
    }

    #[test]
    fn backtick_in_link_label_is_rendered_after_link() {
        assert_eq!(
            render_inline("[`fn`](#09_functions.md)"),
            r##"<a href="#09_functions.md"><code>fn</code></a>"##
        );
    }
}
