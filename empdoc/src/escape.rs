//! HTML entity escaping.
//!
//! Escaping is deliberately not idempotent: running it twice re-encodes the
//! ampersand of every entity produced by the first pass. The inline renderer
//! relies on that when it escapes link labels and URLs a second time.

/// Escape the five HTML-reserved characters.
///
/// `&` is replaced first so the entities produced for the other characters
/// are not themselves re-escaped within the same pass.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_all_reserved_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("fn main() {}"), "fn main() {}");
    }

    #[test]
    fn escaping_twice_double_encodes_ampersand() {
        let once = escape_html("&");
        assert_eq!(once, "&amp;");
        assert_eq!(escape_html(&once), "&amp;amp;");
    }

    #[test]
    fn entities_from_one_pass_are_not_reescaped_in_that_pass() {
        assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
    }
}
