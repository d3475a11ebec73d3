//! HTML escaping for untrusted text.

use std::borrow::Cow;

/// Escapes `& < > " '` so `text` can be embedded in element content or a
/// quoted attribute. Borrows when nothing needs escaping.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_become_text() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn quotes_and_ampersands() {
        assert_eq!(escape_html(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#39;c&#39;");
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_html("つくば市文化会館"), Cow::Borrowed(_)));
    }
}
