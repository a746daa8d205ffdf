/// Escape the five XML-reserved characters so `text` can sit inside an
/// element body. `&` must go first or it would re-escape the other four.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ampersand() {
        assert_eq!(escape("A & B"), "A &amp; B");
    }

    #[test]
    fn test_all_reserved_characters() {
        assert_eq!(
            escape("<Title> \"quoted\" & 'apos'"),
            "&lt;Title&gt; &quot;quoted&quot; &amp; &apos;apos&apos;"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        for text in ["", "Science Teacher", "http://example.com/jobs?id=7", "Ünïcödé – 職"] {
            assert_eq!(escape(text), text);
        }
    }

    #[test]
    fn test_existing_entities_are_escaped_again() {
        assert_eq!(escape("&amp;"), "&amp;amp;");
        assert_eq!(escape(&escape("&")), "&amp;amp;");
    }

    #[test]
    fn test_query_string_link() {
        assert_eq!(
            escape("http://example.com/job?a=1&b=2"),
            "http://example.com/job?a=1&amp;b=2"
        );
    }
}
