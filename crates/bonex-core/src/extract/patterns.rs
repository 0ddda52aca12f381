//! Compiled regex patterns for payload recovery.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Greedy outermost brace span: first `{` through last `}`. Engines
    // wrap the payload in prose or markdown fences; the span boundaries
    // ignore all of it.
    pub static ref PAYLOAD_SPAN: Regex = Regex::new(
        r"(?s)\{.*\}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_span_is_greedy() {
        let text = "prose {\"a\": {\"b\": 1}} trailing } none";
        let span = PAYLOAD_SPAN.find(text).expect("span found");
        assert_eq!(span.as_str(), "{\"a\": {\"b\": 1}} trailing }");
    }

    #[test]
    fn test_payload_span_crosses_newlines() {
        let text = "{\n  \"a\": 1\n}";
        let span = PAYLOAD_SPAN.find(text).expect("span found");
        assert_eq!(span.as_str(), text);
    }

    #[test]
    fn test_payload_span_requires_open_before_close() {
        assert!(PAYLOAD_SPAN.find("} no opening {").is_none());
    }
}
