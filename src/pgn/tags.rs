use indexmap::IndexMap;
use crate::pgn::token::{PgnToken, PgnTokenKind};

/// Collects the `[Key "Value"]` pairs of a token stream, in the order they appear.
///
/// Escaped quotes and backslashes in values are resolved. A repeated key keeps its
/// first position and its last value. Pairs missing a key or a value are skipped.
pub fn collect_tags(tokens: &[PgnToken]) -> IndexMap<String, String> {
    let mut tags = IndexMap::new();
    let mut key = None;
    let mut value = None;

    for token in tokens {
        match token.kind {
            PgnTokenKind::TagStart => {
                key = None;
                value = None;
            }
            PgnTokenKind::TagKey if key.is_none() => key = Some(token.text),
            PgnTokenKind::TagValue => value = Some(token.text),
            PgnTokenKind::TagEnd => {
                if let (Some(key), Some(value)) = (key.take(), value.take()) {
                    tags.insert(key.to_string(), unescape_tag_value(value));
                }
            }
            _ => {}
        }
    }

    tags
}

fn unescape_tag_value(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                value.push(escaped);
            }
        } else {
            value.push(ch);
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use crate::pgn::tokenize_pgn;
    use super::*;

    #[test]
    fn test_collect_tags() {
        let pgn = r#"[Event "F/S Return Match"]
[Site "Belgrade, Serbia JUG"]
[White "Fischer, Robert J."]
[Annotator "The \"Old\" Master"]

1. e4 e5 1/2-1/2"#;

        let tags = collect_tags(&tokenize_pgn(pgn));
        let keys: Vec<&str> = tags.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Event", "Site", "White", "Annotator"]);
        assert_eq!(tags["Site"], "Belgrade, Serbia JUG");
        assert_eq!(tags["Annotator"], r#"The "Old" Master"#);
    }

    #[test]
    fn test_duplicate_and_broken_tags() {
        let pgn = r#"[Event "First"] [Round] [Event "Second"] [Site "Nowhere"#;
        let tags = collect_tags(&tokenize_pgn(pgn));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["Event"], "Second");
    }

    #[test]
    fn test_no_tags() {
        assert!(collect_tags(&tokenize_pgn("1. e4 *")).is_empty());
    }
}
