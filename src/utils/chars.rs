/// The four strings that may terminate a game record.
pub const RESULT_MARKERS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

pub const fn is_file(ch: u8) -> bool {
    ch >= b'a' && ch <= b'h'
}

pub const fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Space, tab, line feed, carriage return, vertical tab and form feed
pub const fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Characters allowed in a tag name (e.g. "Event", "WhiteElo", "Time_Control")
pub const fn is_tag_key_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

pub const fn is_annotation_char(ch: u8) -> bool {
    ch == b'!' || ch == b'?'
}

/// Whether `s` is exactly one of the result markers
pub fn is_result(s: &str) -> bool {
    RESULT_MARKERS.contains(&s)
}

/// Whether any result marker occurs anywhere inside `text`
pub fn contains_result(text: &str) -> bool {
    RESULT_MARKERS.iter().any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files() {
        assert!(is_file(b'a'));
        assert!(is_file(b'h'));
        assert!(!is_file(b'i'));
        assert!(!is_file(b'x'));
    }

    #[test]
    fn test_results() {
        for marker in RESULT_MARKERS {
            assert!(is_result(marker));
        }
        assert!(!is_result("1-1"));
        assert!(!is_result("0-0"));
        assert!(!is_result("1/2"));

        assert!(contains_result("43. Re6 1/2-1/2"));
        assert!(contains_result("12. Qxf7# 1-0"));
        assert!(!contains_result("1. e4 e5 2. Nf3"));
    }

    #[test]
    fn test_whitespace() {
        assert!(is_whitespace(b' '));
        assert!(is_whitespace(b'\t'));
        assert!(is_whitespace(b'\r'));
        assert!(is_whitespace(b'\n'));
        assert!(!is_whitespace(b'.'));
        assert!(!is_whitespace(0));
    }
}
