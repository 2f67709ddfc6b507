use crate::utils::is_whitespace;

/// Saved cursor position, see [`Cursor::mark`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mark(usize);

/// Byte cursor over the text of a single game.
///
/// PGN move text is ASCII, so classification happens on bytes. Slices are only
/// ever taken at ASCII boundaries or after [`Cursor::advance_char`], which keeps
/// them valid `&str`s even when comments or tag values contain non-ASCII text.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Cursor<'a> {
        Cursor { source, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Current byte, or 0 at end of input
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte after the current one, or 0 past the end
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    /// Byte just before the current one, if any
    pub fn previous(&self) -> Option<u8> {
        self.pos.checked_sub(1).map(|idx| self.source.as_bytes()[idx])
    }

    fn byte_at(&self, idx: usize) -> u8 {
        self.source.as_bytes().get(idx).copied().unwrap_or(0)
    }

    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    /// Advance past the whole character at the cursor, however many bytes it takes
    pub fn advance_char(&mut self) {
        if let Some(ch) = self.source[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    /// Consume the current byte if it equals `expected`
    pub fn eat(&mut self, expected: u8) -> bool {
        if !self.is_eof() && self.current() == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Advance while `predicate` holds for the current byte
    pub fn eat_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while !self.is_eof() && predicate(self.current()) {
            self.pos += 1;
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(is_whitespace);
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset_to(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Source text from `mark` up to the cursor
    pub fn slice_from(&self, mark: Mark) -> &'a str {
        &self.source[mark.0..self.pos]
    }

    pub fn len_since(&self, mark: Mark) -> usize {
        self.pos - mark.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let mut cursor = Cursor::new("Nf3");
        assert_eq!(cursor.current(), b'N');
        assert_eq!(cursor.peek(), b'f');
        assert_eq!(cursor.peek2(), b'3');
        assert_eq!(cursor.previous(), None);

        cursor.advance();
        assert_eq!(cursor.current(), b'f');
        assert_eq!(cursor.previous(), Some(b'N'));

        cursor.advance_n(10);
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), 0);
        assert_eq!(cursor.peek(), 0);

        cursor.advance();
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn test_mark_and_reset() {
        let mut cursor = Cursor::new("O-Ox");
        let mark = cursor.mark();
        assert!(cursor.eat(b'O'));
        assert!(cursor.eat(b'-'));
        assert!(!cursor.eat(b'-'));
        assert_eq!(cursor.slice_from(mark), "O-");
        assert_eq!(cursor.len_since(mark), 2);

        cursor.reset_to(mark);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.current(), b'O');
    }

    #[test]
    fn test_eat_while_and_whitespace() {
        let mut cursor = Cursor::new(" \t\r\n 123. e4");
        cursor.skip_whitespace();
        let start = cursor.mark();
        cursor.eat_while(|ch| ch.is_ascii_digit());
        assert_eq!(cursor.slice_from(start), "123");
        assert_eq!(cursor.current(), b'.');
    }

    #[test]
    fn test_advance_char_over_multibyte() {
        let mut cursor = Cursor::new("é!");
        let start = cursor.mark();
        cursor.advance_char();
        assert_eq!(cursor.slice_from(start), "é");
        assert_eq!(cursor.current(), b'!');
    }
}
