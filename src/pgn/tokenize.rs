use tracing::trace;
use crate::pgn::cursor::Cursor;
use crate::pgn::token::{PgnToken, PgnTokenKind};
use crate::utils::{is_annotation_char, is_digit, is_file, is_result, is_tag_key_char, is_whitespace};

/// What the lexer is currently inside of
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LexMode {
    MoveText,
    Tag,       // between '[' and ']'
    Comment,   // between '{' and '}'
}

/// Pull-based lexer over the text of a single PGN game
#[derive(Clone, Debug)]
pub struct PgnLexer<'a> {
    cursor: Cursor<'a>,
    mode: LexMode,
}

impl<'a> PgnLexer<'a> {
    pub fn new(input: &'a str) -> PgnLexer<'a> {
        PgnLexer {
            cursor: Cursor::new(input),
            mode: LexMode::MoveText,
        }
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    /// Returns the next token, or the EOF token once the input is exhausted
    pub fn next_token(&mut self) -> PgnToken<'a> {
        self.cursor.skip_whitespace();

        if self.cursor.is_eof() {
            return PgnToken::eof();
        }

        match self.mode {
            LexMode::Comment => self.lex_comment(),
            LexMode::Tag => self.lex_tag(),
            LexMode::MoveText => self.lex_move_text(),
        }
    }

    /// Consumes `len` bytes and returns them as a token of the given kind
    fn single(&mut self, kind: PgnTokenKind, len: usize) -> PgnToken<'a> {
        let start = self.cursor.mark();
        self.cursor.advance_n(len);
        PgnToken::new(kind, self.cursor.slice_from(start))
    }

    fn lex_comment(&mut self) -> PgnToken<'a> {
        if self.cursor.current() == b'}' {
            self.mode = LexMode::MoveText;
            return self.single(PgnTokenKind::CommentEnd, 1);
        }

        let start = self.cursor.mark();
        self.cursor.eat_while(|ch| ch != b'}');
        PgnToken::new(PgnTokenKind::Comment, self.cursor.slice_from(start).trim())
    }

    fn lex_tag(&mut self) -> PgnToken<'a> {
        match self.cursor.current() {
            b']' => {
                self.mode = LexMode::MoveText;
                self.single(PgnTokenKind::TagEnd, 1)
            }
            b'"' => self.lex_tag_value(),
            ch if is_tag_key_char(ch) => {
                let start = self.cursor.mark();
                self.cursor.eat_while(is_tag_key_char);
                PgnToken::new(PgnTokenKind::TagKey, self.cursor.slice_from(start))
            }
            _ => self.lex_move_text(),
        }
    }

    fn lex_tag_value(&mut self) -> PgnToken<'a> {
        self.cursor.advance(); // Consume opening quote
        let start = self.cursor.mark();

        while !self.cursor.is_eof() && self.cursor.current() != b'"' {
            if self.cursor.current() == b'\\' {
                self.cursor.advance();
            }
            self.cursor.advance();
        }

        let value = self.cursor.slice_from(start);
        self.cursor.eat(b'"'); // Consume closing quote, if there is one
        PgnToken::new(PgnTokenKind::TagValue, value)
    }

    fn lex_move_text(&mut self) -> PgnToken<'a> {
        match self.cursor.current() {
            b'[' => {
                self.mode = LexMode::Tag;
                self.single(PgnTokenKind::TagStart, 1)
            }
            b']' => self.single(PgnTokenKind::TagEnd, 1),
            b'{' => {
                self.mode = LexMode::Comment;
                self.single(PgnTokenKind::CommentStart, 1)
            }
            b'}' => self.single(PgnTokenKind::CommentEnd, 1),
            b'"' => self.lex_tag_value(),
            b'.' => {
                if self.cursor.peek() == b'.' && self.cursor.peek2() == b'.' {
                    self.single(PgnTokenKind::Ellipsis, 3)
                } else {
                    self.single(PgnTokenKind::Dot, 1)
                }
            }
            b'x' => self.single(PgnTokenKind::Capture, 1),
            b'=' => self.single(PgnTokenKind::Promotion, 1),
            b'+' => self.single(PgnTokenKind::Check, 1),
            b'#' => self.single(PgnTokenKind::Checkmate, 1),
            b'*' => self.single(PgnTokenKind::Result, 1),
            b'(' => self.single(PgnTokenKind::VariationStart, 1),
            b')' => self.single(PgnTokenKind::VariationEnd, 1),
            b'-' => self.lex_result(),
            b'$' => self.lex_numeric_annotation(),
            ch if is_annotation_char(ch) => {
                let start = self.cursor.mark();
                self.cursor.eat_while(is_annotation_char);
                PgnToken::new(PgnTokenKind::Annotation, self.cursor.slice_from(start))
            }
            b'O' => self.lex_castling().unwrap_or_else(|| self.lex_piece()),
            ch if ch.is_ascii_uppercase() => self.lex_piece(),
            ch if ch.is_ascii_lowercase() => self.lex_square_or_file(),
            ch if is_digit(ch) => self.lex_number(),
            _ => {
                let pos = self.cursor.pos();
                let start = self.cursor.mark();
                self.cursor.advance_char();
                let unknown = self.cursor.slice_from(start);
                trace!(text = unknown, pos, "unclassified character");
                PgnToken::new(PgnTokenKind::Unknown, unknown)
            }
        }
    }

    /// `O-O` or `O-O-O`. Leaves the cursor untouched when the pattern does not match
    fn lex_castling(&mut self) -> Option<PgnToken<'a>> {
        let start = self.cursor.mark();

        if !(self.cursor.eat(b'O') && self.cursor.eat(b'-') && self.cursor.eat(b'O')) {
            self.cursor.reset_to(start);
            return None;
        }

        if self.cursor.current() == b'-' && self.cursor.peek() == b'O' {
            self.cursor.advance_n(2);
            return Some(PgnToken::new(PgnTokenKind::QueensideCastle, self.cursor.slice_from(start)));
        }

        Some(PgnToken::new(PgnTokenKind::KingsideCastle, self.cursor.slice_from(start)))
    }

    fn lex_piece(&mut self) -> PgnToken<'a> {
        let kind = if self.cursor.previous() == Some(b'=') {
            PgnTokenKind::PromotionPiece
        } else {
            PgnTokenKind::Piece
        };
        self.single(kind, 1)
    }

    fn lex_square_or_file(&mut self) -> PgnToken<'a> {
        let start = self.cursor.mark();
        let first = self.cursor.current();
        self.cursor.advance();

        // Pawn capture, e.g. the 'e' of "exd5"
        if is_file(first) && self.cursor.current() == b'x' {
            return PgnToken::new(PgnTokenKind::File, self.cursor.slice_from(start));
        }

        let after_first = self.cursor.mark();
        self.cursor.eat_while(|ch| is_file(ch) || is_digit(ch));

        // Three characters means the first one disambiguates, as the 'b' of "Nbd7"
        if self.cursor.len_since(start) == 3 {
            self.cursor.reset_to(after_first);
            return PgnToken::new(PgnTokenKind::File, self.cursor.slice_from(start));
        }

        PgnToken::new(PgnTokenKind::Square, self.cursor.slice_from(start))
    }

    fn lex_number(&mut self) -> PgnToken<'a> {
        // A digit right after a piece letter disambiguates by rank, as the '4' of "N4xd5"
        if self.cursor.previous().is_some_and(|ch| ch.is_ascii_uppercase()) {
            return self.single(PgnTokenKind::Rank, 1);
        }

        let start = self.cursor.mark();
        self.cursor.eat_while(is_digit);

        match self.cursor.current() {
            b'-' | b'/' => {
                self.cursor.reset_to(start);
                self.lex_result()
            }
            _ => PgnToken::new(PgnTokenKind::MoveNumber, self.cursor.slice_from(start)),
        }
    }

    /// Reads up to the next whitespace. Anything that is not a result marker is a move number
    fn lex_result(&mut self) -> PgnToken<'a> {
        let start = self.cursor.mark();
        self.cursor.eat_while(|ch| !is_whitespace(ch));
        let text = self.cursor.slice_from(start);

        if is_result(text) {
            PgnToken::new(PgnTokenKind::Result, text)
        } else {
            PgnToken::new(PgnTokenKind::MoveNumber, text)
        }
    }

    /// Numeric annotation glyph, e.g. "$14"
    fn lex_numeric_annotation(&mut self) -> PgnToken<'a> {
        let start = self.cursor.mark();
        self.cursor.advance(); // Consume '$'
        self.cursor.eat_while(is_digit);
        PgnToken::new(PgnTokenKind::Annotation, self.cursor.slice_from(start))
    }
}

impl<'a> Iterator for PgnLexer<'a> {
    type Item = PgnToken<'a>;

    /// Yields tokens up to, but not including, the EOF token
    fn next(&mut self) -> Option<PgnToken<'a>> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

/// Tokenizes the text of a single PGN game. The EOF token is not included
pub fn tokenize_pgn(pgn: &str) -> Vec<PgnToken<'_>> {
    PgnLexer::new(pgn).collect()
}
