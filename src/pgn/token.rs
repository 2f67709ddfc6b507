use std::fmt::{Display, Formatter};
use serde::{Serialize, Serializer};
use subenum::subenum;

/// Every kind of token the lexer can produce
#[subenum(TagTokenKind, MoveTokenKind)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PgnTokenKind {
    Eof,
    #[subenum(TagTokenKind)]
    TagStart,           // [
    #[subenum(TagTokenKind)]
    TagEnd,             // ]
    #[subenum(TagTokenKind)]
    TagKey,             // Event, Site, WhiteElo
    #[subenum(TagTokenKind)]
    TagValue,           // the text between the quotes
    MoveNumber,         // 1, 2, 3
    Dot,                // .
    Ellipsis,           // ...
    #[subenum(MoveTokenKind)]
    Piece,              // N, B, R, Q, K
    #[subenum(MoveTokenKind)]
    Square,             // e4, d5
    CommentStart,       // {
    CommentEnd,         // }
    Comment,            // trimmed comment text
    Result,             // 1-0, 0-1, 1/2-1/2, *
    #[subenum(MoveTokenKind)]
    Capture,            // x
    #[subenum(MoveTokenKind)]
    File,               // a-h used as a disambiguator
    #[subenum(MoveTokenKind)]
    Rank,               // 1-8 used as a disambiguator
    #[subenum(MoveTokenKind)]
    KingsideCastle,     // O-O
    #[subenum(MoveTokenKind)]
    QueensideCastle,    // O-O-O
    #[subenum(MoveTokenKind)]
    Promotion,          // =
    #[subenum(MoveTokenKind)]
    PromotionPiece,     // Q, R, B, N after =
    #[subenum(MoveTokenKind)]
    Check,              // +
    #[subenum(MoveTokenKind)]
    Checkmate,          // #
    VariationStart,     // (
    VariationEnd,       // )
    Annotation,         // !, ?!, $14
    Unknown,            // anything the lexer cannot classify
}

impl PgnTokenKind {
    pub const fn name(&self) -> &'static str {
        match self {
            PgnTokenKind::Eof => "EOF",
            PgnTokenKind::TagStart => "TAG_START",
            PgnTokenKind::TagEnd => "TAG_END",
            PgnTokenKind::TagKey => "TAG_KEY",
            PgnTokenKind::TagValue => "TAG_VALUE",
            PgnTokenKind::MoveNumber => "MOVE_NUMBER",
            PgnTokenKind::Dot => "DOT",
            PgnTokenKind::Ellipsis => "ELLIPSIS",
            PgnTokenKind::Piece => "PIECE",
            PgnTokenKind::Square => "SQUARE",
            PgnTokenKind::CommentStart => "COMMENT_START",
            PgnTokenKind::CommentEnd => "COMMENT_END",
            PgnTokenKind::Comment => "COMMENT",
            PgnTokenKind::Result => "RESULT",
            PgnTokenKind::Capture => "CAPTURE",
            PgnTokenKind::File => "FILE",
            PgnTokenKind::Rank => "RANK",
            PgnTokenKind::KingsideCastle => "KINGSIDE_CASTLE",
            PgnTokenKind::QueensideCastle => "QUEENSIDE_CASTLE",
            PgnTokenKind::Promotion => "PROMOTION",
            PgnTokenKind::PromotionPiece => "PROMOTION_PIECE",
            PgnTokenKind::Check => "CHECK",
            PgnTokenKind::Checkmate => "CHECKMATE",
            PgnTokenKind::VariationStart => "VARIATION_START",
            PgnTokenKind::VariationEnd => "VARIATION_END",
            PgnTokenKind::Annotation => "ANNOTATION",
            PgnTokenKind::Unknown => "UNKNOWN",
        }
    }

    /// Kinds that only appear inside a `[Key "Value"]` tag pair
    pub fn is_tag_kind(&self) -> bool {
        TagTokenKind::try_from(*self).is_ok()
    }

    /// Kinds that make up the characters of a single SAN move
    pub fn is_move_kind(&self) -> bool {
        MoveTokenKind::try_from(*self).is_ok()
    }
}

impl Display for PgnTokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for PgnTokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A token of a PGN game: its kind and the slice of the game text it was read from
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct PgnToken<'a> {
    pub kind: PgnTokenKind,
    pub text: &'a str,
}

impl<'a> PgnToken<'a> {
    pub const fn new(kind: PgnTokenKind, text: &'a str) -> PgnToken<'a> {
        PgnToken { kind, text }
    }

    pub const fn eof() -> PgnToken<'static> {
        PgnToken { kind: PgnTokenKind::Eof, text: "" }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == PgnTokenKind::Eof
    }
}

impl Display for PgnToken<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups() {
        assert!(PgnTokenKind::TagKey.is_tag_kind());
        assert!(PgnTokenKind::TagValue.is_tag_kind());
        assert!(!PgnTokenKind::TagValue.is_move_kind());

        assert!(PgnTokenKind::Piece.is_move_kind());
        assert!(PgnTokenKind::KingsideCastle.is_move_kind());
        assert!(PgnTokenKind::Checkmate.is_move_kind());
        assert!(!PgnTokenKind::MoveNumber.is_move_kind());
        assert!(!PgnTokenKind::Result.is_move_kind());
        assert!(!PgnTokenKind::Comment.is_tag_kind());

        assert_eq!(PgnTokenKind::from(MoveTokenKind::Square), PgnTokenKind::Square);
    }

    #[test]
    fn test_serialize() {
        let token = PgnToken::new(PgnTokenKind::QueensideCastle, "O-O-O");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"kind":"QUEENSIDE_CASTLE","text":"O-O-O"}"#);
        assert_eq!(token.to_string(), "QUEENSIDE_CASTLE(\"O-O-O\")");
    }
}
