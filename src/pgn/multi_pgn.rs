use std::fmt::{Display, Formatter};
use std::io::{BufRead, BufReader, Read};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};
use crate::pgn::config::ScannerConfig;
use crate::pgn::error::PgnScanError;
use crate::pgn::tags::collect_tags;
use crate::pgn::token::PgnToken;
use crate::pgn::tokenize::PgnLexer;
use crate::utils::{contains_result, is_whitespace};

/// The raw text of one complete game, from its first tag line through its result
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameBlock {
    raw: String,
}

impl GameBlock {
    pub fn new(raw: String) -> GameBlock {
        GameBlock { raw }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }

    /// A fresh lexer over this game
    pub fn lexer(&self) -> PgnLexer<'_> {
        PgnLexer::new(&self.raw)
    }

    pub fn tokens(&self) -> Vec<PgnToken<'_>> {
        tokenize_game(self)
    }

    pub fn tags(&self) -> IndexMap<String, String> {
        collect_tags(&self.tokens())
    }
}

impl Display for GameBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Tokenizes one game with a fresh lexer, stopping before the EOF token
pub fn tokenize_game(game: &GameBlock) -> Vec<PgnToken<'_>> {
    game.lexer().collect()
}

/// Follows the brace depth and result markers of the game being accumulated
#[derive(Default, Debug)]
struct GameProgress {
    brace_depth: usize,
    saw_result: bool,
    saw_move_text: bool,
}

impl GameProgress {
    fn update(&mut self, line: &str) {
        let trimmed = line.trim_start();
        if self.brace_depth == 0 && trimmed.starts_with('[') {
            self.update_tag_line(line);
            return;
        }

        self.saw_move_text = true;

        let mut outside_comments = String::with_capacity(line.len());
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => self.close_brace(line),
                _ if self.brace_depth == 0 => outside_comments.push(ch),
                _ => {}
            }
        }

        self.saw_result |= contains_result(&outside_comments);
    }

    /// Counts braces outside of quoted tag values. A result quoted in a tag line,
    /// e.g. [Result "1-0"], does not end the game
    fn update_tag_line(&mut self, line: &str) {
        let mut in_quotes = false;
        let mut chars = line.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '\\' if in_quotes => {
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                '{' if !in_quotes => self.brace_depth += 1,
                '}' if !in_quotes => self.close_brace(line),
                _ => {}
            }
        }
    }

    fn close_brace(&mut self, line: &str) {
        if self.brace_depth == 0 {
            warn!(line = line.trim_end(), "unbalanced '}}' in move text");
        }
        self.brace_depth = self.brace_depth.saturating_sub(1);
    }

    /// Both a result marker outside comments and all comments closed
    fn is_complete(&self) -> bool {
        self.brace_depth == 0 && self.saw_result
    }

    /// A new tag section can only start once the move text of this game has begun
    fn accepts_next_game(&self) -> bool {
        self.brace_depth == 0 && self.saw_move_text
    }
}

/// Splits a PGN stream into games, one line at a time
pub struct PgnScanner<R: BufRead> {
    reader: R,
    pushback: Option<String>,
    config: ScannerConfig,
    games_scanned: usize,
}

impl<T: Read> PgnScanner<BufReader<T>> {
    pub fn from_reader(reader: T) -> PgnScanner<BufReader<T>> {
        PgnScanner::new(BufReader::new(reader))
    }
}

impl<R: BufRead> PgnScanner<R> {
    pub fn new(reader: R) -> PgnScanner<R> {
        PgnScanner::with_config(reader, ScannerConfig::default())
    }

    pub fn with_config(reader: R, config: ScannerConfig) -> PgnScanner<R> {
        PgnScanner {
            reader,
            pushback: None,
            config,
            games_scanned: 0,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn games_scanned(&self) -> usize {
        self.games_scanned
    }

    /// Whether anything but whitespace is left to scan.
    ///
    /// Leading whitespace of the source is consumed, which never changes the games
    /// that [`scan_game`](Self::scan_game) returns afterwards.
    pub fn has_next(&mut self) -> Result<bool, PgnScanError> {
        if self.pushback.is_some() {
            return Ok(true);
        }

        loop {
            let buffer = self.reader.fill_buf()?;
            if buffer.is_empty() {
                return Ok(false);
            }

            let whitespace = buffer.iter().take_while(|&&byte| is_whitespace(byte)).count();
            let has_content = whitespace < buffer.len();
            self.reader.consume(whitespace);

            if has_content {
                return Ok(true);
            }
        }
    }

    /// Reads the next game, or `None` once the source holds no more games
    pub fn scan_game(&mut self) -> Result<Option<GameBlock>, PgnScanError> {
        let mut game = String::new();
        let mut progress = GameProgress::default();
        let mut in_game = false;
        let mut pending_blank_lines = String::new();
        let mut blank_run = 0;
        let blank_lines_to_end = self.config.effective_blank_lines_to_end();

        if let Some(line) = self.pushback.take() {
            trace!(line = line.trim_end(), "resuming from pushed back line");
            progress.update(&line);
            game.push_str(&line);
            in_game = true;
        }

        while let Some(line) = self.read_line()? {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                if in_game {
                    blank_run += 1;
                    if blank_run >= blank_lines_to_end && progress.is_complete() {
                        debug!(blank_run, "game ended by blank lines");
                        break;
                    }
                    pending_blank_lines.push_str(&line);
                }
                continue;
            }

            blank_run = 0;

            if trimmed.starts_with('[') && progress.brace_depth == 0 {
                if in_game && progress.accepts_next_game() {
                    debug!(complete = progress.is_complete(), "game ended by the tag section of the next game");
                    self.pushback = Some(line);
                    break;
                }
                in_game = true;
            }

            if in_game {
                game.push_str(&pending_blank_lines);
                pending_blank_lines.clear();
                progress.update(&line);
                game.push_str(&line);
            } else {
                trace!(line = trimmed, "skipping text outside of a game");
            }
        }

        if game.is_empty() {
            return Ok(None);
        }

        if !progress.is_complete() {
            debug!(brace_depth = progress.brace_depth, "closing incomplete game at end of input");
        }

        self.games_scanned += 1;
        trace!(game = self.games_scanned, bytes = game.len(), "scanned game");
        Ok(Some(GameBlock::new(game)))
    }

    /// Next line including its terminator, or `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>, PgnScanError> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        match String::from_utf8(bytes) {
            Ok(line) => Ok(Some(line)),
            Err(err) => {
                let line = String::from_utf8_lossy(err.as_bytes()).into_owned();
                warn!(line = line.trim_end(), "replaced invalid UTF-8 in PGN source");
                Ok(Some(line))
            }
        }
    }
}

impl<R: BufRead> Iterator for PgnScanner<R> {
    type Item = Result<GameBlock, PgnScanError>;

    fn next(&mut self) -> Option<Result<GameBlock, PgnScanError>> {
        self.scan_game().transpose()
    }
}

/// Splits an in-memory multi-game PGN string into games
pub fn split_games(pgn: &str) -> Vec<GameBlock> {
    let mut scanner = PgnScanner::new(pgn.as_bytes());
    let mut games = Vec::new();

    // Reading from a byte slice cannot fail
    while let Ok(Some(game)) = scanner.scan_game() {
        games.push(game);
    }

    games
}
