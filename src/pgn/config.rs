use serde::Deserialize;

/// Tuning for where [`PgnScanner`](crate::pgn::PgnScanner) draws game boundaries
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Consecutive blank lines that end a game once its result has been seen
    pub blank_lines_to_end: usize,
}

impl ScannerConfig {
    pub const DEFAULT_BLANK_LINES_TO_END: usize = 2;

    pub fn with_blank_lines_to_end(blank_lines_to_end: usize) -> ScannerConfig {
        ScannerConfig { blank_lines_to_end }
    }

    /// The blank line threshold actually applied; zero would end a game on any line
    pub fn effective_blank_lines_to_end(&self) -> usize {
        self.blank_lines_to_end.max(1)
    }
}

impl Default for ScannerConfig {
    fn default() -> ScannerConfig {
        ScannerConfig { blank_lines_to_end: ScannerConfig::DEFAULT_BLANK_LINES_TO_END }
    }
}
