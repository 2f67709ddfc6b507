use thiserror::Error;

/// Failure while reading games from a PGN source.
///
/// Running out of games is not an error; the scanner reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum PgnScanError {
    #[error("Could not read PGN source: {0}")]
    Io(#[from] std::io::Error),
}
