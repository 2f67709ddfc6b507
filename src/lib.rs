pub mod pgn;
pub mod utils;
