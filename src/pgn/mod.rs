mod config;
mod cursor;
mod error;
mod multi_pgn;
mod tags;
mod token;
mod tokenize;

pub use config::*;
pub use cursor::*;
pub use error::*;
pub use multi_pgn::*;
pub use tags::*;
pub use token::*;
pub use tokenize::*;
