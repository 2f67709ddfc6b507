mod chars;

pub use chars::*;
