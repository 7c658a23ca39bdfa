pub mod constants;
pub mod header;
pub mod writer;

pub use constants::*;
pub use header::SzddHeader;
pub use writer::TokenWriter;
