pub mod session;
pub mod tokens;
pub mod tree;
pub mod window;

pub use session::Session;
pub use tokens::{Match, Token};
pub use tree::MatchIndex;
pub use window::Window;

/// Dictionary size (ring buffer slots)
pub const N: usize = 4096;

/// Lookahead size
pub const F: usize = 16;

/// Shortest match worth encoding as a back-reference
pub const THRESHOLD: usize = 3;

/// Longest match the 4-bit length field can carry (15 + THRESHOLD)
pub const MAX_MATCH: usize = 0x0F + THRESHOLD;

/// Slot where both the compressor and the inverse tool start writing
pub const START_POS: usize = N - F;
