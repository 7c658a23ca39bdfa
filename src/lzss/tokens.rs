use super::THRESHOLD;

/// Best match reported by a match-index insert
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Window slot where the match starts
    pub position: usize,
    /// Number of equal bytes (`THRESHOLD - 1` when nothing usable was found)
    pub length: usize,
}

impl Match {
    /// A match too short to be worth a back-reference
    pub const NONE: Match = Match { position: 0, length: THRESHOLD - 1 };

    /// Whether this match is long enough to encode as a back-reference
    pub fn is_usable(&self) -> bool {
        self.length >= THRESHOLD
    }
}

/// Represents a single token in the SZDD stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal byte
    Literal(u8),
    /// A back-reference: copy `length` bytes starting at window slot `position`
    Copy { position: u16, length: u8 },
}

impl Token {
    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Copy { length, .. } => *length as usize,
        }
    }

    /// Bytes this token occupies in the encoded stream (excluding its flag bit)
    pub fn encoded_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Copy { .. } => 2,
        }
    }
}
