use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Resource errors
    #[error("Not enough memory for compression state ({requested} bytes)")]
    Allocation { requested: usize },

    #[error("Input too large: {size} bytes exceeds SZDD maximum {max}")]
    InputTooLarge { size: u64, max: u64 },

    // SZDD header errors
    #[error("Invalid SZDD magic bytes: got {0:02x?}")]
    InvalidMagic([u8; 8]),

    #[error("Unsupported SZDD compression method: 0x{0:02x} (only 'A' supported)")]
    UnsupportedMethod(u8),

    #[error("Unexpected end of input")]
    UnexpectedEof,

    // Internal errors
    #[error("Match index corrupted at slot {slot}: {reason}")]
    CorruptIndex { slot: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
