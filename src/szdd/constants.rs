/// File magic "SZDD"
pub const SZDD_MAGIC: [u8; 4] = [0x53, 0x5A, 0x44, 0x44];

/// Second magic word identifying the LZSS method family
pub const SZDD_SUBMAGIC: [u8; 4] = [0x88, 0xF0, 0x27, 0x33];

/// Compression method 'A' (the only one EXPAND.EXE knows)
pub const METHOD_A: u8 = 0x41;

/// Header size: magic (4) + sub-magic (4) + method (1) + missing char (1) + length (4)
pub const SZDD_HEADER_SIZE: usize = 14;

/// Tokens sharing one flag byte
pub const GROUP_TOKENS: usize = 8;

/// Largest encoded group: flag byte + 8 back-references
pub const MAX_GROUP_SIZE: usize = 1 + GROUP_TOKENS * 2;
