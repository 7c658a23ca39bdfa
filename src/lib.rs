pub mod compressor;
pub mod error;
pub mod lzss;
pub mod szdd;

pub use compressor::SzddCompressor;
pub use error::{Error, Result};
pub use lzss::{Match, MatchIndex, Session, Token};
pub use szdd::{SzddHeader, TokenWriter};

use std::io::{Read, Seek, Write};

/// Configuration for compression
#[derive(Clone, Debug)]
pub struct CompressConfig {
    /// Write the bare token stream without the 14-byte SZDD header
    pub raw: bool,
    /// Buffer size for I/O operations
    pub buffer_size: usize,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self { raw: false, buffer_size: 128 * 1024 }
    }
}

/// Statistics from a compression run
#[derive(Clone, Debug, Default)]
pub struct CompressStats {
    /// Bytes actually read from the input
    pub input_bytes: u64,
    /// Input length measured up front (what the header records)
    pub declared_bytes: u64,
    /// Bytes written, header included
    pub output_bytes: u64,
    pub literals: u64,
    pub matches: u64,
    /// Flag-byte groups written
    pub groups: u64,
}

impl CompressStats {
    /// Output size as a fraction of input size (1.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            1.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Compress `input` into `output` as an SZDD file (or a bare token stream
/// when `raw` is set). `name` is the original file name.
pub fn compress<R: Read + Seek, W: Write>(
    input: R,
    name: &str,
    output: W,
    raw: bool,
) -> Result<CompressStats> {
    let config = CompressConfig { raw, ..Default::default() };
    SzddCompressor::new(config).compress(input, name, output)
}
