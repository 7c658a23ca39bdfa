use super::constants::*;
use crate::error::{Error, Result};
use std::io::{Read, Write};

/// SZDD container header (14 bytes, little-endian length)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SzddHeader {
    pub method: u8,
    /// Last character of the original name, which the compressed name replaces with `_`
    pub missing_char: u8,
    pub uncompressed_len: u32,
}

impl SzddHeader {
    /// Header for a file called `name` holding `uncompressed_len` bytes
    pub fn new(name: &str, uncompressed_len: u32) -> Self {
        Self {
            method: METHOD_A,
            missing_char: name.as_bytes().last().copied().unwrap_or(0),
            uncompressed_len,
        }
    }

    /// Serialize to the on-disk layout
    pub fn to_bytes(&self) -> [u8; SZDD_HEADER_SIZE] {
        let mut bytes = [0u8; SZDD_HEADER_SIZE];
        bytes[0..4].copy_from_slice(&SZDD_MAGIC);
        bytes[4..8].copy_from_slice(&SZDD_SUBMAGIC);
        bytes[8] = self.method;
        bytes[9] = self.missing_char;
        bytes[10..14].copy_from_slice(&self.uncompressed_len.to_le_bytes());
        bytes
    }

    /// Write the header to a writer
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Parse an SZDD header from a reader
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; SZDD_HEADER_SIZE];
        reader.read_exact(&mut buf).map_err(|_| Error::UnexpectedEof)?;

        if buf[0..4] != SZDD_MAGIC || buf[4..8] != SZDD_SUBMAGIC {
            let mut magic = [0u8; 8];
            magic.copy_from_slice(&buf[0..8]);
            return Err(Error::InvalidMagic(magic));
        }

        let method = buf[8];
        if method != METHOD_A {
            return Err(Error::UnsupportedMethod(method));
        }

        Ok(SzddHeader {
            method,
            missing_char: buf[9],
            uncompressed_len: u32::from_le_bytes([buf[10], buf[11], buf[12], buf[13]]),
        })
    }
}
