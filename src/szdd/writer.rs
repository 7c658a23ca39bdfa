use super::constants::*;
use super::header::SzddHeader;
use crate::error::Result;
use crate::lzss::{Token, MAX_MATCH, N, THRESHOLD};
use std::io::Write;

/// Packs tokens into SZDD groups and writes them out
///
/// Each group is one flag byte followed by up to 8 payloads. Flag bit `k`
/// (LSB first) is set when the k-th token of the group is a literal.
pub struct TokenWriter<W: Write> {
    writer: W,
    group: [u8; MAX_GROUP_SIZE],
    /// Bytes used in `group`, including the flag byte
    size: usize,
    /// Flag bit for the next token; shifts out of the byte after the 8th token
    mask: u8,
    bytes_written: u64,
    literals: u64,
    matches: u64,
    groups: u64,
}

impl<W: Write> TokenWriter<W> {
    /// Writer for a raw token stream (no container header)
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            group: [0u8; MAX_GROUP_SIZE],
            size: 1,
            mask: 1,
            bytes_written: 0,
            literals: 0,
            matches: 0,
            groups: 0,
        }
    }

    /// Writer that emits `header` first, or nothing when `header` is `None`
    pub fn with_header(writer: W, header: Option<&SzddHeader>) -> Result<Self> {
        let mut this = Self::new(writer);
        if let Some(header) = header {
            header.write(&mut this.writer)?;
            this.bytes_written += SZDD_HEADER_SIZE as u64;
        }
        Ok(this)
    }

    /// Append a token, writing the group out once it holds 8 tokens
    pub fn push(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Literal(byte) => {
                self.group[0] |= self.mask;
                self.group[self.size] = byte;
                self.literals += 1;
            }
            Token::Copy { position, length } => {
                debug_assert!((position as usize) < N);
                debug_assert!((THRESHOLD..=MAX_MATCH).contains(&(length as usize)));
                self.group[self.size] = position as u8;
                self.group[self.size + 1] =
                    ((position >> 4) & 0xF0) as u8 | (length - THRESHOLD as u8);
                self.matches += 1;
            }
        }
        self.size += token.encoded_size();

        self.mask <<= 1;
        if self.mask == 0 {
            self.flush_group()?;
        }
        Ok(())
    }

    /// Write any partial group and flush the inner writer
    pub fn flush(&mut self) -> Result<()> {
        if self.size > 1 {
            self.flush_group()?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Total bytes handed to the inner writer (header included)
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn literals(&self) -> u64 {
        self.literals
    }

    pub fn matches(&self) -> u64 {
        self.matches
    }

    /// Groups written so far
    pub fn groups(&self) -> u64 {
        self.groups
    }

    fn flush_group(&mut self) -> Result<()> {
        self.writer.write_all(&self.group[..self.size])?;
        self.bytes_written += self.size as u64;
        self.groups += 1;
        self.group[0] = 0;
        self.size = 1;
        self.mask = 1;
        Ok(())
    }
}
