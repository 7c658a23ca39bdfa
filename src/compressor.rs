use crate::error::{Error, Result};
use crate::lzss::{Session, Token, F, MAX_MATCH, N, START_POS};
use crate::szdd::{SzddHeader, TokenWriter};
use crate::{CompressConfig, CompressStats};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use tracing::{debug, warn};

/// Largest input whose length fits the header's 32-bit field
const MAX_INPUT_LEN: u64 = u32::MAX as u64;

/// SZDD compressor: one fresh [`Session`] per input
pub struct SzddCompressor {
    config: CompressConfig,
}

impl SzddCompressor {
    pub fn new(config: CompressConfig) -> Self {
        Self { config }
    }

    /// Compress `input` into `output`. `name` is the original file name; only
    /// its last byte is recorded in the header.
    pub fn compress<R: Read + Seek, W: Write>(
        &mut self,
        mut input: R,
        name: &str,
        output: W,
    ) -> Result<CompressStats> {
        let mut session = Session::new()?;

        let declared = input_length(&mut input)?;
        let header = if self.config.raw {
            None
        } else {
            if declared > MAX_INPUT_LEN {
                return Err(Error::InputTooLarge { size: declared, max: MAX_INPUT_LEN });
            }
            Some(SzddHeader::new(name, declared as u32))
        };

        let reader = BufReader::with_capacity(self.config.buffer_size, input);
        let writer = BufWriter::with_capacity(self.config.buffer_size, output);

        let mut source = ByteSource::new(reader);
        let mut tokens = TokenWriter::with_header(writer, header.as_ref())?;

        encode(&mut session, &mut source, &mut tokens)?;
        tokens.flush()?;

        let stats = CompressStats {
            input_bytes: source.consumed(),
            declared_bytes: declared,
            output_bytes: tokens.bytes_written(),
            literals: tokens.literals(),
            matches: tokens.matches(),
            groups: tokens.groups(),
        };

        if stats.input_bytes != declared {
            warn!(
                name,
                declared,
                read = stats.input_bytes,
                "input length changed while compressing"
            );
        }
        debug!(
            name,
            input = stats.input_bytes,
            output = stats.output_bytes,
            literals = stats.literals,
            matches = stats.matches,
            "compressed"
        );

        Ok(stats)
    }
}

/// Query the input length up front and rewind to the start
fn input_length<R: Seek>(input: &mut R) -> Result<u64> {
    let len = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(0))?;
    Ok(len)
}

/// Sequential byte reader where any read failure reads as end of input
struct ByteSource<R: Read> {
    bytes: io::Bytes<R>,
    consumed: u64,
    exhausted: bool,
}

impl<R: Read> ByteSource<R> {
    fn new(reader: R) -> Self {
        Self { bytes: reader.bytes(), consumed: 0, exhausted: false }
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.exhausted {
            return None;
        }
        match self.bytes.next() {
            Some(Ok(byte)) => {
                self.consumed += 1;
                Some(byte)
            }
            Some(Err(e)) => {
                warn!(error = %e, offset = self.consumed, "read failed, treating as end of input");
                self.exhausted = true;
                None
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    fn consumed(&self) -> u64 {
        self.consumed
    }
}

/// Drive the window over the whole input, one slot per step.
///
/// `len` counts bytes read into the window but not yet covered by a token;
/// `run` is the number of real bytes available from the cursor onward. A
/// token is due whenever `len` catches up with `run`; a back-reference of
/// length `m` defers the next token by `m` steps while the skipped slots are
/// still indexed.
fn encode<R: Read, W: Write>(
    session: &mut Session,
    source: &mut ByteSource<R>,
    tokens: &mut TokenWriter<W>,
) -> Result<()> {
    let mut cursor = START_POS;

    let mut len = 0;
    while len < F {
        match source.next_byte() {
            Some(byte) => {
                session.prime(START_POS + len, byte);
                len += 1;
            }
            None => break,
        }
    }
    let mut run = len;

    while len > 0 {
        let next = source.next_byte();
        session.slide(cursor, next);
        let found = session.insert(cursor, run);

        if next.is_none() {
            run -= 1;
            len -= 1;
        }

        let due = len >= run;
        len += 1;
        if due {
            let token = if found.is_usable() {
                let length = found.length.min(MAX_MATCH);
                Token::Copy { position: found.position as u16, length: length as u8 }
            } else {
                Token::Literal(session.window().get(cursor))
            };
            tokens.push(token)?;
            len -= token.uncompressed_size();
        }

        cursor = (cursor + 1) & (N - 1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(data: &[u8]) -> (Vec<u8>, Session) {
        let mut session = Session::new().unwrap();
        let mut source = ByteSource::new(data);
        let mut tokens = TokenWriter::new(Vec::new());
        encode(&mut session, &mut source, &mut tokens).unwrap();
        (tokens.finish().unwrap(), session)
    }

    /// Reader that yields some bytes, then fails
    struct FailingReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let (body, session) = encode_raw(b"");
        assert!(body.is_empty());
        assert!(session.index().is_empty());
    }

    #[test]
    fn test_single_byte() {
        let (body, _) = encode_raw(b"Z");
        assert_eq!(body, vec![0x01, b'Z']);
    }

    #[test]
    fn test_back_reference_to_start_position() {
        let (body, _) = encode_raw(b"abcXabc");
        assert_eq!(body, vec![0x0F, b'a', b'b', b'c', b'X', 0xF0, 0xF0]);
    }

    #[test]
    fn test_two_byte_match_stays_literal() {
        let (body, _) = encode_raw(b"abXabY");
        assert_eq!(body, vec![0x3F, b'a', b'b', b'X', b'a', b'b', b'Y']);
    }

    #[test]
    fn test_repeated_byte_keeps_tree_bounded() {
        let data = vec![b'A'; 100_000];
        let (body, session) = encode_raw(&data);

        assert!(session.index().max_depth() <= 1);
        // One literal, then 16-byte back-references: 2 bytes per 16 input
        // bytes plus a flag byte per 8 tokens
        assert!(body.len() < data.len() / 7);
        assert_eq!(body[0] & 0x01, 0x01);
        assert_eq!(body[1], b'A');
    }

    #[test]
    fn test_read_failure_is_end_of_input() {
        let reader = FailingReader { data: b"abc".to_vec(), pos: 0 };
        let mut session = Session::new().unwrap();
        let mut source = ByteSource::new(reader);
        let mut tokens = TokenWriter::new(Vec::new());

        encode(&mut session, &mut source, &mut tokens).unwrap();
        assert_eq!(source.consumed(), 3);
        assert_eq!(tokens.finish().unwrap(), vec![0x07, b'a', b'b', b'c']);
    }

    #[test]
    fn test_compress_with_header() {
        let mut compressor = SzddCompressor::new(CompressConfig::default());
        let mut output = Vec::new();
        let stats = compressor.compress(Cursor::new(b"hello"), "hello.txt", &mut output).unwrap();

        assert_eq!(&output[0..4], b"SZDD");
        assert_eq!(output[9], b't');
        assert_eq!(u32::from_le_bytes([output[10], output[11], output[12], output[13]]), 5);
        assert_eq!(&output[14..], &[0x1F, b'h', b'e', b'l', b'l', b'o']);

        assert_eq!(stats.input_bytes, 5);
        assert_eq!(stats.declared_bytes, 5);
        assert_eq!(stats.output_bytes, output.len() as u64);
        assert_eq!(stats.literals, 5);
        assert_eq!(stats.groups, 1);
    }

    #[test]
    fn test_compress_raw() {
        let config = CompressConfig { raw: true, ..Default::default() };
        let mut compressor = SzddCompressor::new(config);
        let mut output = Vec::new();
        compressor.compress(Cursor::new(b"hello"), "hello.txt", &mut output).unwrap();

        assert_eq!(output, vec![0x1F, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct FullDisk;
        impl Write for FullDisk {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "no space left"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut compressor = SzddCompressor::new(CompressConfig::default());
        let result = compressor.compress(Cursor::new(vec![7u8; 1000]), "x.bin", FullDisk);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
