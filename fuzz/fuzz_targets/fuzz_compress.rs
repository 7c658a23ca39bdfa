#![no_main]

use libfuzzer_sys::fuzz_target;
use mscompress::szdd::SZDD_HEADER_SIZE;
use mscompress::{compress, SzddHeader};
use std::io::Cursor;

#[path = "../../tests/common/expand.rs"]
mod expand;

fuzz_target!(|data: &[u8]| {
    let mut output = Vec::new();
    let stats = compress(Cursor::new(data), "fuzz.bin", &mut output, false)
        .expect("compressing from memory cannot fail");

    let header = SzddHeader::parse(&mut Cursor::new(&output)).expect("header must parse");
    assert_eq!(header.uncompressed_len as usize, data.len());
    assert_eq!(stats.output_bytes, output.len() as u64);

    let expanded = expand::expand(&output).expect("output must expand");
    assert!(expanded == data, "round-trip mismatch");

    // Raw mode is the same stream without the header
    let mut raw = Vec::new();
    compress(Cursor::new(data), "fuzz.bin", &mut raw, true).expect("raw compression");
    assert_eq!(&output[SZDD_HEADER_SIZE..], &raw[..]);
});
