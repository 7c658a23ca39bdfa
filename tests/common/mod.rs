//! Shared helpers for the integration tests.

pub mod expand;

/// Generate random data using a simple PRNG
pub fn generate_random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        // Simple xorshift PRNG
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.push((state & 0xFF) as u8);
    }
    data
}

/// Generate data with mixed patterns (moderate compression)
pub fn generate_mixed_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let patterns = [
        b"ACGTACGTACGTACGT".as_slice(),
        b"NNNNNNNNNNNNNNNNNNNNNNNN".as_slice(),
        b"ATATATATATATATAT".as_slice(),
        b"the quick brown fox ".as_slice(),
    ];

    let mut pattern_idx = 0;
    while data.len() < size {
        let pattern = patterns[pattern_idx % patterns.len()];
        let remaining = size - data.len();
        let chunk_size = remaining.min(pattern.len());
        data.extend_from_slice(&pattern[..chunk_size]);
        pattern_idx += 1;
    }
    data
}

/// Generate text-like data: words from a small vocabulary in PRNG order
pub fn generate_text_data(size: usize, seed: u64) -> Vec<u8> {
    let words: [&[u8]; 12] = [
        b"the ", b"window ", b"slides ", b"over ", b"a ", b"dictionary ", b"of ",
        b"recent ", b"bytes\n", b"match ", b"literal ", b"group ",
    ];
    let mut data = Vec::with_capacity(size + 16);
    let mut state = seed;
    while data.len() < size {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.extend_from_slice(words[(state % words.len() as u64) as usize]);
    }
    data.truncate(size);
    data
}
