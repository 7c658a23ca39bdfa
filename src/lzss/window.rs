use super::{F, N};
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// 4KB ring buffer plus an F-byte alias region for lookahead
///
/// Slot `s < F` is mirrored at `s + N`, so the F bytes starting at any slot
/// can be read as one contiguous run without wrapping.
pub struct Window {
    buffer: Box<[u8]>,
}

impl Window {
    /// Allocate a zeroed window, reporting allocation failure instead of aborting
    pub fn try_new() -> Result<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(N + F).map_err(|_| Error::Allocation { requested: N + F })?;
        buffer.resize(N + F, 0);
        Ok(Self { buffer: buffer.into_boxed_slice() })
    }

    /// Store a byte into slot `slot` (0..N), updating the alias region
    #[inline]
    pub fn store(&mut self, slot: usize, byte: u8) {
        debug_assert!(slot < N);
        self.buffer[slot] = byte;
        if slot < F {
            self.buffer[slot + N] = byte;
        }
    }

    /// Byte at slot `slot` (0..N+F)
    #[inline]
    pub fn get(&self, slot: usize) -> u8 {
        self.buffer[slot]
    }

    /// Compare the strings at `a` and `b`, starting at offset `from` and
    /// stopping at the first mismatch or after `run` bytes.
    ///
    /// Returns the number of equal leading bytes and how `a` orders against
    /// `b`. Bytes below `from` are assumed equal.
    #[inline]
    pub fn compare(&self, a: usize, b: usize, from: usize, run: usize) -> (usize, Ordering) {
        debug_assert!(run <= F);
        let mut n = from;
        while n < run {
            match self.buffer[a + n].cmp(&self.buffer[b + n]) {
                Ordering::Equal => n += 1,
                unequal => return (n, unequal),
            }
        }
        (n, Ordering::Equal)
    }
}
