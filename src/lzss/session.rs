use super::tokens::Match;
use super::tree::MatchIndex;
use super::window::Window;
use super::{F, N};
use crate::error::Result;

/// Byte stored into slots past the end of the input
const PADDING: u8 = 0;

/// All mutable state of one compression run: the window and its match index
///
/// Sessions share nothing, so independent inputs can be compressed with
/// independent sessions on separate threads.
pub struct Session {
    window: Window,
    index: MatchIndex,
}

impl Session {
    /// Allocate a fresh window and an empty index
    pub fn new() -> Result<Self> {
        Ok(Self { window: Window::try_new()?, index: MatchIndex::try_new()? })
    }

    /// Place a byte of the initial lookahead directly into `slot`
    pub fn prime(&mut self, slot: usize, byte: u8) {
        self.window.store(slot, byte);
    }

    /// Evict the slot F positions ahead of `cursor` and refill it with the
    /// next input byte (or padding once the input is exhausted)
    pub fn slide(&mut self, cursor: usize, next: Option<u8>) {
        let incoming = (cursor + F) & (N - 1);
        self.index.delete(incoming);
        self.window.store(incoming, next.unwrap_or(PADDING));
    }

    /// Index the string at `cursor` and return the best earlier match
    pub fn insert(&mut self, cursor: usize, run: usize) -> Match {
        self.index.insert(&self.window, cursor, run)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn index(&self) -> &MatchIndex {
        &self.index
    }
}
