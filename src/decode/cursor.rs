//! Read cursor over an input buffer
//!
//! The cursor is the only thing that touches the raw bytes. It never copies
//! them: byte strings are handed out as zero-copy slices of the shared buffer.

use bytes::Bytes;

/// An immutable buffer plus a read offset
#[derive(Debug, Clone)]
pub struct Cursor {
    buf: Bytes,
    pos: usize,
}

impl Cursor {
    /// Create a cursor positioned at the start of `buf`
    pub fn new(buf: Bytes) -> Self {
        Self { buf, pos: 0 }
    }

    /// The byte at the current offset, or `None` at the end of input
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Move forward by one byte. Does nothing once the end is reached.
    pub fn advance(&mut self) {
        if self.pos < self.buf.len() {
            self.pos += 1;
        }
    }

    /// Take exactly `n` bytes and move past them.
    ///
    /// Returns `None` and leaves the offset untouched if fewer than `n` bytes
    /// remain.
    pub fn take(&mut self, n: usize) -> Option<Bytes> {
        if n > self.remaining() {
            return None;
        }
        let slice = self.buf.slice(self.pos..self.pos + n);
        self.pos += n;
        Some(slice)
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if every byte has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buf.len()
    }
}
