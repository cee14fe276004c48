//! Line buffer for console input
//!
//! Fixed-capacity byte array with an explicit length and a cursor.
//! Insert and erase shift the tail in place; bytes past the length are
//! always zero.

use crate::config::MAX_LINE_LENGTH;

/// A line of input, copied by value into history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<const N: usize = MAX_LINE_LENGTH> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> LineRecord<N> {
    /// Create empty record
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    /// Record holding `bytes`, truncated to `N - 1` bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut record = Self::new();
        let len = bytes.len().min(N.saturating_sub(1));
        record.buf[..len].copy_from_slice(&bytes[..len]);
        record.len = len;
        record
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for LineRecord<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Current line plus cursor
#[derive(Debug, Clone)]
pub struct LineBuffer<const N: usize = MAX_LINE_LENGTH> {
    record: LineRecord<N>,
    cursor: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            record: LineRecord::new(),
            cursor: 0,
        }
    }

    /// Insert a byte at the cursor, shifting the tail right.
    ///
    /// Returns `false` (byte dropped) when the line is full.
    pub fn insert(&mut self, c: u8) -> bool {
        if self.is_full() {
            return false;
        }
        let (cursor, len) = (self.cursor, self.record.len);
        self.record.buf.copy_within(cursor..len, cursor + 1);
        self.record.buf[cursor] = c;
        self.record.len += 1;
        self.cursor += 1;
        true
    }

    /// Remove the byte before the cursor (backspace)
    pub fn erase_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let (cursor, len) = (self.cursor, self.record.len);
        self.record.buf.copy_within(cursor..len, cursor - 1);
        self.record.buf[len - 1] = 0;
        self.record.len -= 1;
        self.cursor -= 1;
        true
    }

    /// Remove the byte under the cursor (delete)
    pub fn erase_at(&mut self) -> bool {
        if self.cursor == self.record.len {
            return false;
        }
        let (cursor, len) = (self.cursor, self.record.len);
        self.record.buf.copy_within(cursor + 1..len, cursor);
        self.record.buf[len - 1] = 0;
        self.record.len -= 1;
        true
    }

    /// Move the cursor by `delta`, clamped to `[0, len]`.
    ///
    /// Returns the signed distance actually moved.
    pub fn move_cursor(&mut self, delta: isize) -> isize {
        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize).min(self.record.len)
        };
        let moved = target as isize - self.cursor as isize;
        self.cursor = target;
        moved
    }

    /// Replace the whole line, cursor to end of line
    pub fn replace(&mut self, record: &LineRecord<N>) {
        self.record = *record;
        self.cursor = self.record.len;
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.record = LineRecord::new();
        self.cursor = 0;
    }

    /// Bytes from the cursor to end of line
    pub fn tail(&self) -> &[u8] {
        &self.record.buf[self.cursor..self.record.len]
    }

    pub fn record(&self) -> &LineRecord<N> {
        &self.record
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.record.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.record.len == 0
    }

    /// One byte of headroom is reserved, so the line is full at `N - 1`
    pub fn is_full(&self) -> bool {
        self.record.len + 1 >= N
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.record.as_bytes()
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        self.record.as_str()
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
