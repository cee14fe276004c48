//! Escape sequence matcher
//!
//! Control bytes (`0x00..=0x1F`, `0x7F`) open a pending sequence which is
//! compared against a small static table after every byte. A sequence is
//! resolved only when exactly one entry is left and its length has been
//! reached; anything that can no longer match is flushed back as literal
//! text.

use crate::config::MAX_ESCAPE_LENGTH;

/// Editor action bound to an escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeAction {
    /// CR / LF
    Accept,
    /// DEL / BS
    Backspace,
    /// TAB
    Complete,
    /// `ESC [ 3 ~`
    Delete,
    /// `ESC [ A`
    Up,
    /// `ESC [ B`
    Down,
    /// `ESC [ D`
    Left,
    /// `ESC [ C`
    Right,
    /// `ESC [ 1 ~`
    Home,
    /// `ESC [ 4 ~`
    End,
}

/// One row of the escape table
#[derive(Debug, Clone, Copy)]
pub struct EscapeEntry {
    pub sequence: &'static [u8],
    pub action: EscapeAction,
}

/// Recognized input sequences
#[rustfmt::skip]
pub static ESCAPE_TABLE: &[EscapeEntry] = &[
    EscapeEntry { sequence: b"\x0D", action: EscapeAction::Accept },
    EscapeEntry { sequence: b"\x0A", action: EscapeAction::Accept },
    EscapeEntry { sequence: b"\x7F", action: EscapeAction::Backspace },
    EscapeEntry { sequence: b"\x08", action: EscapeAction::Backspace },
    EscapeEntry { sequence: b"\x09", action: EscapeAction::Complete },
    EscapeEntry { sequence: b"\x1B[3~", action: EscapeAction::Delete },
    EscapeEntry { sequence: b"\x1B[A", action: EscapeAction::Up },
    EscapeEntry { sequence: b"\x1B[B", action: EscapeAction::Down },
    EscapeEntry { sequence: b"\x1B[D", action: EscapeAction::Left },
    EscapeEntry { sequence: b"\x1B[C", action: EscapeAction::Right },
    EscapeEntry { sequence: b"\x1B[4~", action: EscapeAction::End },
    EscapeEntry { sequence: b"\x1B[1~", action: EscapeAction::Home },
];

/// Byte that may open an escape sequence
#[inline]
pub fn is_control(byte: u8) -> bool {
    byte <= 0x1F || byte == 0x7F
}

/// Bytes of an abandoned sequence, already made printable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flushed {
    bytes: [u8; MAX_ESCAPE_LENGTH],
    len: usize,
}

impl Flushed {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Plain text, no sequence pending
    Literal(u8),
    /// Sequence still ambiguous or incomplete
    Pending,
    /// Sequence complete
    Resolved(EscapeAction),
    /// No table entry matches; insert these bytes as text
    Flush(Flushed),
}

/// Incremental matcher over [`ESCAPE_TABLE`]
#[derive(Debug, Clone)]
pub struct EscapeMatcher {
    pending: [u8; MAX_ESCAPE_LENGTH],
    len: usize,
}

impl EscapeMatcher {
    pub const fn new() -> Self {
        Self {
            pending: [0u8; MAX_ESCAPE_LENGTH],
            len: 0,
        }
    }

    /// Feed one input byte
    pub fn feed(&mut self, byte: u8) -> Feed {
        if self.len == 0 && !is_control(byte) {
            return Feed::Literal(byte);
        }

        self.pending[self.len] = byte;
        self.len += 1;

        let pending = &self.pending[..self.len];
        let mut candidates = ESCAPE_TABLE
            .iter()
            .filter(|e| e.sequence.len() >= pending.len() && e.sequence.starts_with(pending));

        match (candidates.next(), candidates.next()) {
            (None, _) => Feed::Flush(self.flush()),
            (Some(entry), None) if entry.sequence.len() == self.len => {
                self.reset();
                Feed::Resolved(entry.action)
            }
            // Unique but incomplete, or still ambiguous
            _ if self.len == MAX_ESCAPE_LENGTH => Feed::Flush(self.flush()),
            _ => Feed::Pending,
        }
    }

    /// True while a sequence is being collected
    pub fn is_pending(&self) -> bool {
        self.len != 0
    }

    /// Bytes collected so far
    pub fn pending(&self) -> &[u8] {
        &self.pending[..self.len]
    }

    /// Drop any pending sequence
    pub fn reset(&mut self) {
        self.pending = [0u8; MAX_ESCAPE_LENGTH];
        self.len = 0;
    }

    fn flush(&mut self) -> Flushed {
        let mut bytes = self.pending;
        for b in bytes[..self.len].iter_mut() {
            if is_control(*b) {
                *b = b'?';
            }
        }
        let flushed = Flushed { bytes, len: self.len };
        self.reset();
        flushed
    }
}

impl Default for EscapeMatcher {
    fn default() -> Self {
        Self::new()
    }
}
