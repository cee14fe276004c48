//! Command history with ring buffer
//!
//! Static allocation, `D` entries of `N` bytes each. Index 0 is always the
//! oldest entry; when full, the oldest is overwritten by moving the base
//! index instead of shifting slots.

use super::line_buffer::LineRecord;
use crate::config::{MAX_HISTORY_DEPTH, MAX_LINE_LENGTH};

/// Command history ring buffer
#[derive(Debug, Clone)]
pub struct History<const D: usize = MAX_HISTORY_DEPTH, const N: usize = MAX_LINE_LENGTH> {
    /// Ring buffer of accepted lines
    slots: [LineRecord<N>; D],
    /// Slot holding the oldest entry
    head: usize,
    /// Number of valid entries
    count: usize,
    /// Browse position, `count` = live edit line
    browse: usize,
}

impl<const D: usize, const N: usize> History<D, N> {
    /// Create empty history
    pub const fn new() -> Self {
        assert!(D > 0, "History depth must be non-zero");

        Self {
            slots: [LineRecord::new(); D],
            head: 0,
            count: 0,
            browse: 0,
        }
    }

    /// Append an accepted line.
    ///
    /// Empty lines are ignored. Returns `true` when the oldest entry was
    /// evicted to make room.
    pub fn push(&mut self, record: &LineRecord<N>) -> bool {
        if record.is_empty() {
            return false;
        }

        let evicted = self.count == D;
        if evicted {
            self.slots[self.head] = *record;
            self.head = (self.head + 1) % D;
        } else {
            self.slots[(self.head + self.count) % D] = *record;
            self.count += 1;
        }

        self.browse = self.count; // Reset navigation
        evicted
    }

    /// Step to the previous (older) entry
    pub fn browse_up(&mut self) -> Option<LineRecord<N>> {
        if self.browse == 0 {
            return None;
        }
        self.browse -= 1;
        self.get(self.browse).copied()
    }

    /// Step to the next (newer) entry.
    ///
    /// Stepping past the newest entry yields an empty record (back to the
    /// live edit line); stepping further is a no-op.
    pub fn browse_down(&mut self) -> Option<LineRecord<N>> {
        if self.browse >= self.count {
            return None;
        }
        self.browse += 1;
        if self.browse == self.count {
            Some(LineRecord::new())
        } else {
            self.get(self.browse).copied()
        }
    }

    /// Leave browsing, back to live edit
    pub fn reset_browse(&mut self) {
        self.browse = self.count;
    }

    /// Current browse position (`len()` when not browsing)
    pub fn browse_position(&self) -> usize {
        self.browse
    }

    /// Entry by age, 0 = oldest
    pub fn get(&self, index: usize) -> Option<&LineRecord<N>> {
        if index >= self.count {
            return None;
        }
        Some(&self.slots[(self.head + index) % D])
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &LineRecord<N>> + '_ {
        (0..self.count).map(move |i| &self.slots[(self.head + i) % D])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub const fn capacity(&self) -> usize {
        D
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<const D: usize, const N: usize> Default for History<D, N> {
    fn default() -> Self {
        Self::new()
    }
}
