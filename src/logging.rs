//! Non-blocking diagnostics for the terminal server.
//!
//! ```text
//! Terminal session         LogStream             Drain (main loop)
//! ────────────────         ─────────             ─────────────────
//!
//! term_log!() ───────────▶ [E0][E1][E2] ───────▶ log UART / stderr
//! never blocks              lock-free             blocking ok
//! ```
//!
//! The console runs inside the byte-processing call of the polling loop, so
//! it must never wait on a logger. Entries are copied into a fixed ring and
//! dropped (and counted) when the ring is full.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Default ring size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message bytes.
    pub fn message(&self) -> &[u8] {
        &self.msg[..self.len as usize]
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One ring cell. `ready` is set after the entry is written and cleared
/// once the drain has copied it out.
struct Slot {
    ready: AtomicBool,
    entry: UnsafeCell<LogEntry>,
}

impl Slot {
    const EMPTY: Self = Self {
        ready: AtomicBool::new(false),
        entry: UnsafeCell::new(LogEntry::EMPTY),
    };
}

/// Lock-free log ring: many producers, one drain.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: producers claim distinct slots through the CAS on write_idx and
// publish them with a Release store of `ready`. The single drain reads a
// slot only after an Acquire load of `ready`, and hands it back by
// advancing read_idx.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            slots: [Slot::EMPTY; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue an entry. Returns `false` if the ring was full and the entry
    /// was dropped.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let read = self.read_idx.load(Ordering::Acquire);
        let mut claimed = self.write_idx.load(Ordering::Relaxed);
        loop {
            if claimed.wrapping_sub(read) >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                claimed,
                claimed.wrapping_add(1),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => claimed = current,
            }
        }

        let slot = &self.slots[(claimed as usize) & Self::MASK];
        let len = msg.len().min(MAX_MSG_LEN);

        // SAFETY: the slot is claimed by this producer only, and the drain
        // does not touch it until `ready` is set below.
        unsafe {
            let entry = &mut *slot.entry.get();
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = len as u8;
            entry.msg[..len].copy_from_slice(&msg[..len]);
        }
        slot.ready.store(true, Ordering::Release);
        true
    }

    /// Take the oldest entry, if any.
    ///
    /// Returns `None` while the oldest claimed slot is still being written,
    /// even if later slots are complete.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let slot = &self.slots[(read as usize) & Self::MASK];
        if !slot.ready.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: `ready` was published by the producer after its write,
        // and only this drain consumes the read slot.
        let entry = unsafe { *slot.entry.get() };
        slot.ready.store(false, Ordering::Relaxed);
        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Count of dropped messages since the last reset.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        self.write_idx.load(Ordering::Acquire).wrapping_sub(read)
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating on overflow.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for BufWriter<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let to_write = bytes.len().min(self.buf.len() - self.pos);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Where a console session sends its diagnostics.
///
/// `clock` supplies the entry timestamp in microseconds. Entries above
/// `max_level` are discarded before formatting.
#[derive(Clone, Copy)]
pub struct LogTarget<'a> {
    pub stream: &'a LogStream,
    pub clock: fn() -> i64,
    pub max_level: LogLevel,
}

impl<'a> LogTarget<'a> {
    /// Target that keeps every level.
    pub const fn new(stream: &'a LogStream, clock: fn() -> i64) -> Self {
        Self {
            stream,
            clock,
            max_level: LogLevel::Trace,
        }
    }

    /// Keep only entries at `level` or more severe.
    pub const fn with_max_level(mut self, level: LogLevel) -> Self {
        self.max_level = level;
        self
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }

    /// Format and push one entry.
    ///
    /// Returns `false` if the level is filtered out or the ring is full.
    #[inline]
    pub fn log(&self, level: LogLevel, args: core::fmt::Arguments<'_>) -> bool {
        if !self.enabled(level) {
            return false;
        }
        let mut buf = [0u8; MAX_MSG_LEN];
        let len = format_to_buffer(&mut buf, args);
        self.stream.push((self.clock)(), level, &buf[..len])
    }
}

/// Log through an optional [`LogTarget`].
///
/// ```ignore
/// term_log!(LogLevel::Debug, self.log, "line full, dropped {:#04x}", byte);
/// ```
#[macro_export]
macro_rules! term_log {
    ($level:expr, $target:expr, $($arg:tt)*) => {{
        if let Some(target) = $target.as_ref() {
            let _ = $crate::logging::LogTarget::log(target, $level, format_args!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! term_info {
    ($target:expr, $($arg:tt)*) => {
        $crate::term_log!($crate::logging::LogLevel::Info, $target, $($arg)*)
    };
}

#[macro_export]
macro_rules! term_error {
    ($target:expr, $($arg:tt)*) => {
        $crate::term_log!($crate::logging::LogLevel::Error, $target, $($arg)*)
    };
}

#[macro_export]
macro_rules! term_warn {
    ($target:expr, $($arg:tt)*) => {
        $crate::term_log!($crate::logging::LogLevel::Warn, $target, $($arg)*)
    };
}

#[macro_export]
macro_rules! term_debug {
    ($target:expr, $($arg:tt)*) => {
        $crate::term_log!($crate::logging::LogLevel::Debug, $target, $($arg)*)
    };
}

#[macro_export]
macro_rules! term_trace {
    ($target:expr, $($arg:tt)*) => {
        $crate::term_log!($crate::logging::LogLevel::Trace, $target, $($arg)*)
    };
}
