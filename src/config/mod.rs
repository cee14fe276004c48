//! Module: config
//!
//! Purpose: Configuration for the terminal server.
//!
//! Capacities are compile-time constants used as const-generic defaults by
//! the console types. Texts shown to the remote terminal are carried in a
//! [`TerminalConfig`] value handed to the session at init.

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Line buffer capacity in bytes. One byte is always kept free,
/// so an accepted line holds at most `MAX_LINE_LENGTH - 1` bytes.
pub const MAX_LINE_LENGTH: usize = 64;

/// Number of accepted lines kept in history
pub const MAX_HISTORY_DEPTH: usize = 3;

/// Capacity of the pending escape-sequence buffer
pub const MAX_ESCAPE_LENGTH: usize = 10;

/// Prompt sent on attach and after every accepted line
pub const GREETING: &str = "\x1B[36mroot@term-srv: \x1B[0m";

/// Appended to the echoed command name when no handler matches
pub const UNKNOWN_COMMAND: &str = "\x1B[31m - command not found\x1B[0m";

/// Texts sent to the remote terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig<'a> {
    pub greeting: &'a str,
    pub unknown_command: &'a str,
}

impl<'a> TerminalConfig<'a> {
    /// Configuration using [`GREETING`] and [`UNKNOWN_COMMAND`]
    pub const fn new() -> Self {
        Self {
            greeting: GREETING,
            unknown_command: UNKNOWN_COMMAND,
        }
    }

    /// Replace the prompt
    pub const fn with_greeting(mut self, greeting: &'a str) -> Self {
        self.greeting = greeting;
        self
    }

    /// Replace the unknown-command suffix
    pub const fn with_unknown_command(mut self, text: &'a str) -> Self {
        self.unknown_command = text;
        self
    }
}

impl Default for TerminalConfig<'_> {
    fn default() -> Self {
        Self::new()
    }
}
