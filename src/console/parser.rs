//! Command line parser
//!
//! The command name ends at the first space; everything after it is left
//! to the handler.

/// Accepted line split into command and remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The whole accepted line
    pub line: &'a [u8],
    /// Bytes before the first space
    pub command: &'a [u8],
    /// Bytes after the first space (empty if none)
    pub rest: &'a [u8],
}

impl<'a> ParsedCommand<'a> {
    /// Command name as text ("" if not UTF-8)
    pub fn command_str(&self) -> &'a str {
        core::str::from_utf8(self.command).unwrap_or("")
    }

    /// Remainder as text ("" if not UTF-8)
    pub fn rest_str(&self) -> &'a str {
        core::str::from_utf8(self.rest).unwrap_or("")
    }

    /// Whitespace separated arguments
    pub fn args(&self) -> impl Iterator<Item = &'a str> {
        self.rest_str().split_whitespace()
    }

    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args().nth(idx)
    }
}

/// Split a line at its first space
pub fn parse_line(line: &[u8]) -> ParsedCommand<'_> {
    let (command, rest) = match line.iter().position(|&b| b == b' ') {
        Some(i) => (&line[..i], &line[i + 1..]),
        None => (line, &line[line.len()..]),
    };

    ParsedCommand { line, command, rest }
}
