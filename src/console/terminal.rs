//! Terminal session integrating all console components
//!
//! One [`Terminal`] owns the state of one remote session: the line being
//! edited, its cursor, the history ring and the pending escape sequence.
//! The polling loop hands it one received byte at a time.

use super::commands::{find_command, CommandDescriptor};
use super::completion::{complete, Completion};
use super::escape::{EscapeAction, EscapeMatcher, Feed};
use super::history::History;
use super::line_buffer::{LineBuffer, LineRecord};
use super::parser::parse_line;
use super::render;
use super::sink::Transmit;
use super::ConsoleError;
use crate::config::{TerminalConfig, MAX_HISTORY_DEPTH, MAX_LINE_LENGTH};
use crate::logging::LogTarget;
use crate::{term_debug, term_info, term_trace, term_warn};

/// Console state machine
pub struct Terminal<'a, S, const N: usize = MAX_LINE_LENGTH, const D: usize = MAX_HISTORY_DEPTH> {
    sink: S,
    commands: &'a [CommandDescriptor<'a>],
    config: TerminalConfig<'a>,
    line: LineBuffer<N>,
    history: History<D, N>,
    escape: EscapeMatcher,
    log: Option<LogTarget<'a>>,
}

impl<'a, S: Transmit, const N: usize, const D: usize> Terminal<'a, S, N, D> {
    /// Create a session with the default texts
    pub fn new(sink: S, commands: &'a [CommandDescriptor<'a>]) -> Self {
        Self::with_config(sink, commands, TerminalConfig::new())
    }

    /// Create a session with custom texts
    pub fn with_config(
        sink: S,
        commands: &'a [CommandDescriptor<'a>],
        config: TerminalConfig<'a>,
    ) -> Self {
        Self {
            sink,
            commands,
            config,
            line: LineBuffer::new(),
            history: History::new(),
            escape: EscapeMatcher::new(),
            log: None,
        }
    }

    /// Send diagnostics to `target`
    pub fn with_log(mut self, target: LogTarget<'a>) -> Self {
        self.log = Some(target);
        self
    }

    /// Client connected: print the prompt on a fresh line
    pub fn attach(&mut self) {
        render::newline(&mut self.sink);
        self.sink.send_str(self.config.greeting);
        term_info!(self.log, "attach");
    }

    /// Client disconnected: drop line, history and pending escape
    pub fn detach(&mut self) {
        self.line.clear();
        self.history.clear();
        self.escape.reset();
        term_info!(self.log, "detach");
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a command was dispatched, None otherwise.
    pub fn process_byte(&mut self, byte: u8) -> Option<Result<(), ConsoleError>> {
        match self.escape.feed(byte) {
            Feed::Literal(b) => {
                self.insert(b);
                None
            }
            Feed::Pending => None,
            Feed::Flush(flushed) => {
                let bytes = flushed.as_bytes();
                term_debug!(self.log, "unmatched escape, {} bytes as text", bytes.len());
                for &b in bytes {
                    self.insert(b);
                }
                None
            }
            Feed::Resolved(action) => self.run(action),
        }
    }

    fn run(&mut self, action: EscapeAction) -> Option<Result<(), ConsoleError>> {
        match action {
            EscapeAction::Accept => return self.accept(),
            EscapeAction::Backspace => self.backspace(),
            EscapeAction::Complete => self.complete(),
            EscapeAction::Delete => self.delete(),
            EscapeAction::Up => {
                if let Some(record) = self.history.browse_up() {
                    self.show_recalled(&record);
                }
            }
            EscapeAction::Down => {
                if let Some(record) = self.history.browse_down() {
                    self.show_recalled(&record);
                }
            }
            EscapeAction::Left => self.move_cursor(-1),
            EscapeAction::Right => self.move_cursor(1),
            EscapeAction::Home => self.move_cursor(-(self.line.cursor() as isize)),
            EscapeAction::End => self.move_cursor((self.line.len() - self.line.cursor()) as isize),
        }
        None
    }

    fn insert(&mut self, byte: u8) {
        if !self.line.insert(byte) {
            term_debug!(self.log, "line full, dropped {:#04x}", byte);
            return;
        }
        render::echo(&mut self.sink, &[byte]);
        let tail = self.line.tail();
        if !tail.is_empty() {
            render::redraw_tail(&mut self.sink, tail, 0);
        }
    }

    fn backspace(&mut self) {
        if self.line.erase_before() {
            render::echo(&mut self.sink, render::DEL);
            render::redraw_tail(&mut self.sink, self.line.tail(), 1);
        }
    }

    fn delete(&mut self) {
        if self.line.erase_at() {
            render::redraw_tail(&mut self.sink, self.line.tail(), 1);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let moved = self.line.move_cursor(delta);
        if moved < 0 {
            render::cursor_left(&mut self.sink, moved.unsigned_abs());
        } else {
            render::cursor_right(&mut self.sink, moved as usize);
        }
    }

    /// Swap the visible line for a history entry (or the empty live line)
    fn show_recalled(&mut self, record: &LineRecord<N>) {
        let previous_len = self.line.len();
        render::cursor_left(&mut self.sink, self.line.cursor());

        self.line.replace(record);
        render::echo(&mut self.sink, record.as_bytes());
        render::blank(&mut self.sink, previous_len.saturating_sub(record.len()));
    }

    // The suffix goes in at the cursor, wherever it is, and only if all of it fits.
    fn complete(&mut self) {
        let (name, suffix) = match complete(self.line.as_bytes(), self.commands) {
            Completion::Unique { name, suffix } => (name, suffix),
            _ => return,
        };
        if self.line.len() + suffix.len() >= N {
            term_debug!(self.log, "no room to complete '{}'", name);
            return;
        }
        for &b in suffix {
            self.insert(b);
        }
    }

    fn accept(&mut self) -> Option<Result<(), ConsoleError>> {
        render::newline(&mut self.sink);

        if !self.line.is_empty() && self.history.push(self.line.record()) {
            term_trace!(self.log, "history full, oldest entry evicted");
        }

        let parsed = parse_line(self.line.as_bytes());
        let result = if let Some(cmd) = find_command(self.commands, parsed.command) {
            let result = (cmd.handler)(&parsed, &mut self.sink);
            if let Err(e) = result {
                term_warn!(self.log, "{} failed: {}", cmd.name, e);
                self.sink.send_fmt(format_args!(" - {}", e));
            }
            render::newline(&mut self.sink);
            Some(result)
        } else if parsed.command.is_empty() {
            None
        } else {
            term_info!(self.log, "unknown command '{}'", parsed.command_str());
            render::echo(&mut self.sink, parsed.command);
            self.sink.send_str(self.config.unknown_command);
            render::newline(&mut self.sink);
            Some(Err(ConsoleError::UnknownCommand))
        };

        self.sink.send_str(self.config.greeting);
        self.line.clear();
        result
    }

    /// Current line
    pub fn line(&self) -> &LineBuffer<N> {
        &self.line
    }

    /// Cursor offset in the current line
    pub fn cursor(&self) -> usize {
        self.line.cursor()
    }

    pub fn history(&self) -> &History<D, N> {
        &self.history
    }

    /// True while an escape sequence is being collected
    pub fn escape_pending(&self) -> bool {
        self.escape.is_pending()
    }

    pub fn config(&self) -> &TerminalConfig<'a> {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
