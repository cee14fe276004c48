//! Terminal session tests: editing, rendering, history recall and dispatch

mod common;

use common::TestOutput;
use rust_term_srv::config::{TerminalConfig, GREETING, UNKNOWN_COMMAND};
use rust_term_srv::console::{CommandDescriptor, ConsoleError, ParsedCommand, Terminal, Transmit};
use rust_term_srv::logging::{LogLevel, LogStream, LogTarget};
use rust_term_srv::uart_logger::drain_log_stream;

const SAVE: &[u8] = b"\x1B[s";
const RESTORE: &[u8] = b"\x1B[u";
const LEFT: &[u8] = b"\x1B[D";
const RIGHT: &[u8] = b"\x1B[C";

const UP: &[u8] = b"\x1B[A";
const DOWN: &[u8] = b"\x1B[B";
const KEY_LEFT: &[u8] = LEFT;
const KEY_RIGHT: &[u8] = RIGHT;
const KEY_DELETE: &[u8] = b"\x1B[3~";
const KEY_HOME: &[u8] = b"\x1B[1~";
const KEY_END: &[u8] = b"\x1B[4~";

fn noop(_cmd: &ParsedCommand<'_>, out: &mut dyn Transmit) -> Result<(), ConsoleError> {
    out.send_str("ok");
    Ok(())
}

static HELP_ONLY: &[CommandDescriptor<'static>] = &[CommandDescriptor::new("help", noop)];

static H_COMMANDS: &[CommandDescriptor<'static>] = &[
    CommandDescriptor::new("hide", noop),
    CommandDescriptor::new("history", noop),
];

fn session(commands: &'static [CommandDescriptor<'static>]) -> Terminal<'static, TestOutput> {
    Terminal::new(TestOutput::new(), commands)
}

fn feed<const N: usize, const D: usize>(terminal: &mut Terminal<'_, TestOutput, N, D>, bytes: &[u8]) {
    for &b in bytes {
        terminal.process_byte(b);
    }
}

fn cat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

#[test]
fn test_attach_prints_greeting() {
    let mut t = session(HELP_ONLY);
    t.attach();
    assert_eq!(t.sink().buf, cat(&[b"\r\n", GREETING.as_bytes()]));
}

#[test]
fn test_typing_echoes_bytes() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"abc");

    assert_eq!(t.sink().buf, b"abc");
    assert_eq!(t.line().as_str(), "abc");
    assert_eq!(t.cursor(), 3);
}

// Scenario: unknown command goes to history and is reported
#[test]
fn test_accept_unknown_records_history() {
    let mut t: Terminal<'_, TestOutput> = Terminal::new(TestOutput::new(), &[]);
    feed(&mut t, b"ab");

    assert_eq!(t.process_byte(b'\r'), Some(Err(ConsoleError::UnknownCommand)));

    assert_eq!(t.history().len(), 1);
    assert_eq!(t.history().get(0).map(|r| r.as_str()), Some("ab"));
    assert!(t.sink().contains(&cat(&[b"ab", UNKNOWN_COMMAND.as_bytes()])));
    assert!(t.line().is_empty());
    assert_eq!(t.cursor(), 0);
}

// Scenario: unique completion
#[test]
fn test_tab_completes_unique_command() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"he");
    t.sink_mut().take();

    feed(&mut t, b"\t");

    assert_eq!(t.line().as_str(), "help");
    assert_eq!(t.cursor(), 4);
    assert_eq!(t.sink().buf, b"lp");
}

// Scenario: ambiguous completion does nothing
#[test]
fn test_tab_ambiguous_is_noop() {
    let mut t = session(H_COMMANDS);
    feed(&mut t, b"hi");
    t.sink_mut().take();

    feed(&mut t, b"\t");

    assert_eq!(t.line().as_str(), "hi");
    assert_eq!(t.cursor(), 2);
    assert!(t.sink().buf.is_empty());
}

#[test]
fn test_tab_completion_at_cursor_mid_line() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"he");
    feed(&mut t, KEY_LEFT);
    feed(&mut t, b"\t");

    // Suffix lands at the cursor, not at end of line
    assert_eq!(t.line().as_str(), "hlpe");
    assert_eq!(t.cursor(), 3);
}

#[test]
fn test_tab_completion_is_all_or_nothing() {
    // "he" + "lp" needs 4 bytes; capacity 5 holds 4, capacity 4 only 3
    let mut t: Terminal<'_, TestOutput, 5, 3> = Terminal::new(TestOutput::new(), HELP_ONLY);
    feed(&mut t, b"he\t");
    assert_eq!(t.line().as_str(), "help");

    let mut t: Terminal<'_, TestOutput, 4, 3> = Terminal::new(TestOutput::new(), HELP_ONLY);
    feed(&mut t, b"he");
    t.sink_mut().take();

    feed(&mut t, b"\t");

    assert_eq!(t.line().as_str(), "he");
    assert_eq!(t.cursor(), 2);
    assert!(t.sink().buf.is_empty());
}

// Scenario: history keeps the newest three
#[test]
fn test_history_evicts_oldest() {
    let mut t: Terminal<'_, TestOutput> = Terminal::new(TestOutput::new(), &[]);
    for line in [&b"a"[..], b"b", b"c", b"d"] {
        feed(&mut t, line);
        feed(&mut t, b"\r");
    }

    let entries: Vec<&str> = t.history().iter().map(|r| r.as_str()).collect();
    assert_eq!(entries, ["b", "c", "d"]);
}

// Scenario: backspace in the middle of the line
#[test]
fn test_backspace_mid_line_render() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"test");
    feed(&mut t, KEY_LEFT);
    feed(&mut t, KEY_LEFT);
    t.sink_mut().take();

    feed(&mut t, b"\x7F");

    assert_eq!(t.line().as_str(), "tst");
    assert_eq!(t.cursor(), 1);
    assert_eq!(t.sink().buf, cat(&[b"\x7F", SAVE, b"st ", RESTORE]));
}

#[test]
fn test_backspace_at_start_is_silent() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"ab");
    feed(&mut t, KEY_HOME);
    t.sink_mut().take();

    feed(&mut t, b"\x08");

    assert_eq!(t.line().as_str(), "ab");
    assert!(t.sink().buf.is_empty());
}

// Scenario: unknown escape sequence becomes text
#[test]
fn test_unknown_escape_inserted_as_text() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"\x1B[Z");

    assert_eq!(t.line().as_str(), "?[Z");
    assert_eq!(t.cursor(), 3);
    assert_eq!(t.sink().buf, b"?[Z");
    assert!(!t.escape_pending());
}

#[test]
fn test_unknown_control_byte_inserted_as_question_mark() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"a\x03b");
    assert_eq!(t.line().as_str(), "a?b");
}

#[test]
fn test_insert_mid_line_render() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"hlp");
    feed(&mut t, KEY_LEFT);
    feed(&mut t, KEY_LEFT);
    t.sink_mut().take();

    feed(&mut t, b"e");

    assert_eq!(t.line().as_str(), "help");
    assert_eq!(t.cursor(), 2);
    assert_eq!(t.sink().buf, cat(&[b"e", SAVE, b"lp", RESTORE]));
}

#[test]
fn test_delete_forward_render() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"abc");
    feed(&mut t, KEY_HOME);
    t.sink_mut().take();

    feed(&mut t, KEY_DELETE);

    assert_eq!(t.line().as_str(), "bc");
    assert_eq!(t.cursor(), 0);
    assert_eq!(t.sink().buf, cat(&[SAVE, b"bc ", RESTORE]));

    t.sink_mut().take();
    feed(&mut t, KEY_END);
    feed(&mut t, KEY_DELETE);
    assert_eq!(t.line().as_str(), "bc");
    assert_eq!(t.sink().buf, cat(&[RIGHT, RIGHT]));
}

#[test]
fn test_cursor_movement_render() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"abc");
    t.sink_mut().take();

    feed(&mut t, KEY_RIGHT); // already at end
    feed(&mut t, KEY_HOME);
    feed(&mut t, KEY_LEFT); // already at start
    feed(&mut t, KEY_RIGHT);

    assert_eq!(t.cursor(), 1);
    assert_eq!(t.sink().buf, cat(&[LEFT, LEFT, LEFT, RIGHT]));
}

#[test]
fn test_history_recall_render() {
    let mut t: Terminal<'_, TestOutput> = Terminal::new(TestOutput::new(), &[]);
    feed(&mut t, b"ls\r");
    feed(&mut t, b"status\r");
    feed(&mut t, b"abcdefgh");
    feed(&mut t, KEY_LEFT);
    t.sink_mut().take();

    // Up: back to line start, draw "status", blank the 2 stale cells
    feed(&mut t, UP);
    assert_eq!(t.line().as_str(), "status");
    assert_eq!(t.cursor(), 6);
    let mut expected = LEFT.repeat(7);
    expected.extend_from_slice(&cat(&[b"status", SAVE, b"  ", RESTORE]));
    assert_eq!(t.sink().buf, expected);

    t.sink_mut().take();
    feed(&mut t, UP);
    assert_eq!(t.line().as_str(), "ls");
    let mut expected = LEFT.repeat(6);
    expected.extend_from_slice(&cat(&[b"ls", SAVE, b"    ", RESTORE]));
    assert_eq!(t.sink().buf, expected);

    // Oldest reached
    t.sink_mut().take();
    feed(&mut t, UP);
    assert_eq!(t.line().as_str(), "ls");
    assert!(t.sink().buf.is_empty());
}

#[test]
fn test_history_down_returns_to_empty_line() {
    let mut t: Terminal<'_, TestOutput> = Terminal::new(TestOutput::new(), &[]);
    feed(&mut t, b"first\r");
    feed(&mut t, b"second\r");

    feed(&mut t, UP);
    feed(&mut t, UP);
    assert_eq!(t.line().as_str(), "first");

    feed(&mut t, DOWN);
    assert_eq!(t.line().as_str(), "second");

    t.sink_mut().take();
    feed(&mut t, DOWN);
    assert_eq!(t.line().as_str(), "");
    assert_eq!(t.cursor(), 0);
    let mut expected = LEFT.repeat(6);
    expected.extend_from_slice(&cat(&[SAVE, b"      ", RESTORE]));
    assert_eq!(t.sink().buf, expected);

    // Already at live edit
    t.sink_mut().take();
    feed(&mut t, DOWN);
    assert!(t.sink().buf.is_empty());
}

#[test]
fn test_recalled_line_can_be_accepted() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"help\r");
    feed(&mut t, UP);

    assert_eq!(t.process_byte(b'\n'), Some(Ok(())));
    assert_eq!(t.history().len(), 2);
}

#[test]
fn test_found_command_output_layout() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"help");
    t.sink_mut().take();

    assert_eq!(t.process_byte(b'\r'), Some(Ok(())));
    assert_eq!(t.sink().buf, cat(&[b"\r\n", b"ok", b"\r\n", GREETING.as_bytes()]));
}

#[test]
fn test_full_line_drops_input_but_keeps_control_keys() {
    let mut t: Terminal<'_, TestOutput, 8, 3> = Terminal::new(TestOutput::new(), HELP_ONLY);
    feed(&mut t, b"abcdefghij");

    assert_eq!(t.line().as_str(), "abcdefg");
    assert_eq!(t.sink().buf, b"abcdefg");

    feed(&mut t, b"\x7F");
    assert_eq!(t.line().as_str(), "abcdef");

    assert_eq!(t.process_byte(b'\r'), Some(Err(ConsoleError::UnknownCommand)));
    assert!(t.line().is_empty());
}

#[test]
fn test_detach_resets_everything() {
    let mut t = session(HELP_ONLY);
    feed(&mut t, b"one\r");
    feed(&mut t, b"two");
    feed(&mut t, b"\x1B[");
    assert!(t.escape_pending());

    t.detach();

    assert!(t.line().is_empty());
    assert_eq!(t.cursor(), 0);
    assert!(t.history().is_empty());
    assert!(!t.escape_pending());

    // Next byte is plain text again
    feed(&mut t, b"A");
    assert_eq!(t.line().as_str(), "A");
}

#[test]
fn test_custom_config_texts() {
    let config = TerminalConfig::new()
        .with_greeting("> ")
        .with_unknown_command(": not found");
    let mut t: Terminal<'_, TestOutput> = Terminal::with_config(TestOutput::new(), &[], config);

    t.attach();
    feed(&mut t, b"xyz\r");

    assert_eq!(t.config().greeting, "> ");
    assert_eq!(t.into_sink().buf, b"\r\n> xyz\r\nxyz: not found\r\n> ");
}

fn fixed_clock() -> i64 {
    7
}

#[test]
fn test_session_logging() {
    let stream: LogStream = LogStream::new();
    let mut t: Terminal<'_, TestOutput, 4, 3> =
        Terminal::new(TestOutput::new(), HELP_ONLY).with_log(LogTarget::new(&stream, fixed_clock));

    t.attach();
    feed(&mut t, b"abcd");
    feed(&mut t, b"\r");

    let attach = stream.drain().unwrap();
    assert_eq!(attach.level, LogLevel::Info);
    assert_eq!(attach.timestamp_us, 7);
    assert_eq!(attach.message(), b"attach");

    let dropped = stream.drain().unwrap();
    assert_eq!(dropped.level, LogLevel::Debug);
    assert_eq!(dropped.message(), b"line full, dropped 0x64");

    let unknown = stream.drain().unwrap();
    assert_eq!(unknown.message(), b"unknown command 'abc'");
    assert!(stream.drain().is_none());
}

#[test]
fn test_logs_stay_off_the_console_output() {
    let stream: LogStream = LogStream::new();
    let log = LogTarget::new(&stream, fixed_clock).with_max_level(LogLevel::Info);
    let mut t: Terminal<'_, TestOutput, 4, 3> =
        Terminal::new(TestOutput::new(), HELP_ONLY).with_log(log);
    let mut log_out = TestOutput::new();

    t.attach();
    for &b in b"abcd" {
        t.process_byte(b);
        drain_log_stream(&stream, &mut log_out);
    }

    // Console shows only the prompt and the echoed text
    assert_eq!(t.sink().buf, cat(&[b"\r\n", GREETING.as_bytes(), b"abc"]));

    // The full-line drop is Debug and filtered out
    assert_eq!(log_out.buf, b"[         7] INFO: attach\r\n");
}

/// Small deterministic generator for the invariant walk
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.0 >> 16
    }
}

#[test]
fn test_invariants_hold_for_random_input() {
    const ALPHABET: &[&[u8]] = &[
        b"a", b"b", b" ", b"\r", b"\x7F", b"\x08", b"\t", b"\x1B[A", b"\x1B[B", b"\x1B[C",
        b"\x1B[D", b"\x1B[1~", b"\x1B[4~", b"\x1B[3~", b"\x1B[", b"\x1B", b"\x03", b"Z",
    ];

    let mut rng = Lcg(0x5eed);
    let mut t: Terminal<'_, TestOutput, 16, 4> = Terminal::new(TestOutput::new(), H_COMMANDS);

    for _ in 0..5_000 {
        let key = ALPHABET[rng.next() as usize % ALPHABET.len()];
        feed(&mut t, key);

        assert!(t.cursor() <= t.line().len());
        assert!(t.line().len() < 16);
        assert!(t.history().len() <= 4);
        assert!(t.history().browse_position() <= t.history().len());
        assert!(t.history().iter().all(|r| !r.is_empty()));
        t.sink_mut().take();
    }
}
