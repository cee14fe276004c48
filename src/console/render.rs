//! Render protocol
//!
//! The remote terminal cannot see the line buffer, so every mutation is
//! followed by the smallest byte sequence that brings its display back in
//! sync. Movement is always relative, one cell per control sequence.

use super::sink::Transmit;

/// Save terminal cursor position
pub const CURSOR_SAVE: &[u8] = b"\x1B[s";
/// Restore terminal cursor position
pub const CURSOR_RESTORE: &[u8] = b"\x1B[u";
/// Move terminal cursor one cell left
pub const CURSOR_LEFT: &[u8] = b"\x1B[D";
/// Move terminal cursor one cell right
pub const CURSOR_RIGHT: &[u8] = b"\x1B[C";
/// Line terminator
pub const CRLF: &[u8] = b"\r\n";
/// Echo for an erased character
pub const DEL: &[u8] = b"\x7F";

/// Raw echo
pub fn echo(out: &mut dyn Transmit, bytes: &[u8]) {
    if !bytes.is_empty() {
        out.send(bytes);
    }
}

/// Send CRLF
pub fn newline(out: &mut dyn Transmit) {
    out.send(CRLF);
}

/// Move the terminal cursor `cells` to the left
pub fn cursor_left(out: &mut dyn Transmit, cells: usize) {
    for _ in 0..cells {
        out.send(CURSOR_LEFT);
    }
}

/// Move the terminal cursor `cells` to the right
pub fn cursor_right(out: &mut dyn Transmit, cells: usize) {
    for _ in 0..cells {
        out.send(CURSOR_RIGHT);
    }
}

/// Redraw a shifted tail without moving the terminal cursor.
///
/// `padding` spaces follow the tail to blank characters left behind when
/// the line got shorter.
pub fn redraw_tail(out: &mut dyn Transmit, tail: &[u8], padding: usize) {
    out.send(CURSOR_SAVE);
    echo(out, tail);
    spaces(out, padding);
    out.send(CURSOR_RESTORE);
}

/// Blank `cells` stale characters right of the terminal cursor
pub fn blank(out: &mut dyn Transmit, cells: usize) {
    if cells == 0 {
        return;
    }
    out.send(CURSOR_SAVE);
    spaces(out, cells);
    out.send(CURSOR_RESTORE);
}

fn spaces(out: &mut dyn Transmit, count: usize) {
    for _ in 0..count {
        out.send(b" ");
    }
}
