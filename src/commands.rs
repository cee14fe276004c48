//! Stock command handlers
//!
//! Handlers that need nothing from the device. The binary registers them
//! next to its own `help` and `reboot`.

use crate::config::VERSION;
use crate::console::{ConsoleError, ParsedCommand, Transmit};

/// Upper bound for `repeat`
pub const MAX_REPEAT: u8 = 8;

/// `version`: build identification
pub fn cmd_version(_cmd: &ParsedCommand<'_>, out: &mut dyn Transmit) -> Result<(), ConsoleError> {
    out.send_str(VERSION);
    Ok(())
}

/// `echo <text>`: send the text back unchanged
pub fn cmd_echo(cmd: &ParsedCommand<'_>, out: &mut dyn Transmit) -> Result<(), ConsoleError> {
    if cmd.rest.is_empty() {
        return Err(ConsoleError::MissingArg);
    }
    out.send(cmd.rest);
    Ok(())
}

/// `repeat <count> <word>`: send the word `count` times, space separated
pub fn cmd_repeat(cmd: &ParsedCommand<'_>, out: &mut dyn Transmit) -> Result<(), ConsoleError> {
    let count: u8 = cmd
        .arg(0)
        .ok_or(ConsoleError::MissingArg)?
        .parse()
        .map_err(|_| ConsoleError::InvalidValue)?;
    let text = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;
    if count == 0 || count > MAX_REPEAT {
        return Err(ConsoleError::OutOfRange);
    }

    for i in 0..count {
        if i > 0 {
            out.send_str(" ");
        }
        out.send_str(text);
    }
    Ok(())
}
