//! # RustTermSrv
//!
//! Line editor for a device's serial command interface.
//!
//! ## Architecture
//!
//! Bytes arrive one at a time from the transport and are fed to a
//! [`Terminal`] session:
//! - the escape matcher separates text from control keys
//! - the line buffer applies edits at the cursor
//! - the history ring recalls accepted lines
//! - the command table dispatches accepted lines to handlers
//!
//! Every edit is echoed with the control sequences needed to keep the remote
//! terminal in sync. Output leaves through an injected [`Transmit`] sink; the
//! library never touches hardware.

#![cfg_attr(not(test), no_std)]

pub mod commands;
pub mod config;
pub mod console;
pub mod log_globals;
pub mod logging;
pub mod uart_logger;

pub use config::{TerminalConfig, VERSION};
pub use console::{CommandDescriptor, ConsoleError, ParsedCommand, Terminal, Transmit};
pub use log_globals::CONSOLE_LOG_STREAM;
pub use logging::{LogLevel, LogStream, LogTarget};
