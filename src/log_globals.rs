//! Global log stream instance.

use crate::logging::LogStream;

/// Log stream for the console session.
///
/// Producers: terminal sessions and command handlers.
/// Single consumer: the log drain in the main loop.
pub static CONSOLE_LOG_STREAM: LogStream = LogStream::new();
