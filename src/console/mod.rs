//! Serial console line editor and command dispatcher
//!
//! Byte-at-a-time polling, no dedicated task.
//! Zero heap allocation - all fixed-size buffers.

pub mod commands;
pub mod completion;
pub mod error;
pub mod escape;
pub mod history;
pub mod line_buffer;
pub mod parser;
pub mod render;
pub mod sink;
pub mod terminal;

pub use commands::{command_names, find_command, CommandDescriptor, CommandHandler};
pub use completion::{complete, Completion};
pub use error::ConsoleError;
pub use escape::{EscapeAction, EscapeMatcher, Feed};
pub use history::History;
pub use line_buffer::{LineBuffer, LineRecord};
pub use parser::{parse_line, ParsedCommand};
pub use sink::{FnSink, SinkWriter, Transmit};
pub use terminal::Terminal;
