//! Command table
//!
//! The table belongs to the application; the console only borrows it for
//! the lifetime of a session.

use super::parser::ParsedCommand;
use super::sink::Transmit;
use super::ConsoleError;

/// Handler signature. Output goes to the session's transmit sink.
pub type CommandHandler = fn(&ParsedCommand<'_>, &mut dyn Transmit) -> Result<(), ConsoleError>;

/// Command descriptor
#[derive(Clone, Copy)]
pub struct CommandDescriptor<'a> {
    pub name: &'a str,
    pub handler: CommandHandler,
}

impl<'a> CommandDescriptor<'a> {
    pub const fn new(name: &'a str, handler: CommandHandler) -> Self {
        Self { name, handler }
    }

    /// Length of the name in bytes
    pub fn name_len(&self) -> usize {
        self.name.len()
    }

    /// Exact match: same length, same bytes
    pub fn matches(&self, command: &[u8]) -> bool {
        self.name.as_bytes() == command
    }
}

impl core::fmt::Debug for CommandDescriptor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Find the descriptor whose name equals `command` exactly.
///
/// Prefixes never match here; they are only used by completion. An empty
/// `command` finds a descriptor with an empty name, if the table has one.
pub fn find_command<'t, 'a>(
    commands: &'t [CommandDescriptor<'a>],
    command: &[u8],
) -> Option<&'t CommandDescriptor<'a>> {
    commands.iter().find(|c| c.matches(command))
}

/// Get all command names
pub fn command_names<'t, 'a>(
    commands: &'t [CommandDescriptor<'a>],
) -> impl Iterator<Item = &'a str> + 't {
    commands.iter().map(|c| c.name)
}
