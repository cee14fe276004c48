//! Tab completion
//!
//! Only an unambiguous prefix is completed. No cycling, no listing.

use super::commands::CommandDescriptor;

/// Outcome of a completion lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion<'a> {
    /// No command starts with the prefix
    NoMatch,
    /// Exactly one command; `suffix` is what is missing from the prefix
    Unique { name: &'a str, suffix: &'a [u8] },
    /// Several commands share the prefix
    Ambiguous(usize),
}

/// Look up commands whose name starts with `prefix`
pub fn complete<'a>(prefix: &[u8], commands: &[CommandDescriptor<'a>]) -> Completion<'a> {
    let mut found: Option<&'a str> = None;
    let mut count = 0;

    for c in commands {
        if c.name.as_bytes().starts_with(prefix) {
            found = Some(c.name);
            count += 1;
        }
    }

    match (count, found) {
        (1, Some(name)) => Completion::Unique {
            name,
            suffix: &name.as_bytes()[prefix.len()..],
        },
        (0, _) | (_, None) => Completion::NoMatch,
        (n, _) => Completion::Ambiguous(n),
    }
}
