//! Command normalization and response lookup.

use std::borrow::Cow;

use crate::script::{COMMAND_TABLE, CommandEntry};

const CAT_PREFIX: &str = "cat ";
const RUN_PREFIX: &str = "run ";

/// Trim surrounding whitespace and lowercase. Idempotent.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Exact lookup of a normalized command.
#[must_use]
pub fn lookup(command: &str) -> Option<&'static CommandEntry> {
    COMMAND_TABLE.iter().find(|entry| entry.name == command)
}

/// How a normalized command was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Known(&'static CommandEntry),
    MissingFile(String),
    MissingProgram(String),
    Unrecognized(String),
}

impl Resolution {
    /// The response line shown to the player.
    #[must_use]
    pub fn text(&self) -> Cow<'static, str> {
        match self {
            Self::Known(entry) => Cow::Borrowed(entry.response),
            Self::MissingFile(file) => Cow::Owned(format!("Error: File '{file}' not found.")),
            Self::MissingProgram(program) => {
                Cow::Owned(format!("Error: Program '{program}' not found."))
            }
            Self::Unrecognized(command) => Cow::Owned(format!(
                "Error: Command not recognized: '{command}'. Type 'help' for assistance."
            )),
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Resolve a normalized command to its response.
///
/// Exact table entries win. Otherwise `cat ` and `run ` name their argument in
/// a not-found message, and anything else is reported as unrecognized.
#[must_use]
pub fn resolve(command: &str) -> Resolution {
    if let Some(entry) = lookup(command) {
        return Resolution::Known(entry);
    }
    if let Some(file) = command.strip_prefix(CAT_PREFIX) {
        return Resolution::MissingFile(file.to_owned());
    }
    if let Some(program) = command.strip_prefix(RUN_PREFIX) {
        return Resolution::MissingProgram(program.to_owned());
    }
    Resolution::Unrecognized(command.to_owned())
}
