//! Command history with Up/Down recall.

/// Result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Moved to an entry; the draft should show it.
    Moved(String),
    /// Already at the oldest entry; nothing changes.
    AtBoundary,
    /// Walked past the newest entry; the draft should be emptied.
    Cleared,
}

/// Previously submitted commands, oldest first.
///
/// The recall index always satisfies `0 <= index <= len`. `index == len` means
/// the user is editing a fresh line. Submitting resets the index to `len`.
#[derive(Debug, Default, Clone)]
pub struct CommandHistory {
    entries: Vec<String>,
    index: usize,
}

impl CommandHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command.
    ///
    /// A command identical to the most recent entry is not stored again.
    /// Either way the recall index moves to one past the end. Returns whether
    /// the entry was appended.
    pub fn push(&mut self, command: &str) -> bool {
        let inserted = if self.entries.last().is_some_and(|last| last == command) {
            false
        } else {
            self.entries.push(command.to_owned());
            true
        };
        self.index = self.entries.len();
        inserted
    }

    /// Step to the previous (older) entry.
    pub fn navigate_up(&mut self) -> NavOutcome {
        if self.index == 0 {
            return NavOutcome::AtBoundary;
        }
        self.index -= 1;
        NavOutcome::Moved(self.entries[self.index].clone())
    }

    /// Step to the next (newer) entry, or past the end.
    pub fn navigate_down(&mut self) -> NavOutcome {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            NavOutcome::Moved(self.entries[self.index].clone())
        } else {
            self.index = self.entries.len();
            NavOutcome::Cleared
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}
