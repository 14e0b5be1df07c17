//! Narrative session: stage, command history and the boot gate.

use chimera_types::{CommandHistory, Stage};

use crate::script::{CHIMERA_COMMAND, IDENTITY_COMMAND};

/// One-time scripted event unlocked by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Entered `Escalating`: announce the protocol and start the escalation.
    Escalate,
    /// Entered `Interaction`: the presence makes itself felt.
    Presence,
}

#[derive(Debug, Default)]
pub struct Session {
    stage: Stage,
    history: CommandHistory,
    boot_complete: bool,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    #[must_use]
    pub fn is_boot_complete(&self) -> bool {
        self.boot_complete
    }

    /// Open the command gate. Returns `false` if it was already open.
    pub fn complete_boot(&mut self) -> bool {
        !std::mem::replace(&mut self.boot_complete, true)
    }

    /// Record a normalized command in history.
    pub fn record(&mut self, command: &str) -> bool {
        self.history.push(command)
    }

    /// Apply the stage transition `command` unlocks, if any.
    ///
    /// Each transition fires at most once because the stage never moves back.
    pub fn evaluate(&mut self, command: &str) -> Option<Transition> {
        if command == CHIMERA_COMMAND {
            return self
                .stage
                .advance_to(Stage::Escalating)
                .then_some(Transition::Escalate);
        }
        if command == IDENTITY_COMMAND {
            return self
                .stage
                .advance_to(Stage::Interaction)
                .then_some(Transition::Presence);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chimera_escalates_once() {
        let mut session = Session::new();
        assert_eq!(
            session.evaluate("run project_chimera.exe"),
            Some(Transition::Escalate)
        );
        assert_eq!(session.stage(), Stage::Escalating);
        assert_eq!(session.evaluate("run project_chimera.exe"), None);
        assert_eq!(session.stage(), Stage::Escalating);
    }

    #[test]
    fn whoami_only_wakes_presence_before_interaction() {
        let mut session = Session::new();
        assert_eq!(session.evaluate("whoami"), Some(Transition::Presence));
        assert_eq!(session.stage(), Stage::Interaction);
        assert_eq!(session.evaluate("whoami"), None);

        let mut escalated = Session::new();
        escalated.evaluate("run project_chimera.exe");
        assert_eq!(escalated.evaluate("whoami"), None);
        assert_eq!(escalated.stage(), Stage::Escalating);
    }

    #[test]
    fn other_commands_leave_stage_alone() {
        let mut session = Session::new();
        for command in ["help", "ls", "ping", "exit", ""] {
            assert_eq!(session.evaluate(command), None);
        }
        assert_eq!(session.stage(), Stage::Boot);
    }

    #[test]
    fn boot_gate_opens_once() {
        let mut session = Session::new();
        assert!(!session.is_boot_complete());
        assert!(session.complete_boot());
        assert!(!session.complete_boot());
        assert!(session.is_boot_complete());
        assert_eq!(session.stage(), Stage::Boot);
    }
}
