//! Command submission, dispatch and history recall.

use chimera_types::{LineStyle, NavOutcome};

use crate::App;
use crate::commands::{self, Resolution};
use crate::scheduler::{Action, TimelineKind};
use crate::script::{ESCALATION_DELAY, PROTOCOL_NOTICE};
use crate::session::Transition;

impl App {
    /// Handle Enter.
    ///
    /// Before boot completes the draft is discarded and nothing is dispatched.
    pub fn submit(&mut self) -> Option<Resolution> {
        if !self.session.is_boot_complete() {
            tracing::debug!("Input submitted before boot completed; discarding");
            self.draft.clear();
            return None;
        }
        let raw = self.draft.take_text();
        Some(self.dispatch(&raw))
    }

    /// Run one command line: echo, record, respond, then apply any stage
    /// transition it unlocks.
    pub fn dispatch(&mut self, raw: &str) -> Resolution {
        let command = commands::normalize(raw);
        self.log.print(format!("> {command}\n"), LineStyle::Plain);
        self.session.record(&command);

        let resolution = commands::resolve(&command);
        self.log
            .print(format!("{}\n\n", resolution.text()), LineStyle::Plain);
        self.draft.clear();

        tracing::info!(
            command = %command,
            known = resolution.is_known(),
            stage = self.session.stage().label(),
            "Command dispatched"
        );

        match self.session.evaluate(&command) {
            Some(Transition::Escalate) => {
                tracing::info!("Escalation armed");
                self.log.print(PROTOCOL_NOTICE, LineStyle::Glitch);
                self.scheduler.schedule_after(
                    ESCALATION_DELAY,
                    Action::StartTimeline(TimelineKind::Escalation),
                );
            }
            Some(Transition::Presence) => {
                self.start_timeline(TimelineKind::Presence);
            }
            None => {}
        }
        resolution
    }

    /// Arrow-Up: recall the previous command.
    pub fn history_up(&mut self) {
        let outcome = self.session.history_mut().navigate_up();
        self.apply_recall(outcome);
    }

    /// Arrow-Down: recall the next command, or clear past the newest.
    pub fn history_down(&mut self) {
        let outcome = self.session.history_mut().navigate_down();
        self.apply_recall(outcome);
    }

    fn apply_recall(&mut self, outcome: NavOutcome) {
        match outcome {
            NavOutcome::Moved(text) => self.draft.set_text(text),
            NavOutcome::AtBoundary => {}
            NavOutcome::Cleared => self.draft.clear(),
        }
    }
}
