//! Core engine for Chimera: state machine and narrative orchestration.
//!
//! [`App`] owns all runtime state:
//!
//! - **Session**: stage, command history and the boot gate
//! - **Output log**: typewriter-revealed segments
//! - **Effects**: one-shot and persistent glitches per display region
//! - **Scheduler**: every pending timeline cue
//! - **Audio**: the playback gate and whichever clips finished loading
//!
//! # Time
//!
//! Nothing here reads the clock except [`App::tick`]. Everything else moves
//! through [`App::advance`], which fires due cues in order and ages reveals
//! and effects by exactly the elapsed virtual time. Tests drive `advance`
//! directly and stay deterministic.
//!
//! The TUI layer (`chimera_tui`) reads state from `App` and forwards input back
//! to it. No rendering logic lives in this crate.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use chimera_types::{CommandHistory, DraftInput, SoundId, Stage, UiOptions};

use crate::audio::{AudioEvent, AudioPlayer, AudioState, Clip};
use crate::glitch::GlitchEffects;
use crate::output::OutputLog;
use crate::scheduler::Scheduler;
use crate::session::Session;

mod actions;
mod dispatch;
mod init;


pub use init::AppSettings;

pub struct App {
    settings: AppSettings,
    session: Session,
    draft: DraftInput,
    log: OutputLog,
    effects: GlitchEffects,
    scheduler: Scheduler,
    audio: AudioPlayer,
    clips: HashMap<SoundId, Clip>,
    /// Open while background loads are still reporting.
    audio_events: Option<mpsc::UnboundedReceiver<AudioEvent>>,
    input_focused: bool,
    gesture_seen: bool,
    should_quit: bool,
    last_tick: Instant,
}

impl App {
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.settings.ui
    }

    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    #[must_use]
    pub fn is_boot_complete(&self) -> bool {
        self.session.is_boot_complete()
    }

    /// Whether the input line has focus (set when boot completes).
    #[must_use]
    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        self.session.history()
    }

    #[must_use]
    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftInput {
        &mut self.draft
    }

    #[must_use]
    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    #[must_use]
    pub fn effects(&self) -> &GlitchEffects {
        &self.effects
    }

    /// Virtual time since startup.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    #[must_use]
    pub fn pending_cues(&self) -> usize {
        self.scheduler.pending_count()
    }

    #[must_use]
    pub fn audio_state(&self) -> AudioState {
        self.audio.state()
    }

    #[must_use]
    pub fn has_clip(&self, sound: SoundId) -> bool {
        self.clips.contains_key(&sound)
    }

    /// Whether background sound loads are still outstanding.
    #[must_use]
    pub fn is_loading_sounds(&self) -> bool {
        self.audio_events.is_some()
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.log.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.log.scroll_down(lines);
    }

    /// Limit scrollback to what the renderer can show.
    pub fn clamp_scroll(&mut self, max_back: usize) {
        self.log.clamp_scroll(max_back);
    }

    /// Advance by the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;

        self.process_audio_events();
        self.advance(delta);
    }

    /// Advance virtual time by `delta`.
    ///
    /// Due cues fire in order. Before each one fires, reveals and effects are
    /// aged up to that cue's due time, so output printed mid-step starts its
    /// reveal at the right moment.
    pub fn advance(&mut self, delta: Duration) {
        let target = self.scheduler.now().saturating_add(delta);
        let mut synced = self.scheduler.now();

        while let Some(action) = self.scheduler.pop_due(target) {
            let now = self.scheduler.now();
            self.advance_timers(now.saturating_sub(synced));
            synced = now;
            self.apply(action);
        }

        self.scheduler.advance_to(target);
        self.advance_timers(target.saturating_sub(synced));
    }

    fn advance_timers(&mut self, delta: Duration) {
        self.log.advance(delta);
        self.effects.advance(delta);
    }
}
