//! Applying scheduled actions and audio side effects.

use chimera_types::SoundId;
use tokio::sync::mpsc::error::TryRecvError;

use crate::App;
use crate::audio::{self, AudioEvent, AudioState, Clip};
use crate::scheduler::{Action, TimelineId, TimelineKind};
use crate::script;

impl App {
    /// Schedule the boot sequence from the current moment.
    pub fn start_boot(&mut self) -> TimelineId {
        self.start_timeline(TimelineKind::Boot)
    }

    pub(crate) fn start_timeline(&mut self, kind: TimelineKind) -> TimelineId {
        let id = self.scheduler.schedule(script::timeline(kind));
        tracing::debug!(?kind, at_ms = self.scheduler.now().as_millis() as u64, "Timeline started");
        id
    }

    /// Drop every pending cue of a timeline.
    pub fn cancel_timeline(&mut self, timeline: TimelineId) -> usize {
        let dropped = self.scheduler.cancel(timeline);
        tracing::debug!(dropped, "Timeline cancelled");
        dropped
    }

    pub(super) fn apply(&mut self, action: Action) {
        match action {
            Action::Print { text, style } => self.log.print(text, style),
            Action::Glitch {
                target,
                effect,
                duration,
            } => self.effects.apply(target, effect, duration),
            Action::StartPersistentGlitch {
                target,
                effect,
                interval,
                duration,
            } => {
                self.effects
                    .start_persistent(target, effect, interval, duration);
            }
            Action::StopPersistentGlitch { target } => {
                self.effects.stop_persistent(target);
            }
            Action::PlaySound {
                sound,
                looped,
                volume,
                resume_first,
            } => self.play_sound(sound, looped, volume, resume_first),
            Action::CompleteBoot => {
                if self.session.complete_boot() {
                    self.input_focused = true;
                    tracing::info!("Boot sequence complete");
                }
            }
            Action::StartTimeline(kind) => {
                self.start_timeline(kind);
            }
        }
    }

    fn play_sound(&mut self, sound: SoundId, looped: bool, volume: f32, resume_first: bool) {
        let clip = self.clips.get(&sound);
        if resume_first && clip.is_some() && self.audio.state() == AudioState::Suspended {
            tracing::info!("Resuming suspended audio before playback");
            self.audio.resume();
        }
        tracing::debug!(sound = sound.label(), "Sound cue");
        self.audio.play(clip, looped, volume);
    }

    /// Any key press counts as the user gesture that unlocks audio, once.
    pub fn note_user_gesture(&mut self) {
        if std::mem::replace(&mut self.gesture_seen, true) {
            return;
        }
        if self.audio.state() == AudioState::Suspended {
            tracing::info!("User interaction, attempting to resume audio");
            self.audio.resume();
        }
    }

    /// Load every configured sound in the background.
    ///
    /// Must be called inside a tokio runtime. Results are picked up by
    /// [`App::process_audio_events`].
    pub fn start_sound_loading(&mut self) {
        if self.audio.state() == AudioState::Unavailable {
            tracing::info!("Audio unavailable; not loading sounds");
            return;
        }
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        self.audio_events = Some(rx);
        tokio::spawn(audio::load_sounds(self.settings.sounds.clone(), tx));
    }

    /// Store clips that finished loading since the last call.
    pub fn process_audio_events(&mut self) {
        let Some(events) = self.audio_events.as_mut() else {
            return;
        };

        let mut received = Vec::new();
        let mut finished = false;
        loop {
            match events.try_recv() {
                Ok(event) => received.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }
        if finished {
            self.audio_events = None;
        }

        for AudioEvent { sound, result } in received {
            // Failures were already logged by the loader; the clip stays absent.
            if let Ok(clip) = result {
                self.set_clip(sound, clip);
            }
        }
    }

    pub fn set_clip(&mut self, sound: SoundId, clip: Clip) {
        self.clips.insert(sound, clip);
    }
}
