//! Application initialization.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chimera_types::{DraftInput, SoundId, UiOptions};

use crate::App;
use crate::audio::{AudioOutput, AudioPlayer};
use crate::config::{self, ChimeraConfig, ConfigError};
use crate::glitch::GlitchEffects;
use crate::output::OutputLog;
use crate::scheduler::Scheduler;
use crate::session::Session;

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub ui: UiOptions,
    /// Delay between revealed characters. Zero reveals instantly.
    pub type_delay: Duration,
    pub audio_enabled: bool,
    pub audio_autoplay: bool,
    /// Asset locator per sound, in load order.
    pub sounds: Vec<(SoundId, String)>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ui: UiOptions::default(),
            type_delay: Duration::from_millis(config::DEFAULT_TYPE_DELAY_MS),
            audio_enabled: true,
            audio_autoplay: false,
            sounds: vec![
                (SoundId::Ambient, config::DEFAULT_AMBIENT_SOUND.to_owned()),
                (SoundId::Jumpscare, config::DEFAULT_JUMPSCARE_SOUND.to_owned()),
            ],
        }
    }
}

impl AppSettings {
    #[must_use]
    pub fn from_config(config: &ChimeraConfig) -> Self {
        let ui = config.ui_options();
        let type_delay = if ui.reduced_motion {
            Duration::ZERO
        } else {
            config.type_delay()
        };
        Self {
            ui,
            type_delay,
            audio_enabled: config.audio_enabled(),
            audio_autoplay: config.audio_autoplay(),
            sounds: SoundId::ALL
                .iter()
                .map(|&sound| (sound, config.sound_locator(sound)))
                .collect(),
        }
    }

    /// Settings from `~/.chimera/config.toml`. A missing or broken file falls
    /// back to defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::from_loaded(ChimeraConfig::load())
    }

    /// Settings from the outcome of a config load. A load error is logged
    /// once and replaced by defaults.
    #[must_use]
    pub fn from_loaded(loaded: Result<Option<ChimeraConfig>, ConfigError>) -> Self {
        let config = match loaded {
            Ok(Some(config)) => config,
            Ok(None) => ChimeraConfig::default(),
            Err(err) => {
                tracing::warn!(path = %err.path().display(), "Using default settings: {err}");
                ChimeraConfig::default()
            }
        };
        Self::from_config(&config)
    }
}

impl App {
    /// Build an app that plays sound through `output`.
    ///
    /// `output` is ignored when audio is disabled in the settings.
    #[must_use]
    pub fn new(settings: AppSettings, output: Option<Box<dyn AudioOutput>>) -> Self {
        let audio = if settings.audio_enabled {
            AudioPlayer::new(output, settings.audio_autoplay)
        } else {
            tracing::info!("Audio disabled by configuration");
            AudioPlayer::unavailable()
        };
        tracing::debug!(audio = audio.state().label(), "Audio initialized");

        Self {
            log: OutputLog::new(settings.type_delay),
            settings,
            session: Session::new(),
            draft: DraftInput::default(),
            effects: GlitchEffects::new(),
            scheduler: Scheduler::new(),
            audio,
            clips: HashMap::new(),
            audio_events: None,
            input_focused: false,
            gesture_seen: false,
            should_quit: false,
            last_tick: Instant::now(),
        }
    }
}
