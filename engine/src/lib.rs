//! Core engine for Chimera: command dispatch, narrative timelines and effect
//! state.
//!
//! This crate contains the [`App`] state machine without TUI dependencies.

// Re-export from crates for public API
pub use chimera_types::{
    CommandHistory, DraftInput, EffectKind, EffectTarget, LineStyle, NavOutcome, SoundId, Stage,
    UiOptions,
};

mod app;
pub use app::{App, AppSettings};

pub mod audio;
pub use audio::{AudioEvent, AudioOutput, AudioPlayer, AudioState, Clip, LoadError};

// Config types - loaded by the caller
mod config;
pub use config::{
    AppConfig, AudioConfig, ChimeraConfig, ConfigError, TerminalConfig, config_path,
    expand_env_vars,
};

pub mod commands;
pub use commands::{Resolution, normalize, resolve};

mod glitch;
pub use glitch::GlitchEffects;

mod output;
pub use output::{OutputLog, Segment};

pub mod scheduler;
pub use scheduler::{Action, Cue, Scheduler, TimelineId, TimelineKind};

pub mod script;
pub use script::CommandEntry;

mod session;
pub use session::{Session, Transition};
