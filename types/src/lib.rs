//! Core domain types for the Chimera terminal.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod animation;
mod history;
mod input;
mod stage;

pub use animation::{EffectTimer, normalized_progress};
pub use history::{CommandHistory, NavOutcome};
pub use input::DraftInput;
pub use stage::Stage;

// ============================================================================
// Output styling
// ============================================================================

/// Style tag attached to a segment of terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Plain,
    /// Corrupted, alarming output (rendered in the alert color).
    Glitch,
}

// ============================================================================
// Visual effects
// ============================================================================

/// Display region a visual effect is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    /// The scrolling output log.
    Log,
    /// The outer screen frame.
    Screen,
}

impl EffectTarget {
    pub const ALL: [Self; 2] = [Self::Log, Self::Screen];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Screen => "screen",
        }
    }
}

/// Named visual effect. Rendering semantics belong to the TUI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    GlitchText,
    ScreenFlicker,
    ColorInvert,
}

impl EffectKind {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::GlitchText => "glitch-text",
            Self::ScreenFlicker => "screen-flicker",
            Self::ColorInvert => "color-invert",
        }
    }
}

// ============================================================================
// Audio
// ============================================================================

/// The two sound assets the narrative uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Ambient,
    Jumpscare,
}

impl SoundId {
    pub const ALL: [Self; 2] = [Self::Ambient, Self::Jumpscare];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::Jumpscare => "jumpscare",
        }
    }
}

// ============================================================================
// UI options
// ============================================================================

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for the cursor and frame decorations.
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    pub high_contrast: bool,
    /// Reveal text instantly and skip character corruption.
    pub reduced_motion: bool,
}
