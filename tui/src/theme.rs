//! Color theme and glyphs for the Chimera TUI.
//!
//! Uses a green-phosphor CRT palette by default with an optional high-contrast
//! override.

use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border;
use ratatui::widgets::{Block, BorderType, Borders};

use chimera_types::UiOptions;

/// Phosphor CRT color palette constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_SCREEN: Color = Color::Rgb(8, 12, 8); // tube black
    pub const BG_FRAME: Color = Color::Rgb(18, 24, 18); // bezel
    pub const BG_INPUT: Color = Color::Rgb(12, 20, 12);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(51, 255, 51); // P1 phosphor
    pub const TEXT_DIM: Color = Color::Rgb(26, 140, 26); // afterglow
    pub const TEXT_MUTED: Color = Color::Rgb(60, 90, 60);

    // === Accents ===
    pub const AMBER: Color = Color::Rgb(255, 176, 0);
    pub const RED: Color = Color::Rgb(255, 42, 42); // glitch alert
    pub const BORDER: Color = Color::Rgb(34, 102, 34);

    // === Semantic Aliases ===
    pub const ALERT: Color = RED;
    pub const ACCENT: Color = AMBER;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_screen: Color,
    pub bg_frame: Color,
    pub bg_input: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub alert: Color,
    pub accent: Color,
    pub border: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_screen: colors::BG_SCREEN,
            bg_frame: colors::BG_FRAME,
            bg_input: colors::BG_INPUT,
            text_primary: colors::TEXT_PRIMARY,
            text_dim: colors::TEXT_DIM,
            text_muted: colors::TEXT_MUTED,
            alert: colors::ALERT,
            accent: colors::ACCENT,
            border: colors::BORDER,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_screen: Color::Black,
            bg_frame: Color::Black,
            bg_input: Color::Black,
            text_primary: Color::White,
            text_dim: Color::Gray,
            text_muted: Color::Gray,
            alert: Color::LightRed,
            accent: Color::Yellow,
            border: Color::White,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for the cursor and decorations.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    /// Trails text that is still being typed out.
    pub cursor: &'static str,
    pub prompt: &'static str,
    pub separator: &'static str,
    pub audio_on: &'static str,
    pub audio_off: &'static str,
    /// Replacement characters used by the glitch-text effect.
    pub corruption: &'static [char],
}

const CORRUPTION: &[char] = &['█', '▓', '▒', '░', '¥', 'Ø', '§', '¿', 'Ж', '∆', '≠', '#'];
const CORRUPTION_ASCII: &[char] = &['#', '%', '@', '&', '$', '?', '!', '*', '=', '~'];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            cursor: "_",
            prompt: ">",
            separator: "|",
            audio_on: "snd",
            audio_off: "---",
            corruption: CORRUPTION_ASCII,
        }
    } else {
        Glyphs {
            cursor: "█",
            prompt: "›",
            separator: "│",
            audio_on: "♪",
            audio_off: "∅",
            corruption: CORRUPTION,
        }
    }
}

/// A fully bordered block: double lines, or `+-|` when `ascii_only` is set.
#[must_use]
pub fn bordered_block(options: UiOptions) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL);
    if options.ascii_only {
        block.border_set(border::Set {
            top_left: "+",
            top_right: "+",
            bottom_left: "+",
            bottom_right: "+",
            vertical_left: "|",
            vertical_right: "|",
            horizontal_top: "-",
            horizontal_bottom: "-",
        })
    } else {
        block.border_type(BorderType::Double)
    }
}

/// Cursor blink period in frames (8 ms each).
const BLINK_FRAMES: usize = 64;

/// Whether the input cursor is lit on frame `tick`.
///
/// When `reduced_motion` is enabled the cursor stays lit instead of blinking.
#[must_use]
pub fn cursor_visible(tick: usize, options: UiOptions) -> bool {
    options.reduced_motion || (tick / BLINK_FRAMES) % 2 == 0
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn output(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary).bg(palette.bg_screen)
    }

    #[must_use]
    pub fn glitch_line(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.alert)
            .bg(palette.bg_screen)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary)
    }

    #[must_use]
    pub fn prompt(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn frame_border(palette: &Palette) -> Style {
        Style::default().fg(palette.border).bg(palette.bg_frame)
    }

    #[must_use]
    pub fn status(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted).bg(palette.bg_frame)
    }

    #[must_use]
    pub fn stage_badge(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_screen)
            .bg(palette.text_dim)
            .add_modifier(Modifier::BOLD)
    }
}
