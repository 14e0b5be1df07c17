//! Glitch visuals applied to an already rendered frame buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::theme::{Glyphs, Palette};

/// Share of visible cells (in percent) replaced by glitch-text.
const CORRUPTION_PERCENT: u64 = 18;
/// Light/dark alternations over one flicker.
const FLICKER_PHASES: f32 = 6.0;

/// Corrupt and tint the visible characters in `area`.
///
/// Which cells are replaced depends only on `seed` and the cell position, so a
/// given seed always renders the same frame. With `reduced_motion` only the
/// tint is applied.
pub fn glitch_text(
    buf: &mut Buffer,
    area: Rect,
    seed: u64,
    glyphs: &Glyphs,
    palette: &Palette,
    reduced_motion: bool,
) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            if cell.symbol().trim().is_empty() {
                continue;
            }
            cell.set_fg(palette.alert);
            if reduced_motion || glyphs.corruption.is_empty() {
                continue;
            }
            let n = noise(seed, x, y);
            if n % 100 < CORRUPTION_PERCENT {
                let pick = (n / 100) as usize % glyphs.corruption.len();
                cell.set_char(glyphs.corruption[pick]);
            }
        }
    }
}

/// Dim or wash out the whole `area`, alternating with `progress` (0.0..=1.0).
pub fn screen_flicker(
    buf: &mut Buffer,
    area: Rect,
    progress: f32,
    palette: &Palette,
    reduced_motion: bool,
) {
    let phase = if reduced_motion {
        0
    } else {
        (progress.clamp(0.0, 1.0) * FLICKER_PHASES) as u32
    };
    let style = if phase % 2 == 0 {
        Style::default().fg(palette.text_dim)
    } else {
        Style::default()
            .bg(palette.bg_frame)
            .add_modifier(Modifier::BOLD)
    };
    buf.set_style(area, style);
}

/// Reverse foreground and background across `area`.
pub fn color_invert(buf: &mut Buffer, area: Rect) {
    buf.set_style(area, Style::default().add_modifier(Modifier::REVERSED));
}

/// Seed that changes every `period_ms` of virtual time.
#[must_use]
pub fn glitch_seed(elapsed_ms: u64, period_ms: u64) -> u64 {
    elapsed_ms / period_ms.max(1)
}

fn noise(seed: u64, x: u16, y: u16) -> u64 {
    // splitmix64 over the seed and packed position
    let mut z = seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((u64::from(y) << 16) | u64::from(x));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
