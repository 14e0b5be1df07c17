//! TUI rendering for Chimera using ratatui.

mod effects;
mod input;
mod theme;

pub use effects::{color_invert, glitch_seed, glitch_text, screen_flicker};
pub use input::{InputPump, SCROLL_PAGE_LINES, apply_event, handle_events};
pub use theme::{Glyphs, Palette, bordered_block, cursor_visible, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use chimera_engine::{App, AudioState, EffectKind, EffectTarget, LineStyle, OutputLog};

/// Frame cadence the cursor blink is measured in.
const FRAME_MS: u64 = 8;
/// Glitch-text picks new cells this often.
const GLITCH_RESEED_MS: u64 = 40;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let screen = bordered_block(options)
        .border_style(styles::frame_border(&palette))
        .title(" CHIMERA OS ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(palette.bg_screen));
    let screen_area = frame.area();
    let inner = screen.inner(screen_area);
    frame.render_widget(screen, screen_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Output log
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(inner);

    draw_log(frame, app, chunks[0], &palette, &glyphs);
    draw_input(frame, app, chunks[1], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);

    apply_screen_effects(frame, app, screen_area, &palette);
}

fn draw_log(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let lines = log_lines(app.log(), palette, glyphs);

    let total_lines = wrapped_line_count(&lines, area.width);
    let max_back = total_lines.saturating_sub(usize::from(area.height));
    app.clamp_scroll(max_back);
    let scroll_offset = u16::try_from(max_back - app.log().scroll_back()).unwrap_or(u16::MAX);

    let log = Paragraph::new(lines)
        .style(styles::output(palette))
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset, 0));
    frame.render_widget(log, area);

    if app.effects().is_active(EffectTarget::Log, EffectKind::GlitchText) {
        let options = app.ui_options();
        let seed = glitch_seed(app.elapsed().as_millis() as u64, GLITCH_RESEED_MS);
        glitch_text(
            frame.buffer_mut(),
            area,
            seed,
            glyphs,
            palette,
            options.reduced_motion,
        );
    }
}

/// Lay the revealed part of every segment out as display lines.
///
/// Segments flow into each other; only `\n` starts a new line. A segment that
/// is still revealing is followed by the cursor glyph.
fn log_lines(log: &OutputLog, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for segment in log.segments() {
        let style = match segment.style() {
            LineStyle::Plain => styles::output(palette),
            LineStyle::Glitch => styles::glitch_line(palette),
        };
        let mut parts = segment.revealed_text().split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                current.push(Span::styled(part.to_owned(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
        if segment.is_revealing() {
            current.push(Span::styled(glyphs.cursor, styles::cursor(palette)));
        }
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// Rows the log occupies once word-wrapped exactly as it is drawn.
fn wrapped_line_count(lines: &[Line], width: u16) -> usize {
    if lines.is_empty() {
        return 0;
    }

    Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1))
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let focused = app.is_input_focused();
    let border_style = if focused {
        Style::default().fg(palette.text_dim)
    } else {
        Style::default().fg(palette.text_muted)
    };
    let block = bordered_block(app.ui_options())
        .border_style(border_style)
        .style(Style::default().bg(palette.bg_input));
    let inner = block.inner(area);

    let prompt = format!("{} ", glyphs.prompt);
    let draft = app.draft();
    let line = Line::from(vec![
        Span::styled(prompt.clone(), styles::prompt(palette)),
        Span::styled(draft.text().to_owned(), styles::output(palette)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    let tick = (app.elapsed().as_millis() as u64 / FRAME_MS) as usize;
    if focused && cursor_visible(tick, app.ui_options()) {
        let before_cursor: String = draft
            .text()
            .graphemes(true)
            .take(draft.cursor())
            .collect();
        let offset = (prompt.width() + before_cursor.width()) as u16;
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let audio = match app.audio_state() {
        AudioState::Running => glyphs.audio_on,
        AudioState::Suspended | AudioState::Unavailable => glyphs.audio_off,
    };
    let sep = Span::styled(format!(" {} ", glyphs.separator), styles::status(palette));
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.stage().label().to_uppercase()),
            styles::stage_badge(palette),
        ),
        sep.clone(),
        Span::styled(
            format!("{audio} {}", app.audio_state().label()),
            styles::status(palette),
        ),
        sep,
        Span::styled("PgUp/PgDn scroll  Ctrl+C quit", styles::status(palette)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(styles::status(palette)),
        area,
    );
}

fn apply_screen_effects(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let effects = app.effects();
    let reduced_motion = app.ui_options().reduced_motion;
    for effect in effects.active(EffectTarget::Screen) {
        match effect {
            EffectKind::ScreenFlicker => {
                let progress = effects
                    .progress(EffectTarget::Screen, EffectKind::ScreenFlicker)
                    .unwrap_or(0.0);
                screen_flicker(frame.buffer_mut(), area, progress, palette, reduced_motion);
            }
            EffectKind::ColorInvert => color_invert(frame.buffer_mut(), area),
            EffectKind::GlitchText => {
                let seed = glitch_seed(app.elapsed().as_millis() as u64, GLITCH_RESEED_MS);
                glitch_text(
                    frame.buffer_mut(),
                    area,
                    seed,
                    &glyphs(app.ui_options()),
                    palette,
                    reduced_motion,
                );
            }
        }
    }
}
