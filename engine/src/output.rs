//! Output log with per-segment typewriter reveal.
//!
//! Every `print` appends an independent segment. A segment reveals its first
//! character immediately and one more per tick; it completes one tick after its
//! last character, at which point the view snaps back to the bottom. Segments
//! never wait on each other, so overlapping prints interleave.

use std::time::Duration;

use chimera_types::LineStyle;

#[derive(Debug, Clone)]
pub struct Segment {
    text: String,
    style: LineStyle,
    char_count: usize,
    elapsed: Duration,
    revealed: usize,
    complete: bool,
}

impl Segment {
    fn new(text: String, style: LineStyle) -> Self {
        let char_count = text.chars().count();
        Self {
            text,
            style,
            char_count,
            elapsed: Duration::ZERO,
            revealed: char_count.min(1),
            complete: char_count == 0,
        }
    }

    /// Advance the reveal. Returns `true` when this call completed it.
    fn advance(&mut self, delta: Duration, tick: Duration) -> bool {
        if self.complete {
            return false;
        }
        if tick.is_zero() {
            self.revealed = self.char_count;
            self.complete = true;
            return true;
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        let ticks = (self.elapsed.as_nanos() / tick.as_nanos()) as usize;
        self.revealed = self.char_count.min(ticks.saturating_add(1));
        if ticks >= self.char_count {
            self.complete = true;
            return true;
        }
        false
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// The part of the text revealed so far.
    #[must_use]
    pub fn revealed_text(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map_or(self.text.len(), |(index, _)| index);
        &self.text[..end]
    }

    /// Whether the trailing cursor is still attached.
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        !self.complete
    }
}

#[derive(Debug)]
pub struct OutputLog {
    segments: Vec<Segment>,
    tick: Duration,
    /// Lines scrolled back from the bottom; zero follows new output.
    scroll_back: usize,
}

impl OutputLog {
    #[must_use]
    pub fn new(tick: Duration) -> Self {
        Self {
            segments: Vec::new(),
            tick,
            scroll_back: 0,
        }
    }

    pub fn print(&mut self, text: impl Into<String>, style: LineStyle) {
        let segment = Segment::new(text.into(), style);
        if !segment.is_revealing() {
            self.scroll_to_bottom();
        }
        self.segments.push(segment);
    }

    pub fn advance(&mut self, delta: Duration) {
        let mut completed = false;
        for segment in &mut self.segments {
            completed |= segment.advance(delta, self.tick);
        }
        if completed {
            self.scroll_to_bottom();
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.scroll_back = 0;
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.segments.iter().any(Segment::is_revealing)
    }

    /// Everything revealed so far, in order.
    #[must_use]
    pub fn transcript(&self) -> String {
        self.segments.iter().map(Segment::revealed_text).collect()
    }

    /// Everything printed, revealed or not.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    #[must_use]
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Clamp the scroll offset to what the renderer can actually show.
    pub fn clamp_scroll(&mut self, max_back: usize) {
        self.scroll_back = self.scroll_back.min(max_back);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }
}
