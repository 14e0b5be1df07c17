//! Declarative timelines and the single scheduler that drives them.
//!
//! A timeline is a list of [`Cue`]s whose offsets are relative to the moment
//! the timeline starts. Cues are independent: a later cue never waits for an
//! earlier one to finish. The scheduler owns a virtual clock that only moves
//! when the caller advances it, which keeps every timeline deterministic.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use chimera_types::{EffectKind, EffectTarget, LineStyle, SoundId};

/// Named scripted sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    /// Startup output ending with the boot-complete flag.
    Boot,
    /// The identity reveal that follows the first `whoami`.
    Presence,
    /// The horror escalation that follows running the chimera program.
    Escalation,
}

/// One side effect a cue performs when it comes due.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Print {
        text: &'static str,
        style: LineStyle,
    },
    Glitch {
        target: EffectTarget,
        effect: EffectKind,
        duration: Duration,
    },
    StartPersistentGlitch {
        target: EffectTarget,
        effect: EffectKind,
        interval: Duration,
        duration: Duration,
    },
    StopPersistentGlitch {
        target: EffectTarget,
    },
    PlaySound {
        sound: SoundId,
        looped: bool,
        volume: f32,
        /// Resume a suspended audio subsystem before playing.
        resume_first: bool,
    },
    /// Unlock command dispatch and focus the input line.
    CompleteBoot,
    StartTimeline(TimelineKind),
}

/// An action and its offset from timeline start.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub at: Duration,
    pub action: Action,
}

impl Cue {
    #[must_use]
    pub const fn new(at: Duration, action: Action) -> Self {
        Self { at, action }
    }
}

/// Handle to every cue scheduled by one `schedule` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineId(u64);

#[derive(Debug)]
struct Pending {
    due: Duration,
    seq: u64,
    timeline: TimelineId,
    action: Action,
}

impl Pending {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.seq)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Single owner of all pending cues.
///
/// Cues fire in `(due time, insertion order)` order.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    next_timeline: u64,
    pending: BinaryHeap<Reverse<Pending>>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a timeline starting now.
    pub fn schedule(&mut self, cues: impl IntoIterator<Item = Cue>) -> TimelineId {
        let timeline = TimelineId(self.next_timeline);
        self.next_timeline += 1;

        for cue in cues {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.pending.push(Reverse(Pending {
                due: self.now.saturating_add(cue.at),
                seq,
                timeline,
                action: cue.action,
            }));
        }
        timeline
    }

    /// Schedule a single action after `delay`.
    pub fn schedule_after(&mut self, delay: Duration, action: Action) -> TimelineId {
        self.schedule([Cue::new(delay, action)])
    }

    /// Drop every pending cue of a timeline. Returns how many were dropped.
    pub fn cancel(&mut self, timeline: TimelineId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|Reverse(p)| p.timeline != timeline);
        before - self.pending.len()
    }

    /// Pop the earliest cue due at or before `until`, moving the clock to its
    /// due time.
    ///
    /// Cues scheduled while draining (for example by a `StartTimeline`
    /// action) are measured from the firing cue's due time, and fire in the
    /// same drain when they fall inside `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Action> {
        let due = self.pending.peek().map(|Reverse(p)| p.due)?;
        if due > until {
            return None;
        }
        let Reverse(pending) = self.pending.pop()?;
        self.now = self.now.max(pending.due);
        Some(pending.action)
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers drain with [`Scheduler::pop_due`] first; the clock never moves
    /// backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance by `delta`, returning every action that came due in order.
    pub fn advance(&mut self, delta: Duration) -> Vec<Action> {
        let until = self.now.saturating_add(delta);
        let mut fired = Vec::new();
        while let Some(action) = self.pop_due(until) {
            fired.push(action);
        }
        self.advance_to(until);
        fired
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, timeline: TimelineId) -> bool {
        self.pending.iter().any(|Reverse(p)| p.timeline == timeline)
    }
}
