//! Visual glitch effects keyed by display region.
//!
//! One-shot effects stay active for a fixed duration. Persistent effects fire a
//! one-shot every interval until stopped. The registry holds at most one
//! persistent effect per target, so every running effect stays reachable and
//! can be cancelled on its own.

use std::collections::HashMap;
use std::time::Duration;

use chimera_types::{EffectKind, EffectTarget, EffectTimer};

/// Persistent effects never fire more often than this.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct OneShot {
    target: EffectTarget,
    effect: EffectKind,
    timer: EffectTimer,
}

#[derive(Debug, Clone)]
struct Persistent {
    effect: EffectKind,
    interval: Duration,
    duration: Duration,
    since_fire: Duration,
}

#[derive(Debug, Default)]
pub struct GlitchEffects {
    one_shots: Vec<OneShot>,
    persistent: HashMap<EffectTarget, Persistent>,
}

impl GlitchEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `effect` to `target` for `duration`.
    pub fn apply(&mut self, target: EffectTarget, effect: EffectKind, duration: Duration) {
        self.push_one_shot(target, effect, duration, Duration::ZERO);
    }

    fn push_one_shot(
        &mut self,
        target: EffectTarget,
        effect: EffectKind,
        duration: Duration,
        already_elapsed: Duration,
    ) {
        let mut timer = EffectTimer::new(duration);
        timer.advance(already_elapsed);
        if timer.is_finished() {
            return;
        }
        self.one_shots.push(OneShot {
            target,
            effect,
            timer,
        });
    }

    /// Re-apply `effect` to `target` every `interval` for `duration`.
    ///
    /// The first application happens one interval from now. Any persistent
    /// effect already running on `target` is stopped and returned.
    pub fn start_persistent(
        &mut self,
        target: EffectTarget,
        effect: EffectKind,
        interval: Duration,
        duration: Duration,
    ) -> Option<EffectKind> {
        let replaced = self.persistent.insert(
            target,
            Persistent {
                effect,
                interval: interval.max(MIN_INTERVAL),
                duration,
                since_fire: Duration::ZERO,
            },
        );
        if let Some(old) = &replaced {
            tracing::debug!(
                region = target.label(),
                old = old.effect.tag(),
                new = effect.tag(),
                "Replaced persistent glitch"
            );
        }
        replaced.map(|old| old.effect)
    }

    /// Stop the persistent effect on `target`. One-shots already applied run
    /// out on their own.
    pub fn stop_persistent(&mut self, target: EffectTarget) -> bool {
        self.persistent.remove(&target).is_some()
    }

    pub fn stop_all(&mut self) {
        self.persistent.clear();
    }

    pub fn advance(&mut self, delta: Duration) {
        for shot in &mut self.one_shots {
            shot.timer.advance(delta);
        }
        self.one_shots.retain(|shot| !shot.timer.is_finished());

        let mut fired = Vec::new();
        for (target, persistent) in &mut self.persistent {
            persistent.since_fire = persistent.since_fire.saturating_add(delta);
            while persistent.since_fire >= persistent.interval {
                persistent.since_fire -= persistent.interval;
                fired.push((
                    *target,
                    persistent.effect,
                    persistent.duration,
                    persistent.since_fire,
                ));
            }
        }
        for (target, effect, duration, elapsed) in fired {
            self.push_one_shot(target, effect, duration, elapsed);
        }
    }

    #[must_use]
    pub fn is_active(&self, target: EffectTarget, effect: EffectKind) -> bool {
        self.one_shots
            .iter()
            .any(|shot| shot.target == target && shot.effect == effect)
    }

    /// Progress (0.0 to 1.0) of the freshest matching one-shot.
    #[must_use]
    pub fn progress(&self, target: EffectTarget, effect: EffectKind) -> Option<f32> {
        self.one_shots
            .iter()
            .filter(|shot| shot.target == target && shot.effect == effect)
            .map(|shot| shot.timer.progress())
            .reduce(f32::min)
    }

    /// Effects currently visible on `target`, without duplicates.
    #[must_use]
    pub fn active(&self, target: EffectTarget) -> Vec<EffectKind> {
        let mut effects = Vec::new();
        for shot in self.one_shots.iter().filter(|shot| shot.target == target) {
            if !effects.contains(&shot.effect) {
                effects.push(shot.effect);
            }
        }
        effects
    }

    #[must_use]
    pub fn persistent(&self, target: EffectTarget) -> Option<EffectKind> {
        self.persistent.get(&target).map(|persistent| persistent.effect)
    }
}
