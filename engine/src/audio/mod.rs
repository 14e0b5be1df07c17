//! Sound assets: loading, decoding and playback.
//!
//! Audio never blocks the narrative. A clip that fails to load is simply
//! absent, and playing an absent clip (or playing while the subsystem is
//! suspended or unavailable) is a logged no-op.

mod loader;
mod player;

pub use loader::{LoadError, decode_clip, load_clip, load_sounds};
pub use player::{AudioOutput, AudioPlayer, AudioState, PlaybackError, PlaybackId, default_output};

use std::sync::Arc;
use std::time::Duration;

use chimera_types::SoundId;

/// A decoded, playable sound buffer.
#[derive(Debug, Clone)]
pub struct Clip {
    channels: u16,
    sample_rate: u32,
    samples: Arc<[f32]>,
}

impl Clip {
    #[must_use]
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            channels: channels.max(1),
            sample_rate,
            samples: samples.into(),
        }
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Interleaved samples.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() / usize::from(self.channels);
        Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate))
    }
}

/// Completion report from the background loader.
#[derive(Debug)]
pub struct AudioEvent {
    pub sound: SoundId,
    pub result: Result<Clip, LoadError>,
}
