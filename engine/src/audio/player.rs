//! Playback gate: tracks whether sound may play and hands clips to an output.

use std::fmt;

use tracing::{info, warn};

use super::Clip;

/// Whether the audio subsystem may currently produce sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Running,
    /// Waiting for the first user gesture.
    Suspended,
    /// No output device, or built without audio support.
    Unavailable,
}

impl AudioState {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Suspended => "suspended",
            Self::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(u64);

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("no audio output device: {0}")]
    Device(String),
    #[error("failed to start playback: {0}")]
    Start(String),
}

/// Something that can turn a decoded clip into sound.
pub trait AudioOutput {
    fn play(&mut self, clip: &Clip, looped: bool, volume: f32) -> Result<(), PlaybackError>;
}

pub struct AudioPlayer {
    output: Option<Box<dyn AudioOutput>>,
    state: AudioState,
    next_id: u64,
}

impl fmt::Debug for AudioPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPlayer")
            .field("has_output", &self.output.is_some())
            .field("state", &self.state)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl AudioPlayer {
    /// Without an output the player is permanently unavailable. With one it
    /// starts suspended unless `autoplay` is set.
    #[must_use]
    pub fn new(output: Option<Box<dyn AudioOutput>>, autoplay: bool) -> Self {
        let state = match (&output, autoplay) {
            (None, _) => AudioState::Unavailable,
            (Some(_), true) => AudioState::Running,
            (Some(_), false) => AudioState::Suspended,
        };
        Self {
            output,
            state,
            next_id: 0,
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(None, false)
    }

    #[must_use]
    pub fn state(&self) -> AudioState {
        self.state
    }

    /// Leave the suspended state. Returns `true` if this call resumed.
    pub fn resume(&mut self) -> bool {
        if self.state != AudioState::Suspended {
            return false;
        }
        self.state = AudioState::Running;
        info!("Audio resumed");
        true
    }

    /// Start playing `clip`. Absent clips and a non-running subsystem are
    /// logged and ignored.
    pub fn play(&mut self, clip: Option<&Clip>, looped: bool, volume: f32) -> Option<PlaybackId> {
        let Some(clip) = clip else {
            warn!("Attempted to play a sound that is not loaded");
            return None;
        };
        match self.state {
            AudioState::Running => {}
            AudioState::Suspended => {
                warn!("Audio is suspended; sound will not play until resumed by user interaction");
                return None;
            }
            AudioState::Unavailable => {
                warn!("Audio is unavailable; skipping sound");
                return None;
            }
        }
        let output = self.output.as_mut()?;

        let volume = volume.clamp(0.0, 1.0);
        match output.play(clip, looped, volume) {
            Ok(()) => {
                let id = PlaybackId(self.next_id);
                self.next_id += 1;
                info!(looped, volume, "Playing sound");
                Some(id)
            }
            Err(err) => {
                warn!("Playback failed: {err}");
                None
            }
        }
    }
}

#[cfg(feature = "audio")]
mod device {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    use super::{AudioOutput, Clip, PlaybackError};

    pub struct RodioOutput {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioOutput {
        pub fn open_default() -> Result<Self, PlaybackError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|err| PlaybackError::Device(err.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl AudioOutput for RodioOutput {
        fn play(&mut self, clip: &Clip, looped: bool, volume: f32) -> Result<(), PlaybackError> {
            let sink =
                Sink::try_new(&self.handle).map_err(|err| PlaybackError::Start(err.to_string()))?;
            sink.set_volume(volume);
            let buffer = SamplesBuffer::new(clip.channels(), clip.sample_rate(), clip.samples().to_vec());
            if looped {
                sink.append(buffer.repeat_infinite());
            } else {
                sink.append(buffer);
            }
            sink.detach();
            Ok(())
        }
    }
}

/// Open the system's default output device, if there is one.
#[must_use]
pub fn default_output() -> Option<Box<dyn AudioOutput>> {
    #[cfg(feature = "audio")]
    {
        match device::RodioOutput::open_default() {
            Ok(output) => Some(Box::new(output)),
            Err(err) => {
                warn!("Audio disabled: {err}");
                None
            }
        }
    }
    #[cfg(not(feature = "audio"))]
    {
        info!("Built without audio support; sounds are disabled");
        None
    }
}
