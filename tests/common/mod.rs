//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chimera_engine::audio::PlaybackError;
use chimera_engine::{App, AppSettings, AudioOutput, Clip};

/// Boot sequence length.
pub const BOOT: Duration = Duration::from_millis(9000);

/// Settings with instant reveals so transcripts can be read right away.
pub fn instant_settings() -> AppSettings {
    AppSettings {
        type_delay: Duration::ZERO,
        ..AppSettings::default()
    }
}

/// An app that has finished booting, without audio.
pub fn booted_app() -> App {
    let mut app = App::new(instant_settings(), None);
    app.start_boot();
    app.advance(BOOT);
    assert!(app.is_boot_complete(), "boot should complete at 9s");
    app
}

/// Everything printed after the first `skip` bytes of the log.
pub fn transcript_since(app: &App, skip: usize) -> String {
    app.log().full_text()[skip..].to_owned()
}

/// One recorded `play` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Played {
    pub frames: usize,
    pub looped: bool,
    pub volume: f32,
}

/// Audio output that records what it was asked to play.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    played: Arc<Mutex<Vec<Played>>>,
}

impl RecordingOutput {
    pub fn played(&self) -> Vec<Played> {
        self.played.lock().expect("recorder lock").clone()
    }
}

impl AudioOutput for RecordingOutput {
    fn play(&mut self, clip: &Clip, looped: bool, volume: f32) -> Result<(), PlaybackError> {
        let frames = clip.samples().len() / usize::from(clip.channels());
        self.played.lock().expect("recorder lock").push(Played {
            frames,
            looped,
            volume,
        });
        Ok(())
    }
}

/// A short silent clip.
pub fn silent_clip(frames: usize) -> Clip {
    Clip::new(1, 8_000, vec![0.0; frames])
}

/// Minimal 16-bit mono PCM WAV file.
pub fn wav_bytes(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

/// Serve `body` at `route` with the given status.
pub async fn mount_asset(server: &MockServer, route: &str, status: u16, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Pump audio events until the background loader is done.
pub async fn wait_for_sounds(app: &mut App) {
    for _ in 0..500 {
        app.process_audio_events();
        if !app.is_loading_sounds() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("sound loading did not finish");
}
