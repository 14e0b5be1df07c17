//! Fetch and decode sound assets.

use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use chimera_types::SoundId;

use super::{AudioEvent, Clip};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request for {locator} failed: {source}")]
    Request {
        locator: String,
        source: reqwest::Error,
    },
    #[error("HTTP error! Status: {status} for {locator}")]
    Status { locator: String, status: u16 },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {locator}: {reason}")]
    Decode { locator: String, reason: String },
}

fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

async fn fetch_bytes(locator: &str) -> Result<Vec<u8>, LoadError> {
    if !is_remote(locator) {
        return tokio::fs::read(locator)
            .await
            .map_err(|source| LoadError::Read {
                path: PathBuf::from(locator),
                source,
            });
    }

    let request_error = |source| LoadError::Request {
        locator: locator.to_owned(),
        source,
    };
    let response = reqwest::get(locator).await.map_err(request_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            locator: locator.to_owned(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().await.map_err(request_error)?;
    Ok(bytes.to_vec())
}

/// Decode an encoded asset (mp3/wav) into interleaved `f32` samples.
///
/// The locator's extension is only a hint; the container is probed from the
/// bytes themselves.
pub fn decode_clip(locator: &str, bytes: Vec<u8>) -> Result<Clip, LoadError> {
    let decode_error = |reason: String| LoadError::Decode {
        locator: locator.to_owned(),
        reason,
    };

    let mut hint = Hint::new();
    if let Some(extension) = Path::new(locator).extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }
    let source = MediaSourceStream::new(Box::new(Cursor::new(bytes)), MediaSourceStreamOptions::default());
    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| decode_error(err.to_string()))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decode_error("no audio track".to_owned()))?;
    let track_id = track.id;
    let params = track.codec_params.clone();
    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|err| decode_error(err.to_string()))?;

    let mut channels = params.channels.map_or(1, |channels| channels.count() as u16);
    let mut sample_rate = params.sample_rate.unwrap_or(0);
    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(decode_error(err.to_string())),
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                channels = spec.channels.count() as u16;
                sample_rate = spec.rate;
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            // A corrupt frame is skipped; the rest of the stream may still play.
            Err(SymphoniaError::DecodeError(reason)) => {
                debug!(locator = %locator, "Skipping undecodable frame: {reason}");
            }
            Err(err) => return Err(decode_error(err.to_string())),
        }
    }

    if samples.is_empty() {
        return Err(decode_error("no audio frames".to_owned()));
    }
    Ok(Clip::new(channels, sample_rate, samples))
}

/// Fetch `locator` (an `http(s)://` URL or a filesystem path) and decode it.
///
/// Decoding runs on the blocking pool.
pub async fn load_clip(locator: &str) -> Result<Clip, LoadError> {
    info!(locator = %locator, "Attempting to load sound");
    let bytes = fetch_bytes(locator).await?;

    let owned = locator.to_owned();
    match tokio::task::spawn_blocking(move || decode_clip(&owned, bytes)).await {
        Ok(result) => result,
        Err(err) => Err(LoadError::Decode {
            locator: locator.to_owned(),
            reason: err.to_string(),
        }),
    }
}

/// Load each sound in order and report every outcome on `events`.
///
/// Failures are logged and reported, never fatal. Stops early once the
/// receiver is gone.
pub async fn load_sounds(sounds: Vec<(SoundId, String)>, events: mpsc::UnboundedSender<AudioEvent>) {
    for (sound, locator) in sounds {
        let result = load_clip(&locator).await;
        match &result {
            Ok(clip) => info!(
                sound = sound.label(),
                locator = %locator,
                duration_ms = clip.duration().as_millis() as u64,
                "Sound loaded"
            ),
            Err(err) => warn!(sound = sound.label(), "Failed to load sound: {err}"),
        }
        if events.send(AudioEvent { sound, result }).is_err() {
            break;
        }
    }
}
