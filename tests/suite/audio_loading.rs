//! Background sound loading from disk and over HTTP.

use chimera_engine::audio::load_clip;
use chimera_engine::{App, AppSettings, AudioState, LoadError, SoundId};
use tempfile::tempdir;
use wiremock::MockServer;

use crate::common::{RecordingOutput, mount_asset, wait_for_sounds, wav_bytes};

#[tokio::test]
async fn missing_file_reports_read_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ambient_static.mp3");

    let err = load_clip(&path.to_string_lossy())
        .await
        .expect_err("file is missing");
    assert!(matches!(err, LoadError::Read { .. }), "{err}");
}

#[tokio::test]
async fn http_error_status_is_a_failure() {
    let server = MockServer::start().await;
    mount_asset(&server, "/jumpscare_scream.mp3", 404, Vec::new()).await;

    let url = format!("{}/jumpscare_scream.mp3", server.uri());
    let err = load_clip(&url).await.expect_err("404 must fail");
    match err {
        LoadError::Status { status, locator } => {
            assert_eq!(status, 404);
            assert_eq!(locator, url);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_failure() {
    let server = MockServer::start().await;
    mount_asset(&server, "/noise.mp3", 200, b"<html>not audio</html>".to_vec()).await;

    let err = load_clip(&format!("{}/noise.mp3", server.uri()))
        .await
        .expect_err("html is not audio");
    assert!(matches!(err, LoadError::Decode { .. }), "{err}");
}

#[tokio::test]
async fn wav_asset_decodes_over_http() {
    let server = MockServer::start().await;
    let samples: Vec<i16> = (0..800).map(|i| ((i % 40) * 500) as i16).collect();
    mount_asset(&server, "/ambient.wav", 200, wav_bytes(8_000, &samples)).await;

    let clip = load_clip(&format!("{}/ambient.wav", server.uri()))
        .await
        .expect("valid wav");
    assert_eq!(clip.channels(), 1);
    assert_eq!(clip.sample_rate(), 8_000);
    assert_eq!(clip.samples().len(), 800);
}

#[tokio::test]
async fn app_survives_failed_loads() {
    let server = MockServer::start().await;
    mount_asset(&server, "/ambient.mp3", 500, Vec::new()).await;
    let dir = tempdir().expect("tempdir");

    let settings = AppSettings {
        sounds: vec![
            (SoundId::Ambient, format!("{}/ambient.mp3", server.uri())),
            (
                SoundId::Jumpscare,
                dir.path().join("scream.mp3").to_string_lossy().into_owned(),
            ),
        ],
        ..AppSettings::default()
    };
    let output = RecordingOutput::default();
    let mut app = App::new(settings, Some(Box::new(output.clone())));
    app.start_sound_loading();
    assert!(app.is_loading_sounds());

    wait_for_sounds(&mut app).await;
    assert!(!app.has_clip(SoundId::Ambient));
    assert!(!app.has_clip(SoundId::Jumpscare));
    assert_eq!(app.audio_state(), AudioState::Suspended);
    assert!(output.played().is_empty());
}

#[tokio::test]
async fn app_stores_loaded_clips() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("scream.wav");
    std::fs::write(&path, wav_bytes(8_000, &[0, 1000, -1000, 0])).expect("write wav");

    let settings = AppSettings {
        sounds: vec![(SoundId::Jumpscare, path.to_string_lossy().into_owned())],
        ..AppSettings::default()
    };
    let mut app = App::new(settings, Some(Box::new(RecordingOutput::default())));
    app.start_sound_loading();
    wait_for_sounds(&mut app).await;

    assert!(app.has_clip(SoundId::Jumpscare));
    assert!(!app.has_clip(SoundId::Ambient));
}
