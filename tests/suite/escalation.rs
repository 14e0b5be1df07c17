//! The escalation timeline end to end, with a recording audio output.

use std::time::Duration;

use chimera_engine::{App, AudioState, EffectKind, EffectTarget, SoundId, Stage};

use crate::common::{BOOT, Played, RecordingOutput, instant_settings, silent_clip};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn app_with_audio() -> (App, RecordingOutput) {
    let output = RecordingOutput::default();
    let mut app = App::new(instant_settings(), Some(Box::new(output.clone())));
    app.set_clip(SoundId::Ambient, silent_clip(80));
    app.set_clip(SoundId::Jumpscare, silent_clip(160));
    app.start_boot();
    app.advance(BOOT);
    (app, output)
}

#[test]
fn escalation_script_plays_out_in_order() {
    let (mut app, output) = app_with_audio();
    assert_eq!(app.audio_state(), AudioState::Suspended);

    app.dispatch("run project_chimera.exe");
    app.advance(ms(2000 + 15_000));

    let text = app.log().full_text();
    let order = [
        "Initiating Project Chimera protocol... Standby for system changes.\n",
        "SYSTEM OVERLOAD. INTEGRITY CRITICAL.\n",
        "WARNING: UNKNOWN ENTITY DETECTED. ATTEMPTING TO BREACH INTERFACE.\n",
        "GET OUT. NOW.\n",
        "THE CODE IS ALIVE.\n",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|line| text.find(line).unwrap_or_else(|| panic!("missing {line:?}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    assert_eq!(app.audio_state(), AudioState::Running);
    assert_eq!(
        output.played(),
        vec![
            Played {
                frames: 80,
                looped: true,
                volume: 0.5,
            },
            Played {
                frames: 160,
                looped: false,
                volume: 1.0,
            },
        ]
    );
}

#[test]
fn persistent_glitches_pulse_until_the_end() {
    let (mut app, _output) = app_with_audio();
    app.dispatch("run project_chimera.exe");
    app.advance(ms(2000));

    // Log glitch pulses every 1.5 s for 100 ms.
    app.advance(ms(1499));
    assert!(!app.effects().is_active(EffectTarget::Log, EffectKind::GlitchText));
    app.advance(ms(1));
    assert!(app.effects().is_active(EffectTarget::Log, EffectKind::GlitchText));
    app.advance(ms(100));
    assert!(!app.effects().is_active(EffectTarget::Log, EffectKind::GlitchText));

    // Screen flicker pulses every 3 s for 500 ms.
    app.advance(ms(1400));
    assert!(app.effects().is_active(EffectTarget::Screen, EffectKind::ScreenFlicker));

    // Long after the script ends both keep running.
    app.advance(ms(120_000));
    assert_eq!(
        app.effects().persistent(EffectTarget::Log),
        Some(EffectKind::GlitchText)
    );
    assert_eq!(
        app.effects().persistent(EffectTarget::Screen),
        Some(EffectKind::ScreenFlicker)
    );
}

#[test]
fn key_press_before_escalation_unlocks_audio() {
    let (mut app, output) = app_with_audio();
    app.note_user_gesture();
    assert_eq!(app.audio_state(), AudioState::Running);

    app.dispatch("run project_chimera.exe");
    app.advance(ms(2000));
    assert_eq!(output.played().len(), 1);
}

#[test]
fn presence_then_escalation() {
    let (mut app, _output) = app_with_audio();
    app.dispatch("whoami");
    assert_eq!(app.stage(), Stage::Interaction);
    app.advance(ms(1000));
    assert!(app.log().full_text().contains("A strange presence is felt...\n"));

    app.dispatch("run project_chimera.exe");
    assert_eq!(app.stage(), Stage::Escalating);
    app.dispatch("whoami");
    app.advance(ms(20_000));
    assert_eq!(
        app.log().full_text().matches("A strange presence").count(),
        1
    );
    assert_ne!(app.stage(), Stage::Climax);
}
