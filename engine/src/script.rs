//! Narrative content: the command table and the scripted timelines.

use std::time::Duration;

use chimera_types::{EffectKind, EffectTarget, LineStyle, SoundId};

use crate::scheduler::{Action, Cue, TimelineKind};

/// A recognized command and its canned response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: &'static str,
    pub response: &'static str,
    /// Hidden commands work but are never advertised by `help`.
    pub hidden: bool,
}

const fn entry(name: &'static str, response: &'static str) -> CommandEntry {
    CommandEntry {
        name,
        response,
        hidden: false,
    }
}

const fn hidden(name: &'static str, response: &'static str) -> CommandEntry {
    CommandEntry {
        name,
        response,
        hidden: true,
    }
}

pub(crate) const COMMAND_TABLE: &[CommandEntry] = &[
    entry(
        "help",
        "Available commands: help, ls, cat [file], run [program]",
    ),
    entry(
        "ls",
        "Files: README.txt, system_log.dat, project_chimera.exe",
    ),
    entry(
        "cat readme.txt",
        "README.txt: This system is unstable. Do not proceed. Data corruption detected.",
    ),
    entry(
        "cat system_log.dat",
        "system_log.dat: [ERROR] Core integrity compromised. [WARNING] Entity detected. [CRITICAL] System override imminent.",
    ),
    entry(
        "run project_chimera.exe",
        "Executing project_chimera.exe... Access denied. System response: \"IT WANTS OUT.\"",
    ),
    hidden("whoami", "You are an intruder. Leave."),
    hidden("ping", "Pinging... Target unresponsive. Or is it?"),
    hidden("exit", "Connection terminated. Or so you think."),
];

/// Running this program starts the escalation.
pub const CHIMERA_COMMAND: &str = "run project_chimera.exe";
/// Asking who you are wakes the presence.
pub const IDENTITY_COMMAND: &str = "whoami";

pub const PROTOCOL_NOTICE: &str =
    "Initiating Project Chimera protocol... Standby for system changes.\n";
/// Gap between the protocol notice and the first escalation cue.
pub const ESCALATION_DELAY: Duration = Duration::from_millis(2000);

const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

const fn plain(text: &'static str) -> Action {
    Action::Print {
        text,
        style: LineStyle::Plain,
    }
}

const fn glitch(text: &'static str) -> Action {
    Action::Print {
        text,
        style: LineStyle::Glitch,
    }
}

const fn one_shot(target: EffectTarget, effect: EffectKind, duration_ms: u64) -> Action {
    Action::Glitch {
        target,
        effect,
        duration: ms(duration_ms),
    }
}

/// Cues for a named timeline, offsets relative to its start.
#[must_use]
pub fn timeline(kind: TimelineKind) -> Vec<Cue> {
    match kind {
        TimelineKind::Boot => boot_sequence(),
        TimelineKind::Presence => presence(),
        TimelineKind::Escalation => escalation(),
    }
}

fn boot_sequence() -> Vec<Cue> {
    vec![
        Cue::new(ms(0), plain("CHIMERA OS v1.0.0 Booting...\n")),
        Cue::new(ms(1000), plain("Loading kernel modules...\n")),
        Cue::new(ms(2000), plain("Initializing hardware...\n")),
        Cue::new(
            ms(3500),
            glitch("Establishing network connection... [FAILED]\n"),
        ),
        Cue::new(ms(4500), plain("Checking file system integrity...\n")),
        Cue::new(
            ms(6000),
            glitch("WARNING: Corrupted sectors detected. Attempting repair...\n"),
        ),
        Cue::new(
            ms(6000),
            one_shot(EffectTarget::Screen, EffectKind::ScreenFlicker, 800),
        ),
        Cue::new(
            ms(7500),
            glitch("Repair failed. System integrity at 67%.\n"),
        ),
        Cue::new(
            ms(9000),
            plain("Boot sequence complete. Type 'help' for commands.\n\n"),
        ),
        Cue::new(ms(9000), Action::CompleteBoot),
    ]
}

fn presence() -> Vec<Cue> {
    vec![
        Cue::new(ms(1000), plain("A strange presence is felt...\n")),
        Cue::new(
            ms(1000),
            one_shot(EffectTarget::Screen, EffectKind::ScreenFlicker, 1000),
        ),
    ]
}

fn escalation() -> Vec<Cue> {
    vec![
        Cue::new(ms(0), glitch("SYSTEM OVERLOAD. INTEGRITY CRITICAL.\n")),
        Cue::new(
            ms(0),
            Action::StartPersistentGlitch {
                target: EffectTarget::Log,
                effect: EffectKind::GlitchText,
                interval: ms(1500),
                duration: ms(100),
            },
        ),
        Cue::new(
            ms(0),
            Action::StartPersistentGlitch {
                target: EffectTarget::Screen,
                effect: EffectKind::ScreenFlicker,
                interval: ms(3000),
                duration: ms(500),
            },
        ),
        Cue::new(
            ms(0),
            Action::PlaySound {
                sound: SoundId::Ambient,
                looped: true,
                volume: 0.5,
                resume_first: true,
            },
        ),
        Cue::new(
            ms(5000),
            glitch("WARNING: UNKNOWN ENTITY DETECTED. ATTEMPTING TO BREACH INTERFACE.\n"),
        ),
        Cue::new(
            ms(5000),
            one_shot(EffectTarget::Screen, EffectKind::ColorInvert, 500),
        ),
        Cue::new(
            ms(10000),
            Action::PlaySound {
                sound: SoundId::Jumpscare,
                looped: false,
                volume: 1.0,
                resume_first: false,
            },
        ),
        Cue::new(
            ms(10000),
            one_shot(EffectTarget::Screen, EffectKind::ColorInvert, 1000),
        ),
        Cue::new(
            ms(10000),
            one_shot(EffectTarget::Log, EffectKind::GlitchText, 1000),
        ),
        Cue::new(ms(10000), glitch("GET OUT. NOW.\n")),
        Cue::new(ms(15000), glitch("THE CODE IS ALIVE.\n")),
    ]
}
