use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use chimera_types::{SoundId, UiOptions};

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

pub const DEFAULT_TYPE_DELAY_MS: u64 = 30;
pub const DEFAULT_AMBIENT_SOUND: &str = "./assets/ambient_static.mp3";
pub const DEFAULT_JUMPSCARE_SOUND: &str = "./assets/jumpscare_scream.mp3";

/// Environment switch that silences audio regardless of the config file.
const AUDIO_ENV: &str = "CHIMERA_AUDIO";

#[derive(Debug, Default, Deserialize)]
pub struct ChimeraConfig {
    pub app: Option<AppConfig>,
    pub terminal: Option<TerminalConfig>,
    pub audio: Option<AudioConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for the cursor and frame.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Reveal output instantly and tone down glitch rendering.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct TerminalConfig {
    /// Delay between revealed characters, in milliseconds.
    pub type_delay_ms: Option<u64>,
}

/// Sound asset configuration.
///
/// ```toml
/// [audio]
/// enabled = true
/// autoplay = false
/// ambient = "${HOME}/chimera/ambient_static.mp3"
/// jumpscare = "https://example.com/jumpscare_scream.mp3"
/// ```
#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Start with the audio subsystem running instead of waiting for the
    /// first key press.
    #[serde(default)]
    pub autoplay: bool,
    pub ambient: Option<String>,
    pub jumpscare: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            autoplay: false,
            ambient: None,
            jumpscare: None,
        }
    }
}

/// Expand `${VAR}` references using the process environment.
///
/// Unset variables expand to the empty string; an unterminated `${` is kept
/// literally.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl ChimeraConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Read and parse `path`. A missing file is `Ok(None)`; reporting errors
    /// is left to the caller.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn type_delay(&self) -> Duration {
        let ms = self
            .terminal
            .as_ref()
            .and_then(|terminal| terminal.type_delay_ms)
            .unwrap_or(DEFAULT_TYPE_DELAY_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn audio_enabled(&self) -> bool {
        let configured = self.audio.as_ref().is_none_or(|audio| audio.enabled);
        configured && !audio_disabled_by_env()
    }

    #[must_use]
    pub fn audio_autoplay(&self) -> bool {
        self.audio.as_ref().is_some_and(|audio| audio.autoplay)
    }

    /// Resolved asset locator for a sound, with environment expansion.
    #[must_use]
    pub fn sound_locator(&self, sound: SoundId) -> String {
        let configured = self.audio.as_ref().and_then(|audio| match sound {
            SoundId::Ambient => audio.ambient.as_deref(),
            SoundId::Jumpscare => audio.jumpscare.as_deref(),
        });
        let raw = configured.unwrap_or(match sound {
            SoundId::Ambient => DEFAULT_AMBIENT_SOUND,
            SoundId::Jumpscare => DEFAULT_JUMPSCARE_SOUND,
        });
        expand_env_vars(raw)
    }
}

fn audio_disabled_by_env() -> bool {
    env::var(AUDIO_ENV).is_ok_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "0" | "off" | "false" | "no"
        )
    })
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".chimera").join("config.toml"))
}
