//! Game settings.
//!
//! Read once at startup from a JSON file; every field has a default so a
//! partial file (or none at all) works. Settings are never written back.

use crate::error::{Error, Result};
use crate::lander::types::TICKS_PER_SECOND;
use crate::lander::{ThrustConvention, MAX_FUEL};
use crate::session::{SessionConfig, SpawnBounds};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_FILE: &str = "settings.json";

/// Sound asset configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Directory the asset file names below are resolved against.
    pub asset_dir: PathBuf,
    pub thrust: String,
    pub crash: String,
    pub landing: String,
    /// Background loop. `None` disables music.
    pub music: Option<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.8,
            asset_dir: PathBuf::from("assets"),
            thrust: "thrust.wav".to_string(),
            crash: "crash.wav".to_string(),
            landing: "landing.mp3".to_string(),
            music: Some("background_music.mp3".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub thrust_convention: ThrustConvention,
    pub spawn: SpawnBounds,
    pub max_fuel: u32,
    /// Render rate cap. The simulation always runs at a fixed tick rate.
    pub frame_rate: u32,
    /// Pause between touchdown and the end screen.
    pub touchdown_pause_ms: u64,
    /// Log destination. Logging is off without one.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio: AudioSettings::default(),
            thrust_convention: ThrustConvention::Standard,
            spawn: SpawnBounds::default(),
            max_fuel: MAX_FUEL,
            frame_rate: TICKS_PER_SECOND,
            touchdown_pause_ms: 2000,
            log_file: None,
        }
    }
}

/// Where the active settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    File(PathBuf),
    Defaults,
}

impl Settings {
    /// Platform config location, e.g. `~/.config/lunar-lander/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lunar-lander").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings.
    ///
    /// An explicit path must exist. The default location is optional and
    /// falls back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, SettingsSource)> {
        if let Some(path) = explicit {
            let settings = Self::read(path)?;
            return Ok((settings, SettingsSource::File(path.to_path_buf())));
        }

        match Self::default_path() {
            Some(path) => match Self::read(&path) {
                Ok(settings) => Ok((settings, SettingsSource::File(path))),
                Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                    Ok((Self::default(), SettingsSource::Defaults))
                }
                Err(e) => Err(e),
            },
            None => Ok((Self::default(), SettingsSource::Defaults)),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| match e {
            Error::SettingsParse { source, .. } => Error::SettingsParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate settings JSON.
    pub fn from_json(contents: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(Error::InvalidSettings("frame_rate must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(Error::InvalidSettings(format!(
                "audio.volume {} outside 0.0..=1.0",
                self.audio.volume
            )));
        }
        for (name, span) in [
            ("spawn.x", self.spawn.x),
            ("spawn.y", self.spawn.y),
            ("spawn.angle", self.spawn.angle),
        ] {
            if span.min > span.max {
                return Err(Error::InvalidSettings(format!(
                    "{} min {} exceeds max {}",
                    name, span.min, span.max
                )));
            }
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.frame_rate.max(1)))
    }

    pub fn touchdown_pause(&self) -> Duration {
        Duration::from_millis(self.touchdown_pause_ms)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_fuel: self.max_fuel,
            spawn: self.spawn,
            convention: self.thrust_convention,
        }
    }
}
