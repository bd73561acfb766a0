//! Configuration file support
//!
//! Defaults are read from `<config_dir>/typeline/config.toml`. A missing
//! file loads pure defaults, and missing fields fall back individually, so
//! a config file only needs the keys it changes. Command-line flags and
//! script header fields both override these values (see the play command
//! for the precedence order).

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::writer::{Options, DEFAULT_TARGET, DEFAULT_TYPE_DELAY};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub player: PlayerConfig,
}

/// Default playback options applied when neither the script header nor the
/// command line sets a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Milliseconds between revealed characters.
    pub type_delay: u64,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub loop_from: usize,
    pub hide_cursor_on_end: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            type_delay: DEFAULT_TYPE_DELAY.as_millis() as u64,
            looping: false,
            loop_from: 0,
            hide_cursor_on_end: false,
        }
    }
}

/// Interactive player presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Milliseconds per blink phase of the idle cursor.
    pub cursor_blink: u64,
    /// Color theme name: "ink", "classic", or "phosphor".
    pub theme: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            cursor_blink: 500,
            theme: "ink".to_string(),
        }
    }
}

impl Config {
    /// Path of the config file, whether or not it exists.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("typeline").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is missing.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Write the config to its standard path, creating directories as
    /// needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content).with_context(|| format!("Failed to write config: {:?}", path))?;
        Ok(())
    }

    /// Writer options seeded from the configured playback defaults.
    pub fn base_options(&self) -> Options {
        Options {
            target: DEFAULT_TARGET.to_string(),
            type_delay: Duration::from_millis(self.playback.type_delay),
            looping: self.playback.looping,
            loop_from: self.playback.loop_from,
            hide_cursor_on_end: self.playback.hide_cursor_on_end,
        }
    }

    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.player.cursor_blink)
    }

    /// The configured color theme.
    pub fn theme(&self) -> Theme {
        Theme::named(&self.player.theme)
    }
}
