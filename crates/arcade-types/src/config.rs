use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "arcade.json";

/// Runner configuration persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Fixed frame step fed to timers and screens, in milliseconds.
    pub frame_ms: u64,
    /// Music volume (0..=100).
    pub music_volume: f32,
    /// Sound effect volume (0..=100).
    pub sound_volume: f32,
    pub sound_muted: bool,
    /// Duration of a music slow stop, in milliseconds.
    pub fade_duration_ms: u64,
    pub playlist: Vec<String>,
    /// Sound effects to preload, by name.
    pub sounds: BTreeMap<String, String>,
    pub font_path: Option<String>,
    pub font_rows: u32,
    pub font_cols: u32,
    /// Stop the headless runner after this many frames (0 = until exit).
    pub max_frames: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            frame_ms: 16,
            music_volume: 100.0,
            sound_volume: 100.0,
            sound_muted: false,
            fade_duration_ms: 1000,
            playlist: Vec::new(),
            sounds: BTreeMap::new(),
            font_path: None,
            font_rows: 16,
            font_cols: 16,
            max_frames: 600,
        }
    }
}

impl AppConfig {
    /// Read `arcade.json` from the working directory, or defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Read `path`. A missing file yields the defaults; a malformed one is
    /// an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Write `arcade.json` in the working directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Write pretty-printed JSON to `path`.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}
