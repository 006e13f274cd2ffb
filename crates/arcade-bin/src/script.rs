use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use arcade_input::{Key, MouseButton, VirtualKeyboardBackend, VirtualMouseBackend};

/// Input changes applied at the start of one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScriptEvent {
    pub frame: u64,
    pub press: Vec<Key>,
    pub release: Vec<Key>,
    /// Cursor position `[x, y]`.
    pub mouse: Option<[f32; 2]>,
    pub mouse_press: Vec<MouseButton>,
    pub mouse_release: Vec<MouseButton>,
    pub wheel: f32,
}

/// Recorded input for headless runs, loaded from JSON:
///
/// ```json
/// { "events": [ { "frame": 90, "press": ["Enter"] }, { "frame": 92, "release": ["Enter"] } ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputScript {
    pub events: Vec<ScriptEvent>,
}

impl InputScript {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading input script {}", path.display()))?;
        let mut script: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing input script {}", path.display()))?;
        script.events.sort_by_key(|e| e.frame);
        log::info!("input script {}: {} events", path.display(), script.events.len());
        Ok(script)
    }

    /// Apply every event scheduled for `frame` to the virtual devices.
    pub fn apply(
        &self,
        frame: u64,
        keyboard: &mut VirtualKeyboardBackend,
        mouse: &mut VirtualMouseBackend,
    ) {
        for event in self.events.iter().filter(|e| e.frame == frame) {
            for &key in &event.release {
                keyboard.release(key);
            }
            for &key in &event.press {
                keyboard.press(key);
            }
            if let Some([x, y]) = event.mouse {
                mouse.move_to(x, y);
            }
            for &button in &event.mouse_release {
                mouse.release(button);
            }
            for &button in &event.mouse_press {
                mouse.press(button);
            }
            if event.wheel != 0.0 {
                mouse.scroll(event.wheel);
            }
        }
    }

    /// Frame of the last scheduled event, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.events.iter().map(|e| e.frame).max()
    }
}
