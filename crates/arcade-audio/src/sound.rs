use std::collections::{HashMap, VecDeque};
use std::path::Path;

use crate::backend::{SoundBackend, SoundId, VoiceId};

/// Voice cap used when none is configured.
pub const DEFAULT_MAX_VOICES: usize = 32;

/// Named one-shot sound effects played on a bounded voice pool.
///
/// When the pool is full the oldest voice is cut to make room. Effects that
/// failed to load play as silence.
pub struct SoundManager {
    backend: Box<dyn SoundBackend>,
    sounds: HashMap<String, SoundId>,
    voices: VecDeque<VoiceId>,
    max_voices: usize,
    volume: f32,
    muted: bool,
}

impl SoundManager {
    pub fn new(backend: Box<dyn SoundBackend>) -> Self {
        Self::with_max_voices(backend, DEFAULT_MAX_VOICES)
    }

    /// `max_voices` is clamped to at least 1.
    pub fn with_max_voices(backend: Box<dyn SoundBackend>, max_voices: usize) -> Self {
        Self {
            backend,
            sounds: HashMap::new(),
            voices: VecDeque::new(),
            max_voices: max_voices.max(1),
            volume: 100.0,
            muted: false,
        }
    }

    /// Load an effect under `name`. Returns whether it is now playable.
    pub fn load(&mut self, name: &str, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.backend.load(path) {
            Ok(id) => {
                self.sounds.insert(name.to_string(), id);
                true
            }
            Err(e) => {
                log::warn!("sound {name} ({}) not loaded: {e:#}", path.display());
                false
            }
        }
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    /// Play the effect registered as `name`. Unknown names and muted output
    /// are silent no-ops.
    pub fn play(&mut self, name: &str) -> Option<VoiceId> {
        if self.muted {
            return None;
        }
        let Some(&id) = self.sounds.get(name) else {
            log::debug!("sound {name} requested but not loaded");
            return None;
        };

        let backend = &self.backend;
        self.voices.retain(|&v| backend.is_voice_active(v));
        while self.voices.len() >= self.max_voices {
            if let Some(oldest) = self.voices.pop_front() {
                self.backend.stop_voice(oldest);
            }
        }

        match self.backend.play(id, self.volume) {
            Ok(voice) => {
                self.voices.push_back(voice);
                Some(voice)
            }
            Err(e) => {
                log::warn!("sound {name} failed to start: {e:#}");
                None
            }
        }
    }

    pub fn stop_all(&mut self) {
        for voice in self.voices.drain(..) {
            self.backend.stop_voice(voice);
        }
    }

    /// Number of voices still sounding.
    pub fn active_voices(&self) -> usize {
        self.voices
            .iter()
            .filter(|&&v| self.backend.is_voice_active(v))
            .count()
    }

    /// Set the effect volume (clamped to 0..=100). Applies to new voices.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 100.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_all();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}
