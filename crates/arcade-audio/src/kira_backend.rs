/// Kira-based audio backends for real output.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::sound::streaming::{StreamingSoundData, StreamingSoundHandle};
use kira::sound::{FromFileError, PlaybackState};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};

use crate::backend::{MusicBackend, SoundBackend, SoundId, StreamStatus, VoiceId};

/// Map a 0..=100 volume onto kira's decibel scale.
fn to_decibels(volume: f32) -> Decibels {
    let amplitude = (volume / 100.0).clamp(0.0, 1.0);
    if amplitude <= 0.001 {
        Decibels::SILENCE
    } else {
        Decibels(20.0 * amplitude.log10())
    }
}

fn new_manager() -> Result<AudioManager> {
    AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
        .map_err(|e| anyhow!("Failed to create audio manager: {e}"))
}

/// Streams one music track at a time from disk.
pub struct KiraMusicBackend {
    manager: AudioManager,
    path: Option<PathBuf>,
    /// Decoded on `open` so bad files fail early; consumed by the next `play`.
    pending: Option<StreamingSoundData<FromFileError>>,
    handle: Option<StreamingSoundHandle<FromFileError>>,
    volume: f32,
}

impl KiraMusicBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            manager: new_manager()?,
            path: None,
            pending: None,
            handle: None,
            volume: 100.0,
        })
    }
}

impl MusicBackend for KiraMusicBackend {
    fn open(&mut self, path: &Path) -> Result<()> {
        self.stop();
        self.handle = None;
        self.path = None;
        let data = StreamingSoundData::from_file(path)
            .map_err(|e| anyhow!("decoding {}: {e}", path.display()))?;
        self.pending = Some(data);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self, looping: bool) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Err(anyhow!("no music track open"));
        };
        if let Some(handle) = &mut self.handle {
            handle.stop(Tween::default());
        }
        let data = match self.pending.take() {
            Some(data) => data,
            None => StreamingSoundData::from_file(&path)
                .map_err(|e| anyhow!("decoding {}: {e}", path.display()))?,
        };
        let data = if looping { data.loop_region(..) } else { data };
        let handle = self
            .manager
            .play(data.volume(to_decibels(self.volume)))
            .map_err(|e| anyhow!("playing {}: {e:?}", path.display()))?;
        self.handle = Some(handle);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.pause(Tween::default());
        }
    }

    fn resume(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.resume(Tween::default());
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.stop(Tween::default());
        }
    }

    fn status(&self) -> StreamStatus {
        match self.handle.as_ref().map(|h| h.state()) {
            None | Some(PlaybackState::Stopped) | Some(PlaybackState::Stopping) => {
                StreamStatus::Stopped
            }
            Some(PlaybackState::Paused) => StreamStatus::Paused,
            Some(_) => StreamStatus::Playing,
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(handle) = &mut self.handle {
            handle.set_volume(to_decibels(volume), Tween::default());
        }
    }
}

/// Plays fully decoded sound effects.
pub struct KiraSoundBackend {
    manager: AudioManager,
    sounds: HashMap<SoundId, StaticSoundData>,
    voices: HashMap<VoiceId, StaticSoundHandle>,
    next_id: u64,
}

impl KiraSoundBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            manager: new_manager()?,
            sounds: HashMap::new(),
            voices: HashMap::new(),
            next_id: 0,
        })
    }
}

impl SoundBackend for KiraSoundBackend {
    fn load(&mut self, path: &Path) -> Result<SoundId> {
        let data = StaticSoundData::from_file(path)
            .map_err(|e| anyhow!("decoding {}: {e}", path.display()))?;
        self.next_id += 1;
        let id = SoundId(self.next_id);
        self.sounds.insert(id, data);
        Ok(id)
    }

    fn play(&mut self, id: SoundId, volume: f32) -> Result<VoiceId> {
        let data = self
            .sounds
            .get(&id)
            .ok_or_else(|| anyhow!("unknown sound {id:?}"))?
            .clone()
            .volume(to_decibels(volume));
        self.voices
            .retain(|_, h| h.state() != PlaybackState::Stopped);
        let handle = self
            .manager
            .play(data)
            .map_err(|e| anyhow!("playing sound {id:?}: {e:?}"))?;
        self.next_id += 1;
        let voice = VoiceId(self.next_id);
        self.voices.insert(voice, handle);
        Ok(voice)
    }

    fn stop_voice(&mut self, voice: VoiceId) {
        if let Some(mut handle) = self.voices.remove(&voice) {
            handle.stop(Tween::default());
        }
    }

    fn is_voice_active(&self, voice: VoiceId) -> bool {
        self.voices
            .get(&voice)
            .is_some_and(|h| h.state() != PlaybackState::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decibel_mapping() {
        assert_eq!(to_decibels(100.0), Decibels(0.0));
        assert_eq!(to_decibels(0.0), Decibels::SILENCE);
        let half = to_decibels(50.0);
        assert!((half.0 - (-6.0206)).abs() < 1e-3);
    }
}
