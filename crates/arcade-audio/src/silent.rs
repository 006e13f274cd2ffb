use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::backend::{MusicBackend, SoundBackend, SoundId, StreamStatus, VoiceId};

/// Music backend that produces no output.
///
/// Opening checks that the file exists, so broken playlists behave as they
/// would with real output. Tracks never end on their own.
#[derive(Debug)]
pub struct SilentMusicBackend {
    opened: Option<PathBuf>,
    status: StreamStatus,
    volume: f32,
}

impl SilentMusicBackend {
    pub fn new() -> Self {
        Self {
            opened: None,
            status: StreamStatus::Stopped,
            volume: 100.0,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for SilentMusicBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicBackend for SilentMusicBackend {
    fn open(&mut self, path: &Path) -> Result<()> {
        self.status = StreamStatus::Stopped;
        if !path.is_file() {
            self.opened = None;
            bail!("music file not found: {}", path.display());
        }
        self.opened = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self, _looping: bool) -> Result<()> {
        if self.opened.is_none() {
            bail!("no music track open");
        }
        self.status = StreamStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) {
        if self.status == StreamStatus::Playing {
            self.status = StreamStatus::Paused;
        }
    }

    fn resume(&mut self) {
        if self.status == StreamStatus::Paused {
            self.status = StreamStatus::Playing;
        }
    }

    fn stop(&mut self) {
        self.status = StreamStatus::Stopped;
    }

    fn status(&self) -> StreamStatus {
        self.status
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Sound backend that produces no output; every voice ends immediately.
#[derive(Debug, Default)]
pub struct SilentSoundBackend {
    loaded: HashSet<SoundId>,
    next_id: u64,
}

impl SilentSoundBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundBackend for SilentSoundBackend {
    fn load(&mut self, path: &Path) -> Result<SoundId> {
        if !path.is_file() {
            bail!("sound file not found: {}", path.display());
        }
        self.next_id += 1;
        let id = SoundId(self.next_id);
        self.loaded.insert(id);
        Ok(id)
    }

    fn play(&mut self, id: SoundId, _volume: f32) -> Result<VoiceId> {
        if !self.loaded.contains(&id) {
            bail!("unknown sound {id:?}");
        }
        self.next_id += 1;
        Ok(VoiceId(self.next_id))
    }

    fn stop_voice(&mut self, _voice: VoiceId) {}

    fn is_voice_active(&self, _voice: VoiceId) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn silent_music_rejects_missing_file() {
        let dir = tempdir().unwrap();
        let mut backend = SilentMusicBackend::new();
        assert!(backend.open(&dir.path().join("gone.ogg")).is_err());
        assert!(backend.play(false).is_err());
        assert_eq!(backend.status(), StreamStatus::Stopped);
    }

    #[test]
    fn silent_music_plays_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.ogg");
        std::fs::write(&path, b"not really ogg").unwrap();

        let mut backend = SilentMusicBackend::new();
        backend.open(&path).unwrap();
        backend.play(true).unwrap();
        assert_eq!(backend.status(), StreamStatus::Playing);
        backend.pause();
        assert_eq!(backend.status(), StreamStatus::Paused);
        backend.resume();
        assert_eq!(backend.status(), StreamStatus::Playing);
    }

    #[test]
    fn silent_sound_voices_end_immediately() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("click.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let mut backend = SilentSoundBackend::new();
        let id = backend.load(&path).unwrap();
        let voice = backend.play(id, 100.0).unwrap();
        assert!(!backend.is_voice_active(voice));
    }
}
