use std::path::Path;

use anyhow::Result;

/// Handle for a loaded sound buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u64);

/// Handle for one playing instance of a sound buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// Playback state of the music stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Stopped,
    Playing,
    Paused,
}

/// A single streaming music channel.
/// Implementations: KiraMusicBackend (kira), SilentMusicBackend (headless), mocks (testing).
pub trait MusicBackend {
    /// Open a track, replacing whatever was open. Leaves the stream stopped.
    fn open(&mut self, path: &Path) -> Result<()>;

    /// Start the open track from the beginning.
    fn play(&mut self, looping: bool) -> Result<()>;
    fn pause(&mut self);
    /// Continue a paused track where it left off.
    fn resume(&mut self);
    fn stop(&mut self);

    fn status(&self) -> StreamStatus;

    /// Set output volume (0.0..=100.0).
    fn set_volume(&mut self, volume: f32);
}

/// Buffered one-shot sound effects.
/// Implementations: KiraSoundBackend (kira), SilentSoundBackend (headless), mocks (testing).
pub trait SoundBackend {
    fn load(&mut self, path: &Path) -> Result<SoundId>;

    /// Start a new voice of `id` at `volume` (0.0..=100.0).
    fn play(&mut self, id: SoundId, volume: f32) -> Result<VoiceId>;
    fn stop_voice(&mut self, voice: VoiceId);
    fn is_voice_active(&self, voice: VoiceId) -> bool;
}
