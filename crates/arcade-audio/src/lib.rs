//! Music and sound-effect management.
//!
//! This module provides:
//! - [`MusicManager`]: single streaming channel with playlist rotation, slow stop
//!   and fade-then-switch
//! - [`SoundManager`]: named one-shot effects on a bounded voice pool
//! - [`MusicBackend`] / [`SoundBackend`]: the seam to the host audio library,
//!   with silent implementations for headless runs and an optional kira backend

mod backend;
#[cfg(feature = "kira")]
mod kira_backend;
mod music;
mod silent;
mod sound;

pub use backend::{MusicBackend, SoundBackend, SoundId, StreamStatus, VoiceId};
#[cfg(feature = "kira")]
pub use kira_backend::{KiraMusicBackend, KiraSoundBackend};
pub use music::{DEFAULT_FADE_MS, MusicManager, MusicStatus};
pub use silent::{SilentMusicBackend, SilentSoundBackend};
pub use sound::{DEFAULT_MAX_VOICES, SoundManager};
