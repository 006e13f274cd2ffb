use std::path::Path;

use arcade_audio::{MusicBackend, MusicManager, SoundBackend, SoundManager};
use arcade_input::{Keyboard, KeyboardBackend, Mouse, MouseBackend};
use arcade_render::{BitmapFont, RenderBackend};
use arcade_types::AppConfig;

/// Everything screens share, built once at startup and passed by `&mut`.
pub struct AppContext {
    pub config: AppConfig,
    pub keyboard: Keyboard,
    pub mouse: Mouse,
    pub music: MusicManager,
    pub sounds: SoundManager,
    pub renderer: Box<dyn RenderBackend>,
    pub font: BitmapFont,
}

impl AppContext {
    /// Wire the managers to their backends and apply the audio settings from
    /// `config`. The font starts unloaded; see [`AppContext::load_font`].
    pub fn new(
        config: AppConfig,
        renderer: Box<dyn RenderBackend>,
        music_backend: Box<dyn MusicBackend>,
        sound_backend: Box<dyn SoundBackend>,
    ) -> Self {
        let mut music = MusicManager::with_fade_duration(music_backend, config.fade_duration_ms);
        music.set_volume(config.music_volume);
        let mut sounds = SoundManager::new(sound_backend);
        sounds.set_volume(config.sound_volume);
        sounds.set_muted(config.sound_muted);

        Self {
            config,
            keyboard: Keyboard::new(),
            mouse: Mouse::new(),
            music,
            sounds,
            renderer,
            font: BitmapFont::new(),
        }
    }

    /// Load the configured font atlas. A missing or broken atlas leaves the
    /// font unloaded, so text simply does not draw.
    pub fn load_font(&mut self) -> bool {
        let Some(path) = self.config.font_path.clone() else {
            log::debug!("no font atlas configured");
            return false;
        };
        let (rows, cols) = (self.config.font_rows, self.config.font_cols);
        match self
            .font
            .load(self.renderer.as_mut(), Path::new(&path), rows, cols)
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("font atlas {path} not loaded: {e:#}");
                false
            }
        }
    }

    /// Preload every configured sound effect. Returns how many loaded.
    pub fn load_sounds(&mut self) -> usize {
        let mut loaded = 0;
        for (name, path) in &self.config.sounds {
            if self.sounds.load(name, path) {
                loaded += 1;
            }
        }
        log::debug!("{loaded}/{} sound effects loaded", self.config.sounds.len());
        loaded
    }

    /// Start the configured playlist, if any.
    pub fn start_playlist(&mut self) {
        if !self.config.playlist.is_empty() {
            self.music.set_playlist(self.config.playlist.iter().cloned());
        }
    }

    /// Per-frame housekeeping before the screen runs: poll input, tick audio.
    pub fn begin_frame(
        &mut self,
        keyboard: &dyn KeyboardBackend,
        mouse: &mut dyn MouseBackend,
        dt_ms: u64,
    ) {
        self.keyboard.update(keyboard);
        self.mouse.update(mouse);
        self.music.update(dt_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_audio::{MusicStatus, SilentMusicBackend, SilentSoundBackend};
    use arcade_input::{Key, MouseButton, VirtualKeyboardBackend, VirtualMouseBackend};
    use arcade_render::CommandRecorder;
    use tempfile::tempdir;

    fn context(config: AppConfig) -> AppContext {
        AppContext::new(
            config,
            Box::new(CommandRecorder::new(320, 240)),
            Box::new(SilentMusicBackend::new()),
            Box::new(SilentSoundBackend::new()),
        )
    }

    #[test]
    fn config_volumes_are_applied() {
        let config = AppConfig {
            music_volume: 40.0,
            sound_volume: 70.0,
            sound_muted: true,
            ..AppConfig::default()
        };
        let ctx = context(config);
        assert_eq!(ctx.music.volume(), 40.0);
        assert_eq!(ctx.sounds.volume(), 70.0);
        assert!(ctx.sounds.is_muted());
    }

    #[test]
    fn begin_frame_polls_input() {
        let mut ctx = context(AppConfig::default());
        let mut keys = VirtualKeyboardBackend::new();
        let mut mouse = VirtualMouseBackend::new();

        keys.press(Key::Space);
        mouse.press(MouseButton::Left);
        mouse.move_to(12.0, 34.0);
        ctx.begin_frame(&keys, &mut mouse, 16);
        assert!(ctx.keyboard.is_down(Key::Space));
        assert!(ctx.mouse.is_down(MouseButton::Left));
        assert_eq!(ctx.mouse.position(), (12.0, 34.0));

        ctx.begin_frame(&keys, &mut mouse, 16);
        assert!(ctx.keyboard.is_pressed(Key::Space));
        assert!(!ctx.keyboard.is_down(Key::Space));
    }

    #[test]
    fn missing_font_stays_unloaded() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            font_path: Some(dir.path().join("nope.png").to_string_lossy().into_owned()),
            ..AppConfig::default()
        };
        let mut ctx = context(config);
        assert!(!ctx.load_font());
        assert!(!ctx.font.is_loaded());
    }

    #[test]
    fn sounds_load_by_name() {
        let dir = tempdir().unwrap();
        let click = dir.path().join("click.wav");
        std::fs::write(&click, b"RIFF").unwrap();
        let mut config = AppConfig::default();
        config
            .sounds
            .insert("click".into(), click.to_string_lossy().into_owned());
        config
            .sounds
            .insert("boom".into(), dir.path().join("boom.wav").to_string_lossy().into_owned());

        let mut ctx = context(config);
        assert_eq!(ctx.load_sounds(), 1);
        assert!(ctx.sounds.is_loaded("click"));
        assert!(!ctx.sounds.is_loaded("boom"));
    }

    #[test]
    fn configured_playlist_starts() {
        let dir = tempdir().unwrap();
        let track = dir.path().join("theme.ogg");
        std::fs::write(&track, b"ogg").unwrap();
        let config = AppConfig {
            playlist: vec![track.to_string_lossy().into_owned()],
            ..AppConfig::default()
        };
        let mut ctx = context(config);
        ctx.start_playlist();
        assert_eq!(ctx.music.status(), MusicStatus::Playlist);

        let keys = VirtualKeyboardBackend::new();
        let mut mouse = VirtualMouseBackend::new();
        ctx.begin_frame(&keys, &mut mouse, 16);
        assert!(ctx.music.is_playing());
        assert_eq!(ctx.music.current_index(), Some(0));
    }
}
