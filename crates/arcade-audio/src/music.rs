use std::path::{Path, PathBuf};

use arcade_timing::Timer;

use crate::backend::{MusicBackend, StreamStatus};

/// Slow-stop duration used when none is configured.
pub const DEFAULT_FADE_MS: u64 = 1000;

/// What the manager does on its own between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicStatus {
    /// Nothing automatic; the stream plays or stops as told.
    Ready,
    /// Start the next playlist track whenever the stream stops.
    Playlist,
    /// Start the queued track once the stream has stopped.
    Waiting,
    /// Output volume is ramping to zero ahead of a stop.
    FadingOut,
}

/// Everything the fade timer's callback touches.
struct Channel {
    backend: Box<dyn MusicBackend>,
    playlist: Vec<PathBuf>,
    current: Option<usize>,
    status: MusicStatus,
    /// Stored volume setting (0..=100). Fades never modify it.
    volume: f32,
    /// Volume the backend is currently playing at.
    output_volume: f32,
    /// Volume units removed per millisecond while fading.
    fade_step: f32,
    saved_status: MusicStatus,
    queued: Option<PathBuf>,
    failed_in_a_row: usize,
}

impl Channel {
    fn start(&mut self, path: &Path, looping: bool) -> bool {
        let result = self
            .backend
            .open(path)
            .and_then(|()| self.backend.play(looping));
        match result {
            Ok(()) => {
                self.output_volume = self.volume;
                self.backend.set_volume(self.volume);
                log::debug!("music started: {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("music track {} not playable: {e:#}", path.display());
                false
            }
        }
    }

    fn next_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            return None;
        }
        Some(self.current.map_or(0, |i| (i + 1) % self.playlist.len()))
    }

    fn play_index(&mut self, index: usize) -> bool {
        self.current = Some(index);
        let path = self.playlist[index].clone();
        self.start(&path, false)
    }

    /// Fade complete: silence, stop, then put the stored setting back on the
    /// output so the next play starts at full loudness.
    fn finish_fade(&mut self) {
        self.backend.set_volume(0.0);
        self.backend.stop();
        self.output_volume = self.volume;
        self.backend.set_volume(self.volume);
        self.status = self.saved_status;
        log::debug!("music slow stop finished, status {:?}", self.status);
    }

    fn rotate_playlist(&mut self) {
        let Some(index) = self.next_index() else {
            return;
        };
        if self.play_index(index) {
            self.failed_in_a_row = 0;
            return;
        }
        self.failed_in_a_row += 1;
        if self.failed_in_a_row >= self.playlist.len() {
            log::warn!("no playable track in playlist, leaving rotation");
            self.status = MusicStatus::Ready;
            self.failed_in_a_row = 0;
        }
    }
}

/// Single music channel with playlist rotation and non-destructive fade-out.
pub struct MusicManager {
    channel: Channel,
    fade_timer: Timer<Channel>,
    fade_duration_ms: u64,
}

impl MusicManager {
    pub fn new(backend: Box<dyn MusicBackend>) -> Self {
        Self::with_fade_duration(backend, DEFAULT_FADE_MS)
    }

    /// `fade_duration_ms` is clamped to at least 1ms.
    pub fn with_fade_duration(backend: Box<dyn MusicBackend>, fade_duration_ms: u64) -> Self {
        Self {
            channel: Channel {
                backend,
                playlist: Vec::new(),
                current: None,
                status: MusicStatus::Ready,
                volume: 100.0,
                output_volume: 100.0,
                fade_step: 0.0,
                saved_status: MusicStatus::Ready,
                queued: None,
                failed_in_a_row: 0,
            },
            fade_timer: Timer::new(),
            fade_duration_ms: fade_duration_ms.max(1),
        }
    }

    /// Append tracks to the playlist and switch to rotation.
    pub fn set_playlist<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.channel
            .playlist
            .extend(paths.into_iter().map(Into::into));
        if self.channel.status == MusicStatus::FadingOut {
            self.channel.saved_status = MusicStatus::Playlist;
        } else {
            self.channel.status = MusicStatus::Playlist;
        }
    }

    /// Remove every track and leave rotation.
    pub fn clear_playlist(&mut self) {
        self.channel.playlist.clear();
        self.channel.current = None;
        if self.channel.status == MusicStatus::Playlist {
            self.channel.status = MusicStatus::Ready;
        }
        if self.channel.saved_status == MusicStatus::Playlist {
            self.channel.saved_status = MusicStatus::Ready;
        }
    }

    pub fn playlist(&self) -> &[PathBuf] {
        &self.channel.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.channel.current
    }

    /// Advance once per frame.
    pub fn update(&mut self, dt_ms: u64) {
        let stopped = self.channel.backend.status() == StreamStatus::Stopped;
        match self.channel.status {
            MusicStatus::Ready => {}
            MusicStatus::Playlist => {
                if stopped {
                    self.channel.rotate_playlist();
                }
            }
            MusicStatus::Waiting => {
                if stopped {
                    self.channel.status = MusicStatus::Ready;
                    if let Some(path) = self.channel.queued.take() {
                        self.channel.start(&path, true);
                    }
                }
            }
            MusicStatus::FadingOut => {
                let ch = &mut self.channel;
                ch.output_volume = (ch.output_volume - ch.fade_step * dt_ms as f32).max(0.0);
                ch.backend.set_volume(ch.output_volume);
            }
        }
        self.fade_timer.update(dt_ms, &mut self.channel);
    }

    /// Play a single track, leaving playlist rotation.
    pub fn play(&mut self, path: impl AsRef<Path>, looping: bool) {
        self.cancel_fade();
        self.channel.queued = None;
        self.channel.status = MusicStatus::Ready;
        self.channel.start(path.as_ref(), looping);
    }

    /// Fade out to silence over the fade duration, then stop.
    ///
    /// The stored volume and status are restored afterwards, so a later
    /// `play` starts at the previous loudness. No-op unless playing.
    pub fn slow_stop(&mut self) {
        if self.channel.backend.status() != StreamStatus::Playing
            || self.channel.status == MusicStatus::FadingOut
        {
            return;
        }
        let ch = &mut self.channel;
        ch.saved_status = ch.status;
        ch.status = MusicStatus::FadingOut;
        ch.fade_step = ch.output_volume / self.fade_duration_ms as f32;

        let armed = self.fade_timer.set_and_enable(
            self.fade_duration_ms,
            |timer: &mut Timer<Channel>, ch: &mut Channel| {
                ch.finish_fade();
                timer.disable();
            },
            true,
        );
        if let Err(e) = armed {
            log::error!("slow stop timer rejected: {e}");
            self.channel.finish_fade();
        }
    }

    /// Switch tracks. A playing track fades out first and `path` starts
    /// (looping) once the fade completes; otherwise it starts at once.
    pub fn change_music(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.channel.backend.status() != StreamStatus::Playing {
            self.play(&path, true);
            return;
        }
        self.channel.queued = Some(path);
        if self.channel.status == MusicStatus::FadingOut {
            self.channel.saved_status = MusicStatus::Waiting;
        } else {
            self.slow_stop();
            self.channel.saved_status = MusicStatus::Waiting;
        }
    }

    /// Skip to the next playlist track, wrapping, and resume rotation.
    /// A pending `change_music` switch is dropped. Returns the new index,
    /// or `None` when the playlist is empty.
    pub fn next_song(&mut self) -> Option<usize> {
        let index = self.channel.next_index()?;
        self.cancel_fade();
        self.channel.queued = None;
        self.channel.status = MusicStatus::Playlist;
        self.channel.play_index(index);
        Some(index)
    }

    pub fn pause(&mut self) {
        self.channel.backend.pause();
    }

    pub fn resume(&mut self) {
        if self.channel.backend.status() == StreamStatus::Paused {
            self.channel.backend.resume();
        }
    }

    /// Hard stop: cancels any fade or queued switch and leaves rotation.
    pub fn stop(&mut self) {
        self.cancel_fade();
        self.channel.queued = None;
        self.channel.status = MusicStatus::Ready;
        self.channel.backend.stop();
    }

    /// Set the stored volume (clamped to 0..=100). A running fade keeps
    /// ramping the output; the new value applies once it completes.
    pub fn set_volume(&mut self, volume: f32) {
        let ch = &mut self.channel;
        ch.volume = volume.clamp(0.0, 100.0);
        if ch.status != MusicStatus::FadingOut {
            ch.output_volume = ch.volume;
            ch.backend.set_volume(ch.volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.channel.volume
    }

    /// Volume currently applied to the stream (differs from `volume` mid-fade).
    pub fn output_volume(&self) -> f32 {
        self.channel.output_volume
    }

    pub fn status(&self) -> MusicStatus {
        self.channel.status
    }

    pub fn is_playing(&self) -> bool {
        self.channel.backend.status() == StreamStatus::Playing
    }

    fn cancel_fade(&mut self) {
        if self.channel.status == MusicStatus::FadingOut {
            self.fade_timer.disable();
            let ch = &mut self.channel;
            ch.status = ch.saved_status;
            ch.output_volume = ch.volume;
            ch.backend.set_volume(ch.volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockState {
        opened: Option<PathBuf>,
        history: Vec<PathBuf>,
        looping: bool,
        status: Option<StreamStatus>,
        volume: f32,
        broken: HashSet<PathBuf>,
    }

    struct MockMusic(Rc<RefCell<MockState>>);

    impl MusicBackend for MockMusic {
        fn open(&mut self, path: &Path) -> Result<()> {
            let mut s = self.0.borrow_mut();
            if s.broken.contains(path) {
                s.opened = None;
                bail!("cannot decode {}", path.display());
            }
            s.opened = Some(path.to_path_buf());
            s.status = Some(StreamStatus::Stopped);
            Ok(())
        }
        fn play(&mut self, looping: bool) -> Result<()> {
            let mut s = self.0.borrow_mut();
            let Some(path) = s.opened.clone() else {
                bail!("nothing open");
            };
            s.history.push(path);
            s.looping = looping;
            s.status = Some(StreamStatus::Playing);
            Ok(())
        }
        fn pause(&mut self) {
            let mut s = self.0.borrow_mut();
            if s.status == Some(StreamStatus::Playing) {
                s.status = Some(StreamStatus::Paused);
            }
        }
        fn resume(&mut self) {
            let mut s = self.0.borrow_mut();
            if s.status == Some(StreamStatus::Paused) {
                s.status = Some(StreamStatus::Playing);
            }
        }
        fn stop(&mut self) {
            self.0.borrow_mut().status = Some(StreamStatus::Stopped);
        }
        fn status(&self) -> StreamStatus {
            self.0.borrow().status.unwrap_or(StreamStatus::Stopped)
        }
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().volume = volume;
        }
    }

    fn manager() -> (MusicManager, Rc<RefCell<MockState>>) {
        let state = Rc::new(RefCell::new(MockState::default()));
        let mgr = MusicManager::new(Box::new(MockMusic(state.clone())));
        (mgr, state)
    }

    fn finish_track(state: &Rc<RefCell<MockState>>) {
        state.borrow_mut().status = Some(StreamStatus::Stopped);
    }

    #[test]
    fn playlist_rotates_in_order_and_wraps() {
        let (mut mgr, state) = manager();
        mgr.set_playlist(["a.ogg", "b.ogg"]);
        assert_eq!(mgr.status(), MusicStatus::Playlist);

        mgr.update(16);
        assert_eq!(mgr.current_index(), Some(0));
        assert!(!state.borrow().looping);

        // Still playing: no advance.
        mgr.update(16);
        assert_eq!(mgr.current_index(), Some(0));

        finish_track(&state);
        mgr.update(16);
        assert_eq!(mgr.current_index(), Some(1));

        finish_track(&state);
        mgr.update(16);
        assert_eq!(mgr.current_index(), Some(0));

        let history: Vec<PathBuf> = state.borrow().history.clone();
        assert_eq!(
            history,
            vec![PathBuf::from("a.ogg"), PathBuf::from("b.ogg"), PathBuf::from("a.ogg")]
        );
    }

    #[test]
    fn set_playlist_appends() {
        let (mut mgr, _state) = manager();
        mgr.set_playlist(["a.ogg"]);
        mgr.set_playlist(["b.ogg", "c.ogg"]);
        assert_eq!(mgr.playlist().len(), 3);
        assert_eq!(mgr.playlist()[2], PathBuf::from("c.ogg"));
    }

    #[test]
    fn next_song_on_empty_playlist_is_noop() {
        let (mut mgr, state) = manager();
        assert_eq!(mgr.next_song(), None);
        assert!(state.borrow().history.is_empty());
    }

    #[test]
    fn next_song_single_track_wraps_to_itself() {
        let (mut mgr, state) = manager();
        mgr.set_playlist(["only.ogg"]);
        assert_eq!(mgr.next_song(), Some(0));
        assert_eq!(mgr.next_song(), Some(0));
        assert_eq!(mgr.next_song(), Some(0));
        assert_eq!(state.borrow().history.len(), 3);
    }

    #[test]
    fn slow_stop_fades_output_then_restores() {
        let (mut mgr, state) = manager();
        mgr.set_volume(80.0);
        mgr.play("theme.ogg", true);
        assert!(mgr.is_playing());

        mgr.slow_stop();
        assert_eq!(mgr.status(), MusicStatus::FadingOut);

        mgr.update(500);
        assert!((mgr.output_volume() - 40.0).abs() < 1e-3);
        assert!((state.borrow().volume - 40.0).abs() < 1e-3);
        assert_eq!(mgr.volume(), 80.0);

        mgr.update(600);
        assert!(!mgr.is_playing());
        assert_eq!(mgr.status(), MusicStatus::Ready);
        assert_eq!(mgr.output_volume(), 80.0);
        assert_eq!(state.borrow().volume, 80.0);
    }

    #[test]
    fn fade_volume_is_monotonic() {
        let (mut mgr, _state) = manager();
        mgr.play("theme.ogg", true);
        mgr.slow_stop();
        let mut last = mgr.output_volume();
        for _ in 0..40 {
            mgr.update(33);
            if mgr.status() != MusicStatus::FadingOut {
                break;
            }
            assert!(mgr.output_volume() <= last);
            last = mgr.output_volume();
        }
        assert_eq!(mgr.status(), MusicStatus::Ready);
    }

    #[test]
    fn replay_after_slow_stop_uses_original_volume() {
        let (mut mgr, state) = manager();
        mgr.set_volume(60.0);
        mgr.play("a.ogg", false);
        mgr.slow_stop();
        mgr.update(1000);
        mgr.play("a.ogg", false);
        assert_eq!(state.borrow().volume, 60.0);
        assert!(mgr.is_playing());
    }

    #[test]
    fn slow_stop_when_stopped_is_noop() {
        let (mut mgr, _state) = manager();
        mgr.slow_stop();
        assert_eq!(mgr.status(), MusicStatus::Ready);
    }

    #[test]
    fn slow_stop_in_playlist_restores_rotation() {
        let (mut mgr, _state) = manager();
        mgr.set_playlist(["a.ogg", "b.ogg"]);
        mgr.update(16);
        mgr.slow_stop();
        mgr.update(1000);
        assert_eq!(mgr.status(), MusicStatus::Playlist);
        // Rotation picks the next track on the following frame.
        mgr.update(16);
        assert_eq!(mgr.current_index(), Some(1));
    }

    #[test]
    fn change_music_waits_for_fade() {
        let (mut mgr, state) = manager();
        mgr.play("menu.ogg", true);
        mgr.change_music("game.ogg");
        assert_eq!(mgr.status(), MusicStatus::FadingOut);

        mgr.update(1000);
        assert_eq!(mgr.status(), MusicStatus::Waiting);

        mgr.update(16);
        assert_eq!(mgr.status(), MusicStatus::Ready);
        assert!(mgr.is_playing());
        let s = state.borrow();
        assert_eq!(s.history.last(), Some(&PathBuf::from("game.ogg")));
        assert!(s.looping);
    }

    #[test]
    fn next_song_drops_pending_switch() {
        let (mut mgr, state) = manager();
        mgr.set_playlist(["a.ogg", "b.ogg"]);
        mgr.update(16);
        mgr.change_music("boss.ogg");
        assert_eq!(mgr.status(), MusicStatus::FadingOut);

        assert_eq!(mgr.next_song(), Some(1));
        assert_eq!(mgr.status(), MusicStatus::Playlist);
        assert_eq!(mgr.output_volume(), mgr.volume());

        finish_track(&state);
        mgr.update(16);
        assert_eq!(mgr.current_index(), Some(0));
        let s = state.borrow();
        assert_eq!(s.history.last(), Some(&PathBuf::from("a.ogg")));
        assert!(!s.history.contains(&PathBuf::from("boss.ogg")));
    }

    #[test]
    fn change_music_when_idle_starts_immediately() {
        let (mut mgr, state) = manager();
        mgr.change_music("game.ogg");
        assert!(mgr.is_playing());
        assert_eq!(state.borrow().history, vec![PathBuf::from("game.ogg")]);
    }

    #[test]
    fn broken_track_leaves_manager_silent() {
        let (mut mgr, state) = manager();
        state.borrow_mut().broken.insert(PathBuf::from("bad.ogg"));
        mgr.play("bad.ogg", false);
        assert!(!mgr.is_playing());
    }

    #[test]
    fn all_broken_playlist_leaves_rotation() {
        let (mut mgr, state) = manager();
        {
            let mut s = state.borrow_mut();
            s.broken.insert(PathBuf::from("x.ogg"));
            s.broken.insert(PathBuf::from("y.ogg"));
        }
        mgr.set_playlist(["x.ogg", "y.ogg"]);
        mgr.update(16);
        assert_eq!(mgr.status(), MusicStatus::Playlist);
        mgr.update(16);
        assert_eq!(mgr.status(), MusicStatus::Ready);
    }

    #[test]
    fn stop_cancels_fade_and_rotation() {
        let (mut mgr, _state) = manager();
        mgr.set_playlist(["a.ogg"]);
        mgr.update(16);
        mgr.slow_stop();
        mgr.stop();
        assert_eq!(mgr.status(), MusicStatus::Ready);
        assert_eq!(mgr.output_volume(), mgr.volume());
        mgr.update(2000);
        assert!(!mgr.is_playing());
    }

    #[test]
    fn pause_and_resume() {
        let (mut mgr, state) = manager();
        mgr.play("a.ogg", true);
        mgr.pause();
        assert_eq!(state.borrow().status, Some(StreamStatus::Paused));
        mgr.resume();
        assert!(mgr.is_playing());
    }

    #[test]
    fn set_volume_clamps() {
        let (mut mgr, _state) = manager();
        mgr.set_volume(150.0);
        assert_eq!(mgr.volume(), 100.0);
        mgr.set_volume(-5.0);
        assert_eq!(mgr.volume(), 0.0);
    }
}
