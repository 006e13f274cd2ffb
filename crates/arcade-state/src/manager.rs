use anyhow::{Context, Result};

use crate::screen::{Screen, Transition};

/// Owns the current screen and at most one pending replacement.
///
/// Per frame: swap in the pending screen (release old, initialize new), then
/// draw, then update. A transition requested during update is buffered and
/// applied at the start of the next frame, so the requesting screen is never
/// drawn again and the new one is drawn on its first frame.
pub struct ScreenManager<C> {
    current: Option<Box<dyn Screen<C>>>,
    pending: Option<Box<dyn Screen<C>>>,
    running: bool,
}

impl<C> ScreenManager<C> {
    /// Start with `initial` pending; it is initialized on the first frame.
    pub fn new(initial: Box<dyn Screen<C>>) -> Self {
        Self {
            current: None,
            pending: Some(initial),
            running: true,
        }
    }

    /// Queue `next` for the next frame boundary, replacing any queued screen.
    pub fn set_next(&mut self, next: Box<dyn Screen<C>>) {
        if let Some(dropped) = self.pending.replace(next) {
            log::debug!("pending screen {} replaced before it ran", dropped.name());
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|s| s.name())
    }

    /// Release the current screen, drop the pending one and stop running.
    pub fn request_exit(&mut self, ctx: &mut C) {
        if let Some(mut screen) = self.current.take() {
            log::info!("exit requested, releasing {}", screen.name());
            screen.release(ctx);
        }
        self.pending = None;
        self.running = false;
    }

    /// Run one frame. Does nothing once the manager has stopped.
    ///
    /// A screen whose `initialize` fails leaves the manager with no current
    /// screen, stopped, and the error is returned.
    pub fn frame(&mut self, ctx: &mut C, dt_ms: u64) -> Result<()> {
        if !self.running {
            return Ok(());
        }

        if let Some(mut next) = self.pending.take() {
            if let Some(mut old) = self.current.take() {
                log::info!("screen transition: {} -> {}", old.name(), next.name());
                old.release(ctx);
            } else {
                log::info!("entering screen {}", next.name());
            }
            let name = next.name();
            if let Err(e) = next.initialize(ctx) {
                self.running = false;
                return Err(e).with_context(|| format!("failed to initialize screen {name}"));
            }
            self.current = Some(next);
        }

        let Some(screen) = self.current.as_mut() else {
            return Ok(());
        };
        screen.draw(ctx, dt_ms)?;
        match screen.update(ctx, dt_ms) {
            Transition::None => {}
            Transition::Next(next) => self.set_next(next),
            Transition::Exit => self.request_exit(ctx),
        }
        Ok(())
    }
}
