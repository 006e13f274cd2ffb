use std::fmt;

use anyhow::Result;

/// A self-contained UI mode (menu, gameplay, dialog).
///
/// Lifecycle: `initialize` -> (`draw` + `update`)* -> `release` -> drop.
/// Widgets and other per-screen resources should live in the screen itself so
/// they are torn down when it is dropped; `release` is for undoing effects on
/// the shared context (stopping music, resetting input).
pub trait Screen<C> {
    /// Short name used in log output.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Called once when the screen becomes current, before its first frame.
    /// An error here is fatal to the screen manager.
    fn initialize(&mut self, _ctx: &mut C) -> Result<()> {
        Ok(())
    }

    /// Called once when the screen stops being current.
    fn release(&mut self, _ctx: &mut C) {}

    fn draw(&mut self, ctx: &mut C, dt_ms: u64) -> Result<()>;

    /// Advance the screen. The returned transition takes effect at the start
    /// of the next frame.
    fn update(&mut self, ctx: &mut C, dt_ms: u64) -> Transition<C>;
}

/// What a screen asks the manager to do after its update.
pub enum Transition<C> {
    /// Stay on this screen.
    None,
    /// Swap to the given screen at the next frame boundary.
    Next(Box<dyn Screen<C>>),
    /// Release everything and stop running.
    Exit,
}

impl<C> Transition<C> {
    /// Convenience for `Transition::Next(Box::new(screen))`.
    pub fn to<S: Screen<C> + 'static>(screen: S) -> Self {
        Self::Next(Box::new(screen))
    }
}

impl<C> fmt::Debug for Transition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Next(screen) => write!(f, "Next({})", screen.name()),
            Self::Exit => write!(f, "Exit"),
        }
    }
}
