use anyhow::Result;

use arcade_input::MouseButton;
use arcade_state::{AppContext, Label, Screen, Transition};
use arcade_timing::Timer;

use super::menu::MenuScreen;

/// Boot text and the pause before each line appears, in milliseconds.
const BOOT_LINES: &[(&str, u64)] = &[
    ("ARCADE SYSTEM BIOS", 300),
    ("MEMORY CHECK ... OK", 500),
    ("SOUND ........ OK", 250),
    ("VIDEO ........ OK", 250),
    ("INSERT COIN", 800),
];

/// Pause after the last line before moving on.
const HOLD_MS: u64 = 1200;

/// State the reveal timer advances.
#[derive(Debug, Default)]
struct BootProgress {
    shown: usize,
    done: bool,
}

/// Reveals the boot text line by line at an uneven cadence, then hands off
/// to the menu. Any key or click skips ahead.
pub struct BootScreen {
    timer: Timer<BootProgress>,
    progress: BootProgress,
    text: Label,
}

impl BootScreen {
    pub fn new() -> Self {
        Self {
            timer: Timer::new(),
            progress: BootProgress::default(),
            text: Label::new("", 16.0, 16.0),
        }
    }

    fn rebuild_text(&mut self) {
        let lines: Vec<&str> = BOOT_LINES[..self.progress.shown]
            .iter()
            .map(|&(line, _)| line)
            .collect();
        self.text.set_text(lines.join("\n"));
    }
}

/// Show one more line, then re-arm for the next pause (or the final hold).
fn reveal_next(timer: &mut Timer<BootProgress>, progress: &mut BootProgress) {
    if progress.shown >= BOOT_LINES.len() {
        progress.done = true;
        timer.disable();
        return;
    }
    progress.shown += 1;
    let next = BOOT_LINES
        .get(progress.shown)
        .map_or(HOLD_MS, |&(_, delay)| delay);
    if let Err(e) = timer.set_interval(next) {
        log::error!("boot timer: {e}");
        timer.disable();
    }
}

impl Default for BootScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<AppContext> for BootScreen {
    fn initialize(&mut self, ctx: &mut AppContext) -> Result<()> {
        self.progress = BootProgress::default();
        self.rebuild_text();
        self.timer.set_and_enable(BOOT_LINES[0].1, reveal_next, true)?;
        ctx.keyboard.reset();
        Ok(())
    }

    fn release(&mut self, _ctx: &mut AppContext) {
        self.timer.disable();
    }

    fn draw(&mut self, ctx: &mut AppContext, _dt_ms: u64) -> Result<()> {
        self.text.draw(&ctx.font, ctx.renderer.as_mut())
    }

    fn update(&mut self, ctx: &mut AppContext, dt_ms: u64) -> Transition<AppContext> {
        let before = self.progress.shown;
        self.timer.update(dt_ms, &mut self.progress);
        if self.progress.shown != before {
            for _ in before..self.progress.shown {
                ctx.sounds.play("beep");
            }
            self.rebuild_text();
        }

        let skipped = ctx.keyboard.is_any_down() || ctx.mouse.is_down(MouseButton::Left);
        if self.progress.done || skipped {
            Transition::to(MenuScreen::new())
        } else {
            Transition::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_follows_line_delays() {
        let mut timer = Timer::new();
        let mut progress = BootProgress::default();
        timer.set_and_enable(BOOT_LINES[0].1, reveal_next, true).unwrap();

        timer.update(299, &mut progress);
        assert_eq!(progress.shown, 0);
        timer.update(1, &mut progress);
        assert_eq!(progress.shown, 1);
        assert_eq!(timer.interval_ms(), BOOT_LINES[1].1);

        // One large step catches up through several lines at their own delays.
        timer.update(500 + 250 + 250, &mut progress);
        assert_eq!(progress.shown, 4);
        assert_eq!(timer.accumulated_ms(), 0);
    }

    #[test]
    fn finishes_after_hold() {
        let mut timer = Timer::new();
        let mut progress = BootProgress::default();
        timer.set_and_enable(BOOT_LINES[0].1, reveal_next, true).unwrap();

        let total: u64 = BOOT_LINES.iter().map(|&(_, d)| d).sum();
        timer.update(total, &mut progress);
        assert_eq!(progress.shown, BOOT_LINES.len());
        assert!(!progress.done);

        timer.update(HOLD_MS, &mut progress);
        assert!(progress.done);
        assert!(!timer.is_enabled());
    }
}
