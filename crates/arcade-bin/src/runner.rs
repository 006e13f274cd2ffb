use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use arcade_input::{VirtualKeyboardBackend, VirtualMouseBackend};
use arcade_state::{AppContext, Screen, ScreenManager};
use arcade_timing::FrameClock;
use arcade_types::Color;

use crate::script::InputScript;

/// How frame deltas are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Every frame advances exactly this many milliseconds, as fast as possible.
    Fixed(u64),
    /// Sleep toward the target frame time and measure real elapsed time.
    Realtime(u64),
}

/// Outcome of a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed_ms: u64,
    /// Whether the screens asked to exit (as opposed to hitting the frame limit).
    pub exited: bool,
}

/// Drives the screen manager with virtual input devices.
pub struct HeadlessRunner {
    pub ctx: AppContext,
    screens: ScreenManager<AppContext>,
    keyboard: VirtualKeyboardBackend,
    mouse: VirtualMouseBackend,
    script: InputScript,
    pacing: Pacing,
    /// 0 means no limit.
    max_frames: u64,
}

impl HeadlessRunner {
    pub fn new(ctx: AppContext, first: Box<dyn Screen<AppContext>>, pacing: Pacing) -> Self {
        let max_frames = ctx.config.max_frames;
        Self {
            ctx,
            screens: ScreenManager::new(first),
            keyboard: VirtualKeyboardBackend::new(),
            mouse: VirtualMouseBackend::new(),
            script: InputScript::default(),
            pacing,
            max_frames,
        }
    }

    pub fn with_script(mut self, script: InputScript) -> Self {
        self.script = script;
        self
    }

    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn screens(&self) -> &ScreenManager<AppContext> {
        &self.screens
    }

    /// Run until the screens exit or the frame limit is reached.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut clock = FrameClock::new();
        let mut frames = 0;

        while self.screens.is_running() {
            if self.max_frames != 0 && frames >= self.max_frames {
                log::info!("frame limit {} reached", self.max_frames);
                self.screens.request_exit(&mut self.ctx);
                return Ok(RunSummary {
                    frames,
                    elapsed_ms: clock.total_ms(),
                    exited: false,
                });
            }

            let dt_ms = match self.pacing {
                Pacing::Fixed(step) => clock.advance(Duration::from_millis(step)),
                Pacing::Realtime(target) => {
                    let started = Instant::now();
                    let dt = clock.tick();
                    if let Some(rest) = Duration::from_millis(target).checked_sub(started.elapsed()) {
                        thread::sleep(rest);
                    }
                    dt
                }
            };

            self.frame(frames, dt_ms)?;
            frames += 1;
        }

        log::info!("screens exited after {frames} frames");
        Ok(RunSummary {
            frames,
            elapsed_ms: clock.total_ms(),
            exited: true,
        })
    }

    fn frame(&mut self, index: u64, dt_ms: u64) -> Result<()> {
        self.script
            .apply(index, &mut self.keyboard, &mut self.mouse);
        self.ctx
            .begin_frame(&self.keyboard, &mut self.mouse, dt_ms);

        self.ctx.renderer.begin_frame()?;
        self.ctx.renderer.clear(Color::BLACK)?;
        self.screens.frame(&mut self.ctx, dt_ms)?;
        self.ctx.renderer.end_frame()
    }
}
