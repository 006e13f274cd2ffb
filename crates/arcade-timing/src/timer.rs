use std::fmt;

use thiserror::Error;

/// Callback fired by a [`Timer`]. Receives the timer itself (to retune or
/// disable it mid-fire) and the caller-supplied context.
pub type TimerCallback<C> = Box<dyn FnMut(&mut Timer<C>, &mut C)>;

/// Misuse of a [`Timer`]. These are programmer errors, not runtime conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("timer interval must be greater than zero")]
    ZeroInterval,

    #[error("timer enabled without a callback")]
    MissingCallback,
}

/// Periodic callback driven by elapsed milliseconds.
///
/// Each [`Timer::update`] adds the elapsed time to an accumulator and fires the
/// callback once per whole interval consumed, so a slow frame fires several
/// times in one call. The context type `C` is whatever state the callback
/// needs to mutate; it is passed in on every update rather than captured.
pub struct Timer<C> {
    enabled: bool,
    firing: bool,
    accumulated_ms: u64,
    interval_ms: u64,
    callback: Option<TimerCallback<C>>,
}

impl<C> Timer<C> {
    /// A disabled timer with no callback.
    pub fn new() -> Self {
        Self {
            enabled: false,
            firing: false,
            accumulated_ms: 0,
            interval_ms: 0,
            callback: None,
        }
    }

    /// Arm the timer with a new interval and callback.
    ///
    /// With `reset_time` the accumulator restarts from zero; otherwise time
    /// already accumulated counts toward the first fire.
    pub fn set_and_enable<F>(
        &mut self,
        interval_ms: u64,
        callback: F,
        reset_time: bool,
    ) -> Result<(), TimerError>
    where
        F: FnMut(&mut Timer<C>, &mut C) + 'static,
    {
        if interval_ms == 0 {
            return Err(TimerError::ZeroInterval);
        }
        self.interval_ms = interval_ms;
        self.callback = Some(Box::new(callback));
        if reset_time {
            self.reset_time();
        }
        self.enabled = true;
        Ok(())
    }

    /// Re-enable with the existing interval and callback.
    pub fn enable(&mut self) -> Result<(), TimerError> {
        // Inside a fire the callback is temporarily detached; it is put back
        // once the fire returns.
        if self.callback.is_none() && !self.firing {
            return Err(TimerError::MissingCallback);
        }
        if self.interval_ms == 0 {
            return Err(TimerError::ZeroInterval);
        }
        self.enabled = true;
        Ok(())
    }

    /// Stop firing. Accumulated time and the callback are kept.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Change the interval; takes effect on the next threshold check, including
    /// the remaining iterations of an in-progress update.
    pub fn set_interval(&mut self, interval_ms: u64) -> Result<(), TimerError> {
        if interval_ms == 0 {
            return Err(TimerError::ZeroInterval);
        }
        self.interval_ms = interval_ms;
        Ok(())
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Zero the accumulator without touching the enabled flag or interval.
    pub fn reset_time(&mut self) {
        self.accumulated_ms = 0;
    }

    /// Advance by `elapsed_ms` and fire the callback once per full interval.
    /// Returns the number of fires.
    pub fn update(&mut self, elapsed_ms: u64, ctx: &mut C) -> u32 {
        if !self.enabled || self.callback.is_none() {
            return 0;
        }
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);

        let mut fired = 0;
        while self.enabled && self.interval_ms > 0 && self.accumulated_ms >= self.interval_ms {
            let Some(mut callback) = self.callback.take() else {
                break;
            };
            self.accumulated_ms -= self.interval_ms;

            self.firing = true;
            callback(self, ctx);
            self.firing = false;
            fired += 1;

            // A callback that installed a replacement keeps the replacement.
            if self.callback.is_none() {
                self.callback = Some(callback);
            }
        }
        if fired > 1 {
            log::trace!("timer caught up {fired} intervals in one update");
        }
        fired
    }
}

impl<C> Default for Timer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Timer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("enabled", &self.enabled)
            .field("accumulated_ms", &self.accumulated_ms)
            .field("interval_ms", &self.interval_ms)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
