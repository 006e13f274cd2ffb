use std::time::{Duration, Instant};

/// Converts wall-clock time into whole-millisecond frame deltas.
///
/// Sub-millisecond leftovers are carried into the next frame, so summing the
/// returned deltas never drifts from real elapsed time by more than 1ms.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    remainder_us: u64,
    total_ms: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            remainder_us: 0,
            total_ms: 0,
        }
    }

    /// Milliseconds since the previous tick.
    pub fn tick(&mut self) -> u64 {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        self.advance(elapsed)
    }

    /// Feed an explicit elapsed duration (fixed-step and replay runs).
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let micros = self.remainder_us + elapsed.as_micros() as u64;
        self.remainder_us = micros % 1000;
        let ms = micros / 1000;
        self.total_ms += ms;
        ms
    }

    /// Sum of all deltas returned so far.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_carries_sub_millisecond_remainder() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Duration::from_micros(16_600)), 16);
        assert_eq!(clock.advance(Duration::from_micros(16_600)), 17);
        assert_eq!(clock.advance(Duration::from_micros(16_600)), 16);
        assert_eq!(clock.total_ms(), 49);
    }

    #[test]
    fn tick_is_monotonic() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(3));
        assert!(clock.tick() >= 3);
    }
}
