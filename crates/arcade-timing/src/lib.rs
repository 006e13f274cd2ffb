//! Frame timing utilities.
//!
//! - [`Timer`]: fires a callback once per elapsed interval, catching up on slow frames
//! - [`FrameClock`]: turns wall-clock instants into whole-millisecond frame deltas

mod clock;
mod timer;

pub use clock::FrameClock;
pub use timer::{Timer, TimerCallback, TimerError};
