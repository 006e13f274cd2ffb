//! Edge-triggered keyboard and mouse input.
//!
//! This module provides:
//! - [`ButtonStates`]: double-buffered pressed/down/up tracking over a fixed code set
//! - [`Keyboard`] and [`Mouse`]: per-frame snapshots polled from a backend
//! - [`KeyboardBackend`] / [`MouseBackend`]: platform abstraction, with virtual
//!   implementations for tests and headless runs

mod backend;
mod button_states;
mod key;
mod keyboard;
mod mouse;

pub use backend::{KeyboardBackend, MouseBackend, VirtualKeyboardBackend, VirtualMouseBackend};
pub use button_states::ButtonStates;
pub use key::{Key, MouseButton};
pub use keyboard::Keyboard;
pub use mouse::Mouse;
