//! Screen state machine and the context screens run against.
//!
//! - [`Screen`] / [`Transition`]: one UI mode and how it hands off to the next
//! - [`ScreenManager`]: buffered swaps at frame boundaries
//! - [`AppContext`]: input, audio, renderer and font shared by all screens
//! - [`widget`]: labels and buttons that report events instead of calling back

mod context;
mod manager;
mod screen;
pub mod widget;

pub use context::AppContext;
pub use manager::ScreenManager;
pub use screen::{Screen, Transition};
pub use widget::{Button, ButtonEvent, ButtonId, Label};
