//! Demo screens for the headless runner.

mod boot;
mod exit;
mod menu;

pub use boot::BootScreen;
pub use exit::ExitScreen;
pub use menu::MenuScreen;
