//! Headless runner for the arcade toolkit: demo screens, scripted input and
//! the fixed-step frame loop used by the `arcade` binary.

pub mod runner;
pub mod screens;
pub mod script;

pub use runner::{HeadlessRunner, Pacing, RunSummary};
pub use script::{InputScript, ScriptEvent};
