//! Value types shared by every arcade crate.
//!
//! - [`Color`], [`SrcRect`], [`DstRect`], [`TextureId`]: drawing vocabulary
//! - [`AppConfig`]: persisted runner configuration

pub mod config;
pub mod render;

pub use config::AppConfig;
pub use render::{Color, DstRect, SrcRect, TextureId};
