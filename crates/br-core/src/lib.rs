/// Configuration, types, and shared structures for brailliant.
///
/// This crate contains the pixel canvas, colors, render geometry and the
/// asset configuration shared across the workspace.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;

pub use canvas::Canvas;
pub use color::Rgba;
pub use config::{AppConfig, AssetConfig, ExtractMode, RenderParams};
pub use error::CoreError;
