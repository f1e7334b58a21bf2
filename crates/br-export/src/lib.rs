/// Post-processing and persistence for brailliant: crop, thumbnail, PNG.
pub mod crop;
pub mod png;
pub mod render;
pub mod resize;

pub use render::{RenderRequest, render, render_canvas, render_to_writer};
