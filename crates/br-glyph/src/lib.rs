/// Braille glyph rasterizer for brailliant.
///
/// Turns lines of Unicode Braille Pattern characters into dot bitmaps.
pub mod glyph;
pub mod raster;

pub use glyph::{DotSink, dot_mask, draw_glyph};
pub use raster::{canvas_size, rasterize};
