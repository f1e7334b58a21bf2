/// Frame sources for brailliant: pulls glyph grids out of text files.

pub mod frames;

pub use frames::{extract, extract_line_block, extract_template, load_frame};
