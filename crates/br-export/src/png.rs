use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use br_core::canvas::Canvas;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Encode the canvas as a lossless RGBA8 PNG.
///
/// # Errors
/// Returns an error if encoding or writing fails.
///
/// # Example
/// ```
/// use br_core::canvas::Canvas;
/// use br_export::png::encode_png;
/// let mut bytes = Vec::new();
/// encode_png(&Canvas::new(4, 4), &mut bytes).unwrap();
/// assert_eq!(&bytes[1..4], b"PNG");
/// ```
pub fn encode_png<W: Write>(canvas: &Canvas, writer: W) -> Result<()> {
    PngEncoder::new(writer)
        .write_image(
            &canvas.data,
            canvas.width,
            canvas.height,
            ExtendedColorType::Rgba8,
        )
        .context("Encodage PNG échoué")
}

/// Write the canvas to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns an error naming `path` if the file cannot be created or written.
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Impossible de créer {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode_png(canvas, &mut writer).with_context(|| format!("{}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}
