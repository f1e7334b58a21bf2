use std::io::Write;
use std::path::Path;

use anyhow::Result;
use br_core::canvas::Canvas;
use br_core::color::Rgba;
use br_core::config::{AssetConfig, RenderParams};
use br_glyph::raster::rasterize;

use crate::crop::crop_to_content;
use crate::png::{encode_png, save_png};
use crate::resize::Thumbnailer;

/// Une demande de rendu : grille, couleur, géométrie et post-traitement.
///
/// # Example
/// ```
/// use br_core::color::Rgba;
/// use br_export::render::RenderRequest;
/// let lines = vec!["⣿".to_string()];
/// let req = RenderRequest::new(&lines, Rgba::BLACK).max_size(Some((64, 64)));
/// assert!(req.crop);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    pub lines: &'a [String],
    pub color: Rgba,
    pub params: RenderParams,
    pub max_size: Option<(u32, u32)>,
    /// Recadrer sur le contenu (défaut : oui).
    pub crop: bool,
}

impl<'a> RenderRequest<'a> {
    /// Default geometry, crop on, no size cap.
    #[must_use]
    pub fn new(lines: &'a [String], color: Rgba) -> Self {
        Self {
            lines,
            color,
            params: RenderParams::default(),
            max_size: None,
            crop: true,
        }
    }

    /// Build the request described by an asset entry.
    #[must_use]
    pub fn for_asset(lines: &'a [String], asset: &AssetConfig, params: RenderParams) -> Self {
        Self {
            lines,
            color: asset.color,
            params,
            max_size: asset.max_size,
            crop: asset.crop,
        }
    }

    #[must_use]
    pub fn max_size(mut self, max_size: Option<(u32, u32)>) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use]
    pub fn crop(mut self, crop: bool) -> Self {
        self.crop = crop;
        self
    }
}

/// Rasterize, crop, then downsample, without touching the disk.
///
/// # Errors
/// Returns an error for an empty frame, an oversized canvas, or a failed resize.
///
/// # Example
/// ```
/// use br_core::color::Rgba;
/// use br_export::render::{RenderRequest, render_canvas};
/// let lines = vec!["⣿⣿".to_string()];
/// let canvas = render_canvas(&RenderRequest::new(&lines, Rgba::BLACK)).unwrap();
/// // Cropped to the outer dot edges of both cells
/// assert_eq!((canvas.width, canvas.height), (24, 20));
/// ```
pub fn render_canvas(req: &RenderRequest<'_>) -> Result<Canvas> {
    let mut canvas = rasterize(req.lines, req.color, &req.params)?;
    if req.crop {
        canvas = crop_to_content(canvas);
    }
    if let Some(max) = req.max_size {
        canvas = Thumbnailer::new().thumbnail(canvas, max)?;
    }
    Ok(canvas)
}

/// Render the request and write the PNG to `writer`. Returns the final size.
///
/// # Errors
/// Returns an error if rendering or encoding fails.
pub fn render_to_writer<W: Write>(req: &RenderRequest<'_>, writer: W) -> Result<(u32, u32)> {
    let canvas = render_canvas(req)?;
    encode_png(&canvas, writer)?;
    Ok((canvas.width, canvas.height))
}

/// Render the request and write the PNG to `output`. Returns the final size.
///
/// # Errors
/// Returns an error if rendering fails or `output` cannot be written.
pub fn render(req: &RenderRequest<'_>, output: &Path) -> Result<(u32, u32)> {
    let canvas = render_canvas(req)?;
    save_png(&canvas, output)?;
    log::info!(
        "Generated {} at size {}x{}",
        output.display(),
        canvas.width,
        canvas.height
    );
    Ok((canvas.width, canvas.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn blank_grid_with_crop_keeps_full_transparent_canvas() {
        let grid = lines(&["⠀⠀⠀⠀⠀"; 3]);
        let canvas = render_canvas(&RenderRequest::new(&grid, Rgba::BLACK)).unwrap();
        assert_eq!((canvas.width, canvas.height), (5 * 14 + 20, 3 * 24 + 20));
        assert!(canvas.is_transparent());
    }

    #[test]
    fn non_braille_line_is_deterministic() {
        let grid = lines(&["hello, world"]);
        let req = RenderRequest::new(&grid, Rgba::BLACK);
        let a = render_canvas(&req).unwrap();
        let b = render_canvas(&req).unwrap();
        assert_eq!(a, b);
        assert!(a.is_transparent());
        assert_eq!((a.width, a.height), (12 * 14 + 20, 24 + 20));
    }

    #[test]
    fn single_dot_crops_to_disc() {
        let grid = lines(&["⠁"]);
        let canvas = render_canvas(&RenderRequest::new(&grid, Rgba::CHARTREUSE)).unwrap();
        assert_eq!((canvas.width, canvas.height), (5, 5));
        assert_eq!(canvas.pixel(2, 2), Rgba::CHARTREUSE);
    }

    #[test]
    fn crop_off_keeps_margin() {
        let grid = lines(&["⠁"]);
        let req = RenderRequest::new(&grid, Rgba::BLACK).crop(false);
        let canvas = render_canvas(&req).unwrap();
        assert_eq!((canvas.width, canvas.height), (34, 44));
    }

    #[test]
    fn max_size_bounds_output_and_keeps_aspect() {
        let grid = lines(&["⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿"; 4]);
        let uncapped = render_canvas(&RenderRequest::new(&grid, Rgba::BLACK)).unwrap();
        let req = RenderRequest::new(&grid, Rgba::BLACK).max_size(Some((64, 64)));
        let capped = render_canvas(&req).unwrap();

        assert!(capped.width <= 64 && capped.height <= 64);
        let expected_h =
            f64::from(capped.width) * f64::from(uncapped.height) / f64::from(uncapped.width);
        assert!((expected_h - f64::from(capped.height)).abs() <= 1.0);
    }

    #[test]
    fn render_twice_gives_identical_png_bytes() {
        let grid = lines(&["⢀⣴⣿⣦⡀", "⣿⣿⣿⣿⣿", "⠈⠻⣿⠟⠁"]);
        let req = RenderRequest::new(&grid, Rgba::CHARTREUSE).max_size(Some((32, 32)));
        let mut first = Vec::new();
        let mut second = Vec::new();
        let a = render_to_writer(&req, &mut first).unwrap();
        let b = render_to_writer(&req, &mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn render_writes_file_with_returned_size() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("favicon.png");
        let grid = lines(&["⣿⣿", "⣿⣿"]);
        let req = RenderRequest::new(&grid, Rgba::CHARTREUSE).max_size(Some((16, 16)));
        let size = render(&req, &out).unwrap();

        let decoded = image::open(&out).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), size);
        assert!(size.0 <= 16 && size.1 <= 16);
    }

    #[test]
    fn empty_lines_fail() {
        let grid: Vec<String> = Vec::new();
        assert!(render_canvas(&RenderRequest::new(&grid, Rgba::BLACK)).is_err());
    }
}
