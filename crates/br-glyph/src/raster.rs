use br_core::canvas::Canvas;
use br_core::color::Rgba;
use br_core::config::RenderParams;
use br_core::error::CoreError;

use crate::glyph::draw_glyph;

/// Largest canvas `rasterize` will allocate, in pixels (1 GiB of RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Canvas dimensions for a grid of lines.
///
/// Width follows the longest line counted in `char`s; every line gets one
/// cell height. A `margin` of transparent pixels surrounds the grid.
///
/// # Errors
/// Returns `CoreError::InvalidDimensions` if a side does not fit in `u32` or
/// the area exceeds `MAX_CANVAS_PIXELS`.
///
/// # Example
/// ```
/// use br_core::config::RenderParams;
/// use br_glyph::raster::canvas_size;
/// let size = canvas_size(&["⣿⣿⣿", "⣿"], &RenderParams::default()).unwrap();
/// assert_eq!(size, (3 * 14 + 20, 2 * 24 + 20));
/// ```
pub fn canvas_size<L: AsRef<str>>(
    lines: &[L],
    params: &RenderParams,
) -> Result<(u32, u32), CoreError> {
    let cols = lines
        .iter()
        .map(|l| l.as_ref().chars().count())
        .max()
        .unwrap_or(0) as u64;
    let rows = lines.len() as u64;
    let margin = 2 * u64::from(params.margin);

    let width = cols
        .saturating_mul(u64::from(params.cell_width()))
        .saturating_add(margin);
    let height = rows
        .saturating_mul(u64::from(params.cell_height()))
        .saturating_add(margin);
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if width.saturating_mul(height) <= MAX_CANVAS_PIXELS => Ok((w, h)),
        _ => Err(CoreError::InvalidDimensions {
            width: width.min(u64::from(u32::MAX)) as u32,
            height: height.min(u64::from(u32::MAX)) as u32,
        }),
    }
}

/// Render a grid of Braille glyphs onto a fresh transparent canvas.
///
/// Lines are drawn top to bottom, characters left to right. The cursor
/// advances one cell per character whether or not it produced dots, so every
/// glyph position depends only on its grid coordinates.
///
/// # Errors
/// Returns `CoreError::EmptyFrame` when `lines` is empty, `CoreError::Config`
/// when `params` are out of range, and `CoreError::InvalidDimensions` when the
/// canvas would be too large.
///
/// # Example
/// ```
/// use br_core::color::Rgba;
/// use br_core::config::RenderParams;
/// use br_glyph::raster::rasterize;
/// let canvas = rasterize(&["⠁"], Rgba::BLACK, &RenderParams::default()).unwrap();
/// assert_eq!(canvas.pixel(12, 12), Rgba::BLACK);
/// ```
pub fn rasterize<L: AsRef<str>>(
    lines: &[L],
    color: Rgba,
    params: &RenderParams,
) -> Result<Canvas, CoreError> {
    if lines.is_empty() {
        return Err(CoreError::EmptyFrame);
    }
    params.validate()?;

    let (width, height) = canvas_size(lines, params)?;
    let mut canvas = Canvas::new(width, height);
    log::debug!(
        "Canvas {width}x{height} pour {} ligne(s) de glyphes",
        lines.len()
    );

    let cell_w = i64::from(params.cell_width());
    let cell_h = i64::from(params.cell_height());
    let margin = i64::from(params.margin);

    let mut dots = 0u64;
    let mut y = margin;
    for line in lines {
        let mut x = margin;
        for ch in line.as_ref().chars() {
            dots += u64::from(draw_glyph(
                &mut canvas,
                (x, y),
                ch,
                color,
                params.dot_radius,
                params.dot_spacing,
            ));
            x += cell_w;
        }
        y += cell_h;
    }
    log::trace!("{dots} point(s) dessinés");

    Ok(canvas)
}
