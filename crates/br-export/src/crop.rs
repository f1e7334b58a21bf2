use br_core::canvas::Canvas;

/// Rectangle de contenu, coin haut-gauche inclus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Bounding box of the pixels with non-zero alpha.
///
/// Returns `None` for a fully transparent canvas.
///
/// # Example
/// ```
/// use br_core::canvas::Canvas;
/// use br_core::color::Rgba;
/// use br_export::crop::{Bounds, content_bounds};
/// let mut canvas = Canvas::new(10, 10);
/// assert_eq!(content_bounds(&canvas), None);
/// canvas.put_pixel(3, 4, Rgba::BLACK);
/// canvas.put_pixel(6, 5, Rgba::BLACK);
/// assert_eq!(content_bounds(&canvas), Some(Bounds { x: 3, y: 4, width: 4, height: 2 }));
/// ```
#[must_use]
pub fn content_bounds(canvas: &Canvas) -> Option<Bounds> {
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);
    let mut found = false;

    let stride = canvas.width as usize * 4;
    if stride == 0 {
        return None;
    }
    for (y, row) in canvas.data.chunks_exact(stride).enumerate() {
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] != 0 {
                let (x, y) = (x as u32, y as u32);
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                found = true;
            }
        }
    }

    found.then(|| Bounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Crop to the visible content.
///
/// A canvas with nothing drawn is returned unchanged rather than shrunk to
/// zero pixels.
///
/// # Example
/// ```
/// use br_core::canvas::Canvas;
/// use br_export::crop::crop_to_content;
/// let blank = crop_to_content(Canvas::new(90, 92));
/// assert_eq!((blank.width, blank.height), (90, 92));
/// ```
#[must_use]
pub fn crop_to_content(canvas: Canvas) -> Canvas {
    let Some(b) = content_bounds(&canvas) else {
        log::debug!("Canvas transparent, pas de recadrage");
        return canvas;
    };
    if b.width == canvas.width && b.height == canvas.height {
        return canvas;
    }

    log::debug!(
        "Recadrage {}x{} -> {}x{} à ({}, {})",
        canvas.width,
        canvas.height,
        b.width,
        b.height,
        b.x,
        b.y
    );
    match canvas.sub_image(b.x, b.y, b.width, b.height) {
        Ok(cropped) => cropped,
        Err(e) => {
            // Bounds come from the canvas itself, so this cannot leave it
            log::error!("Recadrage impossible : {e}");
            canvas
        }
    }
}
