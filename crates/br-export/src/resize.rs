use anyhow::{Context, Result};
use br_core::canvas::Canvas;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};

/// Downscaled size fitting inside `max`, aspect ratio preserved.
///
/// Sizes already within the cap are returned unchanged (never upscaled).
/// The constrained side lands exactly on the cap; the other is rounded to
/// the nearest pixel and kept within `1..=cap`.
///
/// # Example
/// ```
/// use br_export::resize::thumbnail_size;
/// assert_eq!(thumbnail_size((200, 100), (64, 64)), (64, 32));
/// assert_eq!(thumbnail_size((30, 20), (64, 64)), (30, 20));
/// ```
#[must_use]
pub fn thumbnail_size(size: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (w, h) = size;
    let (max_w, max_h) = (max.0.max(1), max.1.max(1));
    if w <= max_w && h <= max_h {
        return (w, h);
    }

    let (w64, h64) = (u64::from(w), u64::from(h));
    if w64 * u64::from(max_h) >= h64 * u64::from(max_w) {
        // Width-bound
        let nh = (h64 * u64::from(max_w) + w64 / 2) / w64;
        (max_w, (nh as u32).clamp(1, max_h))
    } else {
        let nw = (w64 * u64::from(max_h) + h64 / 2) / h64;
        ((nw as u32).clamp(1, max_w), max_h)
    }
}

/// Reusable resizer wrapping fast_image_resize with a Lanczos3 filter.
///
/// Alpha is premultiplied during convolution so transparent pixels do not
/// bleed their color into dot edges.
pub struct Thumbnailer {
    inner: Resizer,
    options: ResizeOptions,
}

impl Thumbnailer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        }
    }

    /// Shrink `src` to fit inside `max`. Returns `src` as is when it already fits.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    ///
    /// # Example
    /// ```
    /// use br_core::canvas::Canvas;
    /// use br_export::resize::Thumbnailer;
    /// let mut t = Thumbnailer::new();
    /// let out = t.thumbnail(Canvas::new(128, 96), (64, 64)).unwrap();
    /// assert_eq!((out.width, out.height), (64, 48));
    /// ```
    pub fn thumbnail(&mut self, mut src: Canvas, max: (u32, u32)) -> Result<Canvas> {
        let (width, height) = thumbnail_size((src.width, src.height), max);
        if (width, height) == (src.width, src.height) {
            return Ok(src);
        }

        let mut dst = Canvas::new(width, height);
        let src_image = Image::from_slice_u8(src.width, src.height, &mut src.data, PixelType::U8x4)
            .context("Invalid source dimensions")?;
        let mut dst_image = Image::from_slice_u8(width, height, &mut dst.data, PixelType::U8x4)
            .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        log::debug!(
            "Thumbnail {}x{} -> {width}x{height}",
            src.width,
            src.height
        );
        Ok(dst)
    }
}

impl Default for Thumbnailer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for one-shot usage.
///
/// # Errors
/// Returns an error if the resize operation fails.
pub fn thumbnail(src: Canvas, max: (u32, u32)) -> Result<Canvas> {
    Thumbnailer::new().thumbnail(src, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use br_core::color::Rgba;

    #[test]
    fn never_exceeds_cap_and_keeps_ratio() {
        for &(w, h) in &[(90, 92), (1000, 3), (3, 1000), (65, 64), (257, 129), (700, 701)] {
            for &cap in &[(64, 64), (16, 48), (100, 10)] {
                let (tw, th) = thumbnail_size((w, h), cap);
                assert!(tw <= cap.0 && th <= cap.1, "{w}x{h} in {cap:?} -> {tw}x{th}");
                assert!(tw >= 1 && th >= 1);
                // Aspect within one pixel of the exact scale
                let exact_h = f64::from(tw) * f64::from(h) / f64::from(w);
                let exact_w = f64::from(th) * f64::from(w) / f64::from(h);
                assert!(
                    (exact_h - f64::from(th)).abs() <= 1.0 || (exact_w - f64::from(tw)).abs() <= 1.0,
                    "{w}x{h} -> {tw}x{th}"
                );
            }
        }
    }

    #[test]
    fn small_inputs_are_not_upscaled() {
        assert_eq!(thumbnail_size((64, 64), (64, 64)), (64, 64));
        assert_eq!(thumbnail_size((1, 1), (64, 64)), (1, 1));
    }

    #[test]
    fn thumbnail_of_opaque_square_stays_opaque_inside() {
        let mut canvas = Canvas::new(128, 128);
        for y in 0..128 {
            for x in 0..128 {
                canvas.put_pixel(x, y, Rgba::CHARTREUSE);
            }
        }
        let out = thumbnail(canvas, (64, 64)).unwrap();
        assert_eq!((out.width, out.height), (64, 64));
        assert_eq!(out.pixel(32, 32), Rgba::CHARTREUSE);
    }

    #[test]
    fn transparent_input_stays_transparent() {
        let out = thumbnail(Canvas::new(200, 100), (64, 64)).unwrap();
        assert_eq!((out.width, out.height), (64, 32));
        assert!(out.is_transparent());
    }
}
