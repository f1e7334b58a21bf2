use crate::color::Rgba;
use crate::error::CoreError;

/// Buffer de pixels RGBA owned par un seul appel de rendu.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel, alpha non prémultiplié.
///
/// # Example
/// ```
/// use br_core::canvas::Canvas;
/// let canvas = Canvas::new(10, 10);
/// assert_eq!(canvas.data.len(), 400);
/// assert!(canvas.is_transparent());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Crée un canvas transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use br_core::canvas::Canvas;
    /// let canvas = Canvas::new(100, 50);
    /// assert_eq!(canvas.width, 100);
    /// assert_eq!(canvas.height, 50);
    /// assert_eq!(canvas.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    #[inline(always)]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Accès au pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use br_core::canvas::Canvas;
    /// use br_core::color::Rgba;
    /// let canvas = Canvas::new(10, 10);
    /// assert_eq!(canvas.pixel(0, 0), Rgba::TRANSPARENT);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = self.offset(x, y);
        match self.data.get(idx..idx + 4) {
            Some(&[r, g, b, a]) => Rgba([r, g, b, a]),
            _ => Rgba::TRANSPARENT,
        }
    }

    /// Écrit un pixel. Les coordonnées hors canvas sont ignorées.
    #[inline(always)]
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = self.offset(x as u32, y as u32);
        self.data[idx..idx + 4].copy_from_slice(&color.0);
    }

    /// Fill a disc centered on (cx, cy).
    ///
    /// A pixel is covered when its center lies within `radius + 1/2` of the
    /// disc center, i.e. `dx² + dy² <= r² + r`. This fills the inscribed
    /// ellipse of the `(cx - r, cy - r, cx + r, cy + r)` box: radius 2 gives a
    /// 5×5 square with only its corners clear. The fill replaces existing
    /// pixels and is clipped to the canvas.
    ///
    /// # Example
    /// ```
    /// use br_core::canvas::Canvas;
    /// use br_core::color::Rgba;
    /// let mut canvas = Canvas::new(5, 5);
    /// canvas.fill_circle(2, 2, 2, Rgba::BLACK);
    /// assert_eq!(canvas.pixel(2, 0), Rgba::BLACK);
    /// assert_eq!(canvas.pixel(0, 0), Rgba::TRANSPARENT);
    /// ```
    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: u32, color: Rgba) {
        let r = i64::from(radius);
        let limit = r * r + r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= limit {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Vrai si aucun pixel n'a d'alpha non nul.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Copy the region `[x, x + width) × [y, y + height)` into a new canvas.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if the region is empty or leaves the canvas.
    ///
    /// # Example
    /// ```
    /// use br_core::canvas::Canvas;
    /// let canvas = Canvas::new(10, 8);
    /// let sub = canvas.sub_image(2, 2, 4, 3).unwrap();
    /// assert_eq!((sub.width, sub.height), (4, 3));
    /// ```
    pub fn sub_image(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Self, CoreError> {
        let fits = width > 0
            && height > 0
            && u64::from(x) + u64::from(width) <= u64::from(self.width)
            && u64::from(y) + u64::from(height) <= u64::from(self.height);
        if !fits {
            return Err(CoreError::InvalidDimensions { width, height });
        }

        let row_len = width as usize * 4;
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in y..y + height {
            let start = self.offset(x, row);
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_two_disc_is_rounded_square() {
        let mut canvas = Canvas::new(9, 9);
        canvas.fill_circle(4, 4, 2, Rgba::BLACK);
        let rows: Vec<String> = (2..=6)
            .map(|y| {
                (2..=6)
                    .map(|x| if canvas.pixel(x, y) == Rgba::BLACK { '#' } else { '.' })
                    .collect()
            })
            .collect();
        assert_eq!(rows, vec![".###.", "#####", "#####", "#####", ".###."]);
        let filled = canvas.data.chunks_exact(4).filter(|px| px[3] != 0).count();
        assert_eq!(filled, 21);
    }

    #[test]
    fn radius_zero_is_single_pixel() {
        let mut canvas = Canvas::new(3, 3);
        canvas.fill_circle(1, 1, 0, Rgba::BLACK);
        let filled = canvas.data.chunks_exact(4).filter(|px| px[3] != 0).count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn circle_is_clipped_at_edges() {
        let mut canvas = Canvas::new(3, 3);
        canvas.fill_circle(0, 0, 2, Rgba::CHARTREUSE);
        canvas.fill_circle(-10, -10, 2, Rgba::CHARTREUSE);
        assert_eq!(canvas.pixel(0, 0), Rgba::CHARTREUSE);
        assert_eq!(canvas.pixel(2, 2), Rgba::TRANSPARENT);
    }

    #[test]
    fn fill_replaces_instead_of_blending() {
        let mut canvas = Canvas::new(1, 1);
        canvas.put_pixel(0, 0, Rgba::CHARTREUSE);
        canvas.put_pixel(0, 0, Rgba::new(10, 20, 30, 40));
        assert_eq!(canvas.pixel(0, 0), Rgba::new(10, 20, 30, 40));
    }

    #[test]
    fn sub_image_copies_rows() {
        let mut canvas = Canvas::new(4, 4);
        canvas.put_pixel(2, 1, Rgba::BLACK);
        let sub = canvas.sub_image(1, 1, 2, 2).unwrap();
        assert_eq!(sub.pixel(1, 0), Rgba::BLACK);
        assert_eq!(sub.pixel(0, 1), Rgba::TRANSPARENT);
    }

    #[test]
    fn sub_image_rejects_out_of_bounds() {
        let canvas = Canvas::new(4, 4);
        assert!(canvas.sub_image(3, 0, 2, 1).is_err());
        assert!(canvas.sub_image(0, 0, 0, 1).is_err());
    }
}
