//! Rasterisation d'un glyphe Braille (U+2800..=U+28FF) en points pleins.
//!
//! Numérotation des points (bit = point - 1) :
//! +---+---+
//! | 1 | 4 |
//! +---+---+
//! | 2 | 5 |
//! +---+---+
//! | 3 | 6 |
//! +---+---+
//! | 7 | 8 |
//! +---+---+

use br_core::canvas::Canvas;
use br_core::color::Rgba;

/// Braille base codepoint (U+2800).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Last Braille codepoint (U+28FF, all eight dots).
pub const BRAILLE_LAST: u32 = 0x28FF;

/// Bit index → (column, row) in the 2×4 dot grid.
///
/// Dots 1-6 fill the first three rows column by column; dots 7 and 8 were
/// appended later by Unicode and sit on the fourth row.
pub const DOT_LAYOUT: [(u32, u32); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (0, 3),
    (1, 3),
];

/// Anything a glyph can be drawn into.
///
/// `Canvas` fills real pixels; tests plug in recorders to observe dot centers.
///
/// # Example
/// ```
/// use br_core::color::Rgba;
/// use br_glyph::glyph::DotSink;
///
/// struct Counter(usize);
/// impl DotSink for Counter {
///     fn fill_dot(&mut self, _cx: i64, _cy: i64, _radius: u32, _color: Rgba) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait DotSink {
    /// Fill a disc of `radius` centered on (cx, cy).
    fn fill_dot(&mut self, cx: i64, cy: i64, radius: u32, color: Rgba);
}

impl DotSink for Canvas {
    #[inline(always)]
    fn fill_dot(&mut self, cx: i64, cy: i64, radius: u32, color: Rgba) {
        self.fill_circle(cx, cy, radius, color);
    }
}

/// Masque 8 bits d'un glyphe, `None` hors du bloc Braille.
///
/// # Example
/// ```
/// use br_glyph::glyph::dot_mask;
/// assert_eq!(dot_mask('\u{2800}'), Some(0));
/// assert_eq!(dot_mask('\u{28FF}'), Some(0xFF));
/// assert_eq!(dot_mask('a'), None);
/// ```
#[inline(always)]
#[must_use]
pub fn dot_mask(glyph: char) -> Option<u8> {
    let code = u32::from(glyph);
    if (BRAILLE_BASE..=BRAILLE_LAST).contains(&code) {
        Some((code - BRAILLE_BASE) as u8)
    } else {
        None
    }
}

/// Map un entier 8-bits (0 à 255) vers le caractère Braille correspondant.
///
/// # Example
/// ```
/// use br_glyph::glyph::glyph_for_mask;
/// assert_eq!(glyph_for_mask(0), '\u{2800}');
/// assert_eq!(glyph_for_mask(0xFF), '\u{28FF}');
/// ```
#[must_use]
#[inline(always)]
pub const fn glyph_for_mask(mask: u8) -> char {
    match char::from_u32(BRAILLE_BASE + mask as u32) {
        Some(c) => c,
        None => ' ',
    }
}

/// Draw one glyph whose cell starts at `origin`.
///
/// Every set bit `i` of the mask produces one dot of `dot_radius` centered at
/// `origin + DOT_LAYOUT[i] * spacing + dot_radius`. Characters outside the
/// Braille block draw nothing. Returns the number of dots drawn.
///
/// # Example
/// ```
/// use br_core::canvas::Canvas;
/// use br_core::color::Rgba;
/// use br_glyph::glyph::draw_glyph;
///
/// let mut canvas = Canvas::new(14, 24);
/// assert_eq!(draw_glyph(&mut canvas, (0, 0), '\u{28FF}', Rgba::BLACK, 2, 5), 8);
/// assert_eq!(draw_glyph(&mut canvas, (0, 0), ' ', Rgba::BLACK, 2, 5), 0);
/// ```
pub fn draw_glyph<S: DotSink + ?Sized>(
    sink: &mut S,
    origin: (i64, i64),
    glyph: char,
    color: Rgba,
    dot_radius: u32,
    spacing: u32,
) -> u32 {
    let Some(mask) = dot_mask(glyph) else {
        return 0;
    };

    let r = i64::from(dot_radius);
    let step = i64::from(spacing);
    for (bit, &(col, row)) in DOT_LAYOUT.iter().enumerate() {
        if mask & (1 << bit) != 0 {
            let cx = origin.0 + i64::from(col) * step + r;
            let cy = origin.1 + i64::from(row) * step + r;
            sink.fill_dot(cx, cy, dot_radius, color);
        }
    }
    mask.count_ones()
}
