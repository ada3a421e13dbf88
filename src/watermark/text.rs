//! Text rendering for text watermarks.
//!
//! Rasterizes a string into a transparent RGBA layer using the built-in
//! 8x8 bitmap font, magnified by an integer scale factor.
//!
//! # Features
//!
//! - Fixed-advance glyphs (8x8 pixels before scaling)
//! - Nearest-neighbor magnification for crisp pixel edges
//! - Fallback to the `?` glyph for characters outside the basic set
//!
//! # Example
//!
//! ```ignore
//! use aquamark::watermark::text::{render_text, TextStyle};
//!
//! let layer = render_text("Hello", &TextStyle::default());
//! assert_eq!((layer.width(), layer.height()), (160, 32));
//! ```

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// Side length of an unscaled glyph cell.
const GLYPH_SIZE: u32 = 8;

/// Glyph substituted for characters missing from the basic font.
const FALLBACK_CHAR: char = '?';

/// Rendering options for text watermarks.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Color painted for each set glyph pixel, including its alpha.
    pub color: Rgba<u8>,
    /// Integer magnification of the 8x8 glyph cells.
    pub scale: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgba([0, 0, 0, 255]),
            scale: 4,
        }
    }
}

/// Calculate the pixel dimensions of `text` rendered at `scale`.
///
/// Every character advances by one glyph cell, so the width is
/// `chars * 8 * scale`. Empty text measures `(0, 0)`.
pub fn measure_text(text: &str, scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    let count = text.chars().count() as u32;
    if count == 0 {
        return (0, 0);
    }
    (count * GLYPH_SIZE * scale, GLYPH_SIZE * scale)
}

/// Render `text` onto a fresh transparent layer sized by [`measure_text`].
pub fn render_text(text: &str, style: &TextStyle) -> RgbaImage {
    let scale = style.scale.max(1);
    let (width, height) = measure_text(text, scale);
    let mut layer = RgbaImage::new(width, height);

    let mut cursor_x = 0u32;
    for ch in text.chars() {
        draw_glyph(&mut layer, ch, cursor_x, scale, style.color);
        cursor_x += GLYPH_SIZE * scale;
    }

    layer
}

/// Paint one glyph cell at the given horizontal offset.
fn draw_glyph(layer: &mut RgbaImage, ch: char, origin_x: u32, scale: u32, color: Rgba<u8>) {
    let glyph = BASIC_FONTS
        .get(ch)
        .or_else(|| BASIC_FONTS.get(FALLBACK_CHAR))
        .unwrap_or([0; 8]);

    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            // Bit n of a row addresses pixel column n, left to right
            if (bits >> col) & 1 == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let x = origin_x + col * scale + dx;
                    let y = row as u32 * scale + dy;
                    layer.put_pixel(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_pixel_count(layer: &RgbaImage) -> usize {
        layer.pixels().filter(|p| p[3] > 0).count()
    }

    // Test: width grows by one full glyph cell per character
    #[test]
    fn test_measure_text() {
        assert_eq!(measure_text("a", 1), (8, 8));
        assert_eq!(measure_text("Hi", 4), (64, 32));
        assert_eq!(measure_text("Hello", 2), (80, 16));
    }

    // Test: empty text measures zero in both dimensions
    #[test]
    fn test_measure_empty_text() {
        assert_eq!(measure_text("", 3), (0, 0));
    }

    // Test: a scale of zero is treated as one
    #[test]
    fn test_measure_zero_scale() {
        assert_eq!(measure_text("ab", 0), (16, 8));
    }

    // Test: rendering paints some pixels but not the whole cell
    #[test]
    fn test_render_single_glyph() {
        let style = TextStyle {
            color: Rgba([255, 0, 0, 255]),
            scale: 1,
        };
        let layer = render_text("A", &style);

        assert_eq!((layer.width(), layer.height()), (8, 8));
        let set = set_pixel_count(&layer);
        assert!(set > 0);
        assert!(set < 64);
    }

    // Test: every painted pixel carries the style color, the rest stay clear
    #[test]
    fn test_render_uses_style_color() {
        let style = TextStyle {
            color: Rgba([10, 200, 40, 255]),
            scale: 2,
        };
        let layer = render_text("X", &style);

        for pixel in layer.pixels() {
            if pixel[3] > 0 {
                assert_eq!(*pixel, Rgba([10, 200, 40, 255]));
            } else {
                assert_eq!(*pixel, Rgba([0, 0, 0, 0]));
            }
        }
    }

    // Test: doubling the scale quadruples the painted area
    #[test]
    fn test_render_scales_by_blocks() {
        let small = render_text(
            "A",
            &TextStyle {
                color: Rgba([0, 0, 0, 255]),
                scale: 1,
            },
        );
        let large = render_text(
            "A",
            &TextStyle {
                color: Rgba([0, 0, 0, 255]),
                scale: 2,
            },
        );

        assert_eq!((large.width(), large.height()), (16, 16));
        assert_eq!(set_pixel_count(&large), set_pixel_count(&small) * 4);
    }

    // Test: characters outside the basic set render as the question mark
    #[test]
    fn test_render_unknown_char_falls_back() {
        let style = TextStyle::default();
        let unknown = render_text("\u{20ac}", &style);
        let fallback = render_text("?", &style);

        assert_eq!(unknown.as_raw(), fallback.as_raw());
    }

    // Test: a space advances the cursor without painting anything
    #[test]
    fn test_render_space_is_blank() {
        let layer = render_text(" ", &TextStyle::default());
        assert_eq!((layer.width(), layer.height()), (32, 32));
        assert_eq!(set_pixel_count(&layer), 0);
    }

    // Test: empty text produces an empty layer
    #[test]
    fn test_render_empty_text() {
        let layer = render_text("", &TextStyle::default());
        assert_eq!((layer.width(), layer.height()), (0, 0));
    }
}
