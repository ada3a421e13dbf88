//! Cosmetic pixel filters applied in place over an RGBA buffer.
//!
//! Filters mutate only the RGB channels; alpha is never touched. Each
//! filter is a pure function of the individual pixel value.
//!
//! # Features
//!
//! - Brightness shift with clamping
//! - Linear contrast stretch about the channel midpoint
//! - Greyscale via ITU-R BT.601 luma weights
//! - Channel inversion
//!
//! # Example
//!
//! ```ignore
//! use aquamark::filter::ImageFilter;
//!
//! let mut image = image::RgbaImage::new(100, 100);
//! ImageFilter::Brighten(0.5).apply(&mut image);
//! ```

use image::RgbaImage;

/// Edit operation selected by the user.
///
/// The enum is closed: an unrecognized selection label never reaches
/// `apply`, it is absorbed as `None` at the parsing seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFilter {
    /// Leave the image unchanged
    None,
    /// Shift each RGB channel by `amount * 255`, clamped
    Brighten(f32),
    /// Stretch each RGB channel about 127.5 by a factor of `1 + amount`
    Contrast(f32),
    /// Replace RGB with the BT.601 luma
    Greyscale,
    /// Replace each RGB channel value v with 255 - v
    Invert,
}

impl ImageFilter {
    /// Parse a user-facing edit label into a filter.
    ///
    /// The four labels offered by the prompt map to their filters, with
    /// `intensity` feeding the brightness/contrast amount. Anything else
    /// logs a warning and resolves to `None` so the run continues with
    /// the image unchanged.
    pub fn from_selection(label: &str, intensity: f32) -> ImageFilter {
        match label {
            "Make image brighter" => ImageFilter::Brighten(intensity),
            "Increase contrast" => ImageFilter::Contrast(intensity),
            "Make image b&w" => ImageFilter::Greyscale,
            "Invert image" => ImageFilter::Invert,
            other => {
                tracing::warn!(edit_type = %other, "Wrong edit type! Ignored...");
                ImageFilter::None
            }
        }
    }

    /// Short lowercase name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            ImageFilter::None => "none",
            ImageFilter::Brighten(_) => "brighten",
            ImageFilter::Contrast(_) => "contrast",
            ImageFilter::Greyscale => "greyscale",
            ImageFilter::Invert => "invert",
        }
    }

    /// Apply the filter to the image in place
    pub fn apply(&self, image: &mut RgbaImage) {
        match self {
            ImageFilter::None => {}
            ImageFilter::Brighten(amount) => brighten(image, *amount),
            ImageFilter::Contrast(amount) => contrast(image, *amount),
            ImageFilter::Greyscale => greyscale(image),
            ImageFilter::Invert => invert(image),
        }
    }
}

/// Shift every RGB channel by `amount * 255`, clamped to the valid range.
///
/// Positive amounts brighten, negative amounts darken.
fn brighten(image: &mut RgbaImage, amount: f32) {
    let delta = amount * 255.0;
    for pixel in image.pixels_mut() {
        for channel in 0..3 {
            let value = pixel[channel] as f32 + delta;
            pixel[channel] = value.clamp(0.0, 255.0) as u8;
        }
    }
}

/// Stretch every RGB channel linearly about the midpoint 127.5.
fn contrast(image: &mut RgbaImage, amount: f32) {
    let factor = 1.0 + amount;
    for pixel in image.pixels_mut() {
        for channel in 0..3 {
            let value = (pixel[channel] as f32 - 127.5) * factor + 127.5;
            pixel[channel] = value.clamp(0.0, 255.0) as u8;
        }
    }
}

/// Replace RGB with the BT.601 luma of the pixel.
fn greyscale(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let luma = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
        let luma = luma.round().clamp(0.0, 255.0) as u8;
        pixel[0] = luma;
        pixel[1] = luma;
        pixel[2] = luma;
    }
}

/// Invert every RGB channel.
fn invert(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        pixel[0] = 255 - pixel[0];
        pixel[1] = 255 - pixel[1];
        pixel[2] = 255 - pixel[2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn create_test_image(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    // Test: Brighten shifts channels up and clamps at 255
    #[test]
    fn test_brighten_shifts_and_clamps() {
        let mut image = create_test_image(4, 4, Rgba([100, 200, 30, 77]));

        ImageFilter::Brighten(0.5).apply(&mut image);

        // 0.5 * 255 = 127.5 added per channel
        let pixel = image.get_pixel(2, 2);
        assert_eq!(pixel[0], 227); // 100 + 127.5
        assert_eq!(pixel[1], 255); // 200 + 127.5 clamped
        assert_eq!(pixel[2], 157); // 30 + 127.5
        assert_eq!(pixel[3], 77); // alpha untouched
    }

    // Test: Negative brighten amount darkens and clamps at 0
    #[test]
    fn test_brighten_negative_darkens() {
        let mut image = create_test_image(2, 2, Rgba([100, 200, 0, 255]));

        ImageFilter::Brighten(-0.5).apply(&mut image);

        let pixel = image.get_pixel(0, 0);
        assert_eq!(pixel[0], 0); // 100 - 127.5 clamped
        assert_eq!(pixel[1], 72); // 200 - 127.5
        assert_eq!(pixel[2], 0);
        assert_eq!(pixel[3], 255);
    }

    // Test: Contrast stretches values away from the midpoint
    #[test]
    fn test_contrast_stretches_about_midpoint() {
        let mut image = create_test_image(2, 2, Rgba([100, 200, 30, 128]));

        ImageFilter::Contrast(0.5).apply(&mut image);

        // (v - 127.5) * 1.5 + 127.5
        let pixel = image.get_pixel(1, 1);
        assert_eq!(pixel[0], 86); // 86.25
        assert_eq!(pixel[1], 236); // 236.25
        assert_eq!(pixel[2], 0); // -18.75 clamped
        assert_eq!(pixel[3], 128); // alpha untouched
    }

    // Test: Contrast leaves the exact midpoint fixed
    #[test]
    fn test_contrast_midpoint_nearly_fixed() {
        let mut image = create_test_image(1, 1, Rgba([127, 128, 127, 255]));

        ImageFilter::Contrast(1.0).apply(&mut image);

        let pixel = image.get_pixel(0, 0);
        // 127 -> 126.5, 128 -> 128.5; both stay within one step of the midpoint
        assert_eq!(pixel[0], 126);
        assert_eq!(pixel[1], 128);
    }

    // Test: Greyscale uses BT.601 weights and is idempotent
    #[test]
    fn test_greyscale_is_idempotent() {
        let mut image = create_test_image(3, 3, Rgba([100, 150, 200, 210]));

        ImageFilter::Greyscale.apply(&mut image);

        // 0.299*100 + 0.587*150 + 0.114*200 = 140.75 -> 141
        let pixel = *image.get_pixel(1, 1);
        assert_eq!(pixel, Rgba([141, 141, 141, 210]));

        let once = image.clone();
        ImageFilter::Greyscale.apply(&mut image);
        assert_eq!(image, once);
    }

    // Test: Invert is an involution
    #[test]
    fn test_invert_is_an_involution() {
        let original = create_test_image(5, 5, Rgba([10, 20, 30, 40]));
        let mut image = original.clone();

        ImageFilter::Invert.apply(&mut image);
        let pixel = image.get_pixel(0, 0);
        assert_eq!(pixel[0], 245);
        assert_eq!(pixel[1], 235);
        assert_eq!(pixel[2], 225);
        assert_eq!(pixel[3], 40); // alpha untouched

        ImageFilter::Invert.apply(&mut image);
        assert_eq!(image, original);
    }

    // Test: None leaves the buffer untouched
    #[test]
    fn test_none_is_a_no_op() {
        let original = create_test_image(4, 4, Rgba([9, 8, 7, 6]));
        let mut image = original.clone();

        ImageFilter::None.apply(&mut image);

        assert_eq!(image, original);
    }

    // Test: Known selection labels map to their filters
    #[test]
    fn test_from_selection_maps_known_labels() {
        assert_eq!(
            ImageFilter::from_selection("Make image brighter", 0.5),
            ImageFilter::Brighten(0.5)
        );
        assert_eq!(
            ImageFilter::from_selection("Increase contrast", 0.3),
            ImageFilter::Contrast(0.3)
        );
        assert_eq!(
            ImageFilter::from_selection("Make image b&w", 0.5),
            ImageFilter::Greyscale
        );
        assert_eq!(
            ImageFilter::from_selection("Invert image", 0.5),
            ImageFilter::Invert
        );
    }

    // Test: Unknown labels fall back to None instead of failing
    #[test]
    fn test_from_selection_ignores_unknown_labels() {
        assert_eq!(ImageFilter::from_selection("Sepia tone", 0.5), ImageFilter::None);
        assert_eq!(ImageFilter::from_selection("", 0.5), ImageFilter::None);
    }

    #[test]
    fn test_filter_names() {
        assert_eq!(ImageFilter::None.name(), "none");
        assert_eq!(ImageFilter::Brighten(0.5).name(), "brighten");
        assert_eq!(ImageFilter::Contrast(0.5).name(), "contrast");
        assert_eq!(ImageFilter::Greyscale.name(), "greyscale");
        assert_eq!(ImageFilter::Invert.name(), "invert");
    }
}
