//! Watermark compositing engine.
//!
//! Blends a watermark layer onto a target image with alpha compositing.
//!
//! # Features
//!
//! - Image overlays, centered on the target and faded by a global opacity
//! - Text overlays rendered from the built-in bitmap font and aligned per
//!   the configured anchor
//! - Clipping of overlays that extend past the image edges
//!
//! # Example
//!
//! ```ignore
//! use aquamark::watermark::compositor::apply_image_watermark;
//!
//! let mut photo = image::open("photo.jpg")?.to_rgba8();
//! let logo = image::open("logo.png")?.to_rgba8();
//! apply_image_watermark(&mut photo, &logo, 0.5);
//! ```

use image::{Rgba, RgbaImage};

use crate::config::{HorizontalAlign, VerticalAlign};
use crate::watermark::position::{
    calculate_position, centered_position, ImageDimensions, PlacementPosition,
    WatermarkDimensions,
};
use crate::watermark::text::{render_text, TextStyle};

/// Blend an image overlay onto the target, centered on both axes.
///
/// `opacity` scales the overlay's own alpha channel and is clamped to
/// `[0.0, 1.0]`. Overlays larger than the target are clipped.
pub fn apply_image_watermark(target: &mut RgbaImage, overlay: &RgbaImage, opacity: f32) {
    let position = centered_position(
        &ImageDimensions {
            width: target.width(),
            height: target.height(),
        },
        &WatermarkDimensions {
            width: overlay.width(),
            height: overlay.height(),
        },
    );
    blend_overlay(target, overlay, position, opacity);
}

/// Render `text` with the built-in font and blend it onto the target at
/// the given alignment.
///
/// Empty text leaves the target untouched.
pub fn apply_text_watermark(
    target: &mut RgbaImage,
    text: &str,
    style: &TextStyle,
    horizontal: HorizontalAlign,
    vertical: VerticalAlign,
) {
    if text.is_empty() {
        return;
    }

    let layer = render_text(text, style);
    let position = calculate_position(
        horizontal,
        vertical,
        &ImageDimensions {
            width: target.width(),
            height: target.height(),
        },
        &WatermarkDimensions {
            width: layer.width(),
            height: layer.height(),
        },
    );
    // Glyph pixels carry their own alpha, no global fade for text
    blend_overlay(target, &layer, position, 1.0);
}

/// Blend an overlay onto the target at the given offset.
///
/// The offset may be negative; only the overlapping region is touched.
pub fn blend_overlay(
    target: &mut RgbaImage,
    overlay: &RgbaImage,
    position: PlacementPosition,
    opacity: f32,
) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;
    let overlay_width = overlay.width() as i32;
    let overlay_height = overlay.height() as i32;

    // Calculate the visible region (clamp to target bounds)
    let x_start = position.x.max(0);
    let y_start = position.y.max(0);
    let x_end = (position.x + overlay_width).min(target_width);
    let y_end = (position.y + overlay_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let ox = (tx - position.x) as u32;
            let oy = (ty - position.y) as u32;

            let overlay_pixel = overlay.get_pixel(ox, oy);
            let target_pixel = target.get_pixel(tx as u32, ty as u32);

            let blended = blend_pixels(*overlay_pixel, *target_pixel, opacity);
            target.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

/// Blend a foreground pixel over a background pixel.
///
/// Uses the "over" operator with the foreground alpha scaled by `opacity`:
/// result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(foreground: Rgba<u8>, background: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);

    // Fully transparent or fully opaque foreground needs no arithmetic
    if fg_alpha <= 0.0 {
        return background;
    }
    if fg_alpha >= 1.0 {
        return foreground;
    }

    let bg_alpha = background[3] as f32 / 255.0;

    // Porter-Duff "over" operator
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}
