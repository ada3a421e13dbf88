//! Position calculation for watermark placement.
//!
//! Maps the configured horizontal/vertical alignment to the pixel offset
//! where a watermark layer lands on the target image.
//!
//! # Example
//!
//! ```ignore
//! use aquamark::config::{HorizontalAlign, VerticalAlign};
//! use aquamark::watermark::position::{calculate_position, ImageDimensions, WatermarkDimensions};
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let watermark = WatermarkDimensions { width: 100, height: 50 };
//!
//! let pos = calculate_position(
//!     HorizontalAlign::Center,
//!     VerticalAlign::Middle,
//!     &image,
//!     &watermark,
//! );
//! assert_eq!((pos.x, pos.y), (350, 275));
//! ```

use crate::config::{HorizontalAlign, VerticalAlign};

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the watermark to be placed.
#[derive(Debug, Clone, Copy)]
pub struct WatermarkDimensions {
    pub width: u32,
    pub height: u32,
}

/// Offset of the watermark's top-left corner on the target image.
///
/// Coordinates may be negative when the watermark is larger than the
/// image; the compositor clips the invisible part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Calculate the placement offset for the given alignment pair.
pub fn calculate_position(
    horizontal: HorizontalAlign,
    vertical: VerticalAlign,
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
) -> PlacementPosition {
    let img_w = image.width as i32;
    let img_h = image.height as i32;
    let wm_w = watermark.width as i32;
    let wm_h = watermark.height as i32;

    let x = match horizontal {
        HorizontalAlign::Left => 0,
        HorizontalAlign::Center => (img_w - wm_w) / 2,
        HorizontalAlign::Right => img_w - wm_w,
    };

    let y = match vertical {
        VerticalAlign::Top => 0,
        VerticalAlign::Middle => (img_h - wm_h) / 2,
        VerticalAlign::Bottom => img_h - wm_h,
    };

    PlacementPosition::new(x, y)
}

/// Placement for an image overlay, always centered on both axes.
pub fn centered_position(
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
) -> PlacementPosition {
    calculate_position(
        HorizontalAlign::Center,
        VerticalAlign::Middle,
        image,
        watermark,
    )
}
