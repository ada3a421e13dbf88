//! Watermark module for applying text and image watermarks to images.
//!
//! Text watermarks are rasterized from a built-in bitmap font and anchored
//! per the configured alignment. Image watermarks are centered on the
//! target and faded by a global opacity. Both paths share one compositor.
//!
//! # Features
//!
//! - **Text watermarks** rendered from the built-in 8x8 font at a
//!   configurable scale and color
//! - **Image watermarks** centered with opacity-scaled alpha blending
//! - **Edge clipping** for overlays that do not fit the target

pub mod compositor;
pub mod position;
pub mod text;

// Re-export main types for convenience
pub use compositor::{apply_image_watermark, apply_text_watermark, blend_overlay};
pub use position::{
    calculate_position, centered_position, ImageDimensions, PlacementPosition,
    WatermarkDimensions,
};
pub use text::{measure_text, render_text, TextStyle};
