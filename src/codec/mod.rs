//! Image decoding and encoding
//!
//! The pipeline works on RGBA row-major buffers. This module turns file
//! bytes into such a buffer and turns the processed buffer back into an
//! encoded container for the chosen output format.

pub mod encoder;
pub mod format;

pub use encoder::{EncodedImage, EncoderFactory, EncoderQuality, ImageEncoder};
pub use format::OutputFormat;

use image::io::Reader as ImageReader;
use image::RgbaImage;
use std::io::Cursor;
use std::path::Path;

use crate::error::PipelineError;

/// Decode raw file bytes into an RGBA buffer
///
/// The container format is sniffed from the bytes, not the filename, so
/// a mislabeled file still decodes if its content is readable. The path
/// is only used for error reporting.
pub fn decode_image(path: &Path, data: &[u8]) -> Result<RgbaImage, PipelineError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| PipelineError::decode_failed(path, e.to_string()))?
        .decode()
        .map_err(|e| PipelineError::decode_failed(path, e.to_string()))?;

    Ok(img.to_rgba8())
}

/// Encode an RGBA buffer to the given output format
pub fn encode_image(
    image: &RgbaImage,
    format: OutputFormat,
    quality: EncoderQuality,
) -> Result<EncodedImage, PipelineError> {
    let encoder = EncoderFactory::create(format);
    encoder.encode(image.as_raw(), image.width(), image.height(), quality)
}
