//! Watermarking pipeline.
//!
//! Drives a single job through its stages: validate the referenced files,
//! resolve the output path, decode the input, composite the watermark,
//! apply the cosmetic filter, encode, and write the result. The first
//! failing stage aborts the run; no partial output is ever written.
//!
//! # Example
//!
//! ```ignore
//! use aquamark::config::Config;
//! use aquamark::filter::ImageFilter;
//! use aquamark::pipeline::{self, WatermarkJob, WatermarkKind};
//!
//! let config = Config::default();
//! let job = WatermarkJob {
//!     input_file: "test.jpg".to_string(),
//!     filter: ImageFilter::Greyscale,
//!     watermark: WatermarkKind::Text {
//!         text: "Hello".to_string(),
//!     },
//! };
//! let outcome = pipeline::run(&job, &config).await?;
//! println!("written to {}", outcome.output_path.display());
//! ```

use std::path::{Path, PathBuf};

use image::Rgba;
use tracing::{debug, info};

use crate::codec::{self, EncoderQuality};
use crate::config::Config;
use crate::error::PipelineError;
use crate::filter::ImageFilter;
use crate::output;
use crate::watermark::{apply_image_watermark, apply_text_watermark, TextStyle};

/// Watermark requested for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkKind {
    /// Render the text with the built-in font and composite it.
    Text { text: String },
    /// Composite an overlay file from the images directory.
    Image { file: String },
}

/// One watermarking request.
#[derive(Debug, Clone)]
pub struct WatermarkJob {
    /// Filename inside the configured images directory.
    pub input_file: String,
    /// Cosmetic filter applied after the watermark.
    pub filter: ImageFilter,
    /// Watermark to composite.
    pub watermark: WatermarkKind,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Where the watermarked image was written.
    pub output_path: PathBuf,
}

/// Run one job start to finish.
pub async fn run(job: &WatermarkJob, config: &Config) -> Result<JobOutcome, PipelineError> {
    let input_path = Path::new(&config.images_dir).join(&job.input_file);
    ensure_exists(&input_path).await?;

    let overlay_path = match &job.watermark {
        WatermarkKind::Image { file } => {
            let path = Path::new(&config.images_dir).join(file);
            ensure_exists(&path).await?;
            Some(path)
        }
        WatermarkKind::Text { .. } => None,
    };
    debug!(input = %input_path.display(), "input files validated");

    let resolved = output::resolve_output_path(&job.input_file, &config.output_dir)?;
    debug!(
        output = %resolved.path.display(),
        format = resolved.format.name(),
        "output path resolved"
    );

    let input_bytes = read_file(&input_path).await?;
    let mut image = codec::decode_image(&input_path, &input_bytes)?;
    debug!(width = image.width(), height = image.height(), "input decoded");

    match &job.watermark {
        WatermarkKind::Text { text } => {
            let style = TextStyle {
                // Validated at startup; falls back to black
                color: Rgba(config.watermark.text.color_rgba().unwrap_or([0, 0, 0, 255])),
                scale: config.watermark.text.scale,
            };
            apply_text_watermark(
                &mut image,
                text,
                &style,
                config.watermark.text.horizontal,
                config.watermark.text.vertical,
            );
            debug!(text = %text, "text watermark composited");
        }
        WatermarkKind::Image { file } => {
            // overlay_path is always present for image watermarks
            if let Some(path) = &overlay_path {
                let overlay_bytes = read_file(path).await?;
                let overlay = codec::decode_image(path, &overlay_bytes)?;
                apply_image_watermark(&mut image, &overlay, config.watermark.opacity);
                debug!(overlay = %file, "image watermark composited");
            }
        }
    }

    job.filter.apply(&mut image);
    debug!(filter = job.filter.name(), "filter applied");

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| PipelineError::io_failed(&config.output_dir, e.to_string()))?;

    let output_path = output::apply_collision_policy(&resolved.path, config.on_collision).await?;

    let quality = EncoderQuality::with_quality(config.encoding.jpeg_quality);
    let encoded = codec::encode_image(&image, resolved.format, quality)?;

    tokio::fs::write(&output_path, &encoded.data)
        .await
        .map_err(|e| PipelineError::io_failed(&output_path, e.to_string()))?;

    info!(output = %output_path.display(), "watermarked image written");
    Ok(JobOutcome { output_path })
}

async fn ensure_exists(path: &Path) -> Result<(), PipelineError> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(PipelineError::not_found(path)),
        Err(e) => Err(PipelineError::io_failed(path, e.to_string())),
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, PipelineError> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PipelineError::not_found(path),
        _ => PipelineError::io_failed(path, e.to_string()),
    })
}
