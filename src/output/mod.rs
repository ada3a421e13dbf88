//! Output path resolution and collision handling.
//!
//! Derives the destination path for a processed image from the input
//! filename and decides what to do when that path is already taken.
//!
//! # Features
//!
//! - Pure name/extension split on the first `.` of the input filename
//! - Case-sensitive extension allow-list shared with the encoders
//! - Overwrite, reject, or numeric-suffix collision policies

use std::path::{Path, PathBuf};

use crate::codec::OutputFormat;
use crate::config::CollisionPolicy;
use crate::error::PipelineError;

/// Destination path plus the encoder format derived from the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    pub path: PathBuf,
    pub format: OutputFormat,
}

/// Derive the output path for `input_filename` inside `output_dir`.
///
/// The filename is split on its first `.`; everything after that dot is
/// the extension and must be one of the supported formats. The result is
/// `<output_dir>/<name>-with-watermark.<extension>`.
///
/// Pure path computation, performs no filesystem access.
pub fn resolve_output_path(
    input_filename: &str,
    output_dir: impl AsRef<Path>,
) -> Result<ResolvedOutput, PipelineError> {
    let (name, extension) = match input_filename.split_once('.') {
        Some(parts) => parts,
        None => {
            return Err(PipelineError::unsupported_format(
                input_filename,
                "no file extension",
            ))
        }
    };

    if name.is_empty() {
        return Err(PipelineError::unsupported_format(
            input_filename,
            "empty file name",
        ));
    }
    if extension.is_empty() {
        return Err(PipelineError::unsupported_format(
            input_filename,
            "empty file extension",
        ));
    }

    let format = OutputFormat::from_extension(extension).ok_or_else(|| {
        PipelineError::unsupported_format(
            input_filename,
            format!("extension '{}' is not supported", extension),
        )
    })?;

    let file_name = format!("{}-with-watermark.{}", name, extension);
    Ok(ResolvedOutput {
        path: output_dir.as_ref().join(file_name),
        format,
    })
}

/// Apply the configured collision policy to the resolved path.
///
/// Returns the path the caller should write to, which for
/// [`CollisionPolicy::Suffix`] may carry a numeric suffix.
pub async fn apply_collision_policy(
    path: &Path,
    policy: CollisionPolicy,
) -> Result<PathBuf, PipelineError> {
    match policy {
        CollisionPolicy::Overwrite => Ok(path.to_path_buf()),
        CollisionPolicy::Reject => {
            if path_exists(path).await? {
                Err(PipelineError::output_exists(path))
            } else {
                Ok(path.to_path_buf())
            }
        }
        CollisionPolicy::Suffix => next_free_path(path).await,
    }
}

/// Probe `name-2`, `name-3`, ... until a free path is found.
async fn next_free_path(path: &Path) -> Result<PathBuf, PipelineError> {
    if !path_exists(path).await? {
        return Ok(path.to_path_buf());
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or_default();
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut counter = 2u32;
    loop {
        let candidate = parent.join(format!("{}-{}.{}", stem, counter, extension));
        if !path_exists(&candidate).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

async fn path_exists(path: &Path) -> Result<bool, PipelineError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| PipelineError::io_failed(path, e.to_string()))
}
