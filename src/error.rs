//! Pipeline error types
//!
//! Every stage failure is mapped to one of these kinds at the pipeline
//! boundary. The host layer shows a single generic retry message; the
//! distinct kinds exist for logging and test assertions.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during a watermarking run
#[derive(Debug, Clone)]
pub enum PipelineError {
    /// Input or overlay file does not exist
    NotFound { path: PathBuf },
    /// Input filename has no usable name/extension or an extension
    /// outside the supported set
    UnsupportedFormat { filename: String, reason: String },
    /// File exists but its bytes are not a readable raster
    Decode { path: PathBuf, message: String },
    /// Encoding the processed buffer to the output format failed
    Encode { format: String, message: String },
    /// Filesystem failure while reading input or writing the result
    Io { path: PathBuf, message: String },
    /// Derived output path is already taken and the collision policy
    /// rejects overwriting
    OutputExists { path: PathBuf },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            PipelineError::UnsupportedFormat { filename, reason } => {
                write!(f, "Unsupported input file '{}': {}", filename, reason)
            }
            PipelineError::Decode { path, message } => {
                write!(f, "Failed to decode {}: {}", path.display(), message)
            }
            PipelineError::Encode { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
            PipelineError::Io { path, message } => {
                write!(f, "I/O error on {}: {}", path.display(), message)
            }
            PipelineError::OutputExists { path } => {
                write!(f, "Output file already exists: {}", path.display())
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl PipelineError {
    /// Stable label for the error kind, used in structured log fields
    /// and test assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NotFound { .. } => "not_found",
            PipelineError::UnsupportedFormat { .. } => "unsupported_format",
            PipelineError::Decode { .. } => "decode",
            PipelineError::Encode { .. } => "encode",
            PipelineError::Io { .. } => "io",
            PipelineError::OutputExists { .. } => "output_exists",
        }
    }

    /// Helper constructors for common error patterns
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        PipelineError::NotFound { path: path.into() }
    }

    pub fn unsupported_format(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::UnsupportedFormat {
            filename: filename.into(),
            reason: reason.into(),
        }
    }

    pub fn decode_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PipelineError::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn io_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PipelineError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        PipelineError::OutputExists { path: path.into() }
    }
}
