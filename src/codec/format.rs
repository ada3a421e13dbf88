//! Output format identification

/// Raster formats this tool can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Gif,
}

impl OutputFormat {
    /// Map a filename extension to an output format.
    ///
    /// Matching is case sensitive: `jpg` is accepted, `JPG` is not.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "bmp" => Some(OutputFormat::Bmp),
            "tiff" => Some(OutputFormat::Tiff),
            "gif" => Some(OutputFormat::Gif),
            _ => None,
        }
    }

    /// Short lowercase name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Gif => "gif",
        }
    }
}
