// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for input and overlay images (default: "images")
    #[serde(default = "default_images_dir")]
    pub images_dir: String,

    /// Directory where watermarked results are written (default: "images/outputs")
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// What to do when the output path already exists (default: overwrite)
    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Cosmetic filter settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Watermark rendering settings
    #[serde(default)]
    pub watermark: WatermarkConfig,

    /// Output encoding settings
    #[serde(default)]
    pub encoding: EncodingConfig,
}

/// Behavior when the derived output path is already taken
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file (default)
    #[default]
    Overwrite,
    /// Abort the run with an error
    Reject,
    /// Probe `-2`, `-3`, ... name variants until a free one is found
    Suffix,
}

/// Cosmetic filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Strength passed to brightness/contrast filters, -1.0..=1.0 (default: 0.5)
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

/// Watermark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkConfig {
    /// Global overlay opacity, 0.0..=1.0 (default: 0.5)
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Text watermark styling
    #[serde(default)]
    pub text: TextStyleConfig,
}

/// Styling for rendered text watermarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyleConfig {
    /// Glyph color as #RRGGBB hex (default: "#000000")
    #[serde(default = "default_text_color")]
    pub color: String,

    /// Integer glyph magnification, 1 = 8px glyphs (default: 4)
    #[serde(default = "default_text_scale")]
    pub scale: u32,

    /// Horizontal placement of the watermark (default: center)
    #[serde(default)]
    pub horizontal: HorizontalAlign,

    /// Vertical placement of the watermark (default: middle)
    #[serde(default)]
    pub vertical: VerticalAlign,
}

/// Horizontal watermark anchor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical watermark anchor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Output encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// JPEG quality, 1..=100 (default: 100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_images_dir() -> String {
    "images".to_string()
}

fn default_output_dir() -> String {
    "images/outputs".to_string()
}

fn default_intensity() -> f32 {
    0.5
}

fn default_opacity() -> f32 {
    0.5
}

fn default_text_color() -> String {
    "#000000".to_string()
}

fn default_text_scale() -> u32 {
    4
}

fn default_jpeg_quality() -> u8 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            images_dir: default_images_dir(),
            output_dir: default_output_dir(),
            on_collision: CollisionPolicy::default(),
            filter: FilterConfig::default(),
            watermark: WatermarkConfig::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            intensity: default_intensity(),
        }
    }
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        WatermarkConfig {
            opacity: default_opacity(),
            text: TextStyleConfig::default(),
        }
    }
}

impl Default for TextStyleConfig {
    fn default() -> Self {
        TextStyleConfig {
            color: default_text_color(),
            scale: default_text_scale(),
            horizontal: HorizontalAlign::default(),
            vertical: VerticalAlign::default(),
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        EncodingConfig {
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl TextStyleConfig {
    /// Parse the configured hex color into RGBA bytes (alpha is always 255).
    ///
    /// Accepts `#RRGGBB` and the short `#RGB` form; the leading `#` is
    /// optional.
    pub fn color_rgba(&self) -> Result<[u8; 4], String> {
        let hex = self.color.strip_prefix('#').unwrap_or(&self.color);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!(
                "Invalid text color '{}': expected #RGB or #RRGGBB",
                self.color
            ));
        }
        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let nibble =
                        u8::from_str_radix(&c.to_string(), 16).map_err(|e| e.to_string())?;
                    channels[i] = nibble * 17; // 0xA -> 0xAA
                }
                Ok([channels[0], channels[1], channels[2], 255])
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|e| e.to_string())?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|e| e.to_string())?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|e| e.to_string())?;
                Ok([r, g, b, 255])
            }
            _ => Err(format!(
                "Invalid text color '{}': expected #RGB or #RRGGBB",
                self.color
            )),
        }
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        // Now perform the substitution (we know all vars exist)
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap() // Safe because we checked above
        });

        let config: Config = serde_yaml::from_str(&substituted).map_err(|e| e.to_string())?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.images_dir.trim().is_empty() {
            return Err("images_dir cannot be empty".to_string());
        }

        if self.output_dir.trim().is_empty() {
            return Err("output_dir cannot be empty".to_string());
        }

        if !self.filter.intensity.is_finite()
            || !(-1.0..=1.0).contains(&self.filter.intensity)
        {
            return Err(format!(
                "filter.intensity {} is out of range. Intensity must be between -1.0 and 1.0.",
                self.filter.intensity
            ));
        }

        if !self.watermark.opacity.is_finite()
            || !(0.0..=1.0).contains(&self.watermark.opacity)
        {
            return Err(format!(
                "watermark.opacity {} is out of range. Opacity must be between 0.0 and 1.0.",
                self.watermark.opacity
            ));
        }

        if self.watermark.text.scale < 1 || self.watermark.text.scale > 16 {
            return Err(format!(
                "watermark.text.scale {} is out of range. Scale must be between 1 and 16.",
                self.watermark.text.scale
            ));
        }

        self.watermark.text.color_rgba()?;

        if self.encoding.jpeg_quality < 1 || self.encoding.jpeg_quality > 100 {
            return Err(format!(
                "encoding.jpeg_quality {} is out of range. Quality must be between 1 and 100.",
                self.encoding.jpeg_quality
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.images_dir, "images");
        assert_eq!(config.output_dir, "images/outputs");
        assert_eq!(config.on_collision, CollisionPolicy::Overwrite);
        assert_eq!(config.filter.intensity, 0.5);
        assert_eq!(config.watermark.opacity, 0.5);
        assert_eq!(config.watermark.text.color, "#000000");
        assert_eq!(config.watermark.text.scale, 4);
        assert_eq!(config.watermark.text.horizontal, HorizontalAlign::Center);
        assert_eq!(config.watermark.text.vertical, VerticalAlign::Middle);
        assert_eq!(config.encoding.jpeg_quality, 100);
        config.validate().unwrap();
    }

    #[test]
    fn test_config_can_be_loaded_from_file_path() {
        // Create temporary config file
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_yaml = r##"
images_dir: "assets"
output_dir: "assets/marked"
on_collision: "suffix"

watermark:
  opacity: 0.8
  text:
    color: "#FF8800"
    scale: 2

encoding:
  jpeg_quality: 90
"##;
        temp_file.write_all(config_yaml.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        // Load config from file
        let config = Config::from_file(temp_file.path()).unwrap();

        // Verify config was loaded correctly
        assert_eq!(config.images_dir, "assets");
        assert_eq!(config.output_dir, "assets/marked");
        assert_eq!(config.on_collision, CollisionPolicy::Suffix);
        assert_eq!(config.watermark.opacity, 0.8);
        assert_eq!(config.watermark.text.color, "#FF8800");
        assert_eq!(config.watermark.text.scale, 2);
        assert_eq!(config.encoding.jpeg_quality, 90);
        // Omitted sections keep their defaults
        assert_eq!(config.filter.intensity, 0.5);
        assert_eq!(config.watermark.text.horizontal, HorizontalAlign::Center);
    }

    #[test]
    fn test_empty_mapping_uses_all_defaults() {
        let config = Config::from_yaml_with_env("{}").unwrap();
        assert_eq!(config.images_dir, "images");
        assert_eq!(config.output_dir, "images/outputs");
        config.validate().unwrap();
    }

    #[test]
    fn test_env_var_substitution_in_config() {
        std::env::set_var("AQUAMARK_TEST_OUTPUT", "images/custom");
        let yaml = r#"
output_dir: "${AQUAMARK_TEST_OUTPUT}"
"#;
        let config = Config::from_yaml_with_env(yaml).unwrap();
        assert_eq!(config.output_dir, "images/custom");
        std::env::remove_var("AQUAMARK_TEST_OUTPUT");
    }

    #[test]
    fn test_missing_env_var_is_an_error() {
        let yaml = r#"
output_dir: "${AQUAMARK_UNSET_VAR_FOR_TEST}"
"#;
        let result = Config::from_yaml_with_env(yaml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("AQUAMARK_UNSET_VAR_FOR_TEST"));
    }

    #[test]
    fn test_validation_rejects_out_of_range_opacity() {
        let mut config = Config::default();
        config.watermark.opacity = 1.5;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("watermark.opacity"));
    }

    #[test]
    fn test_validation_rejects_out_of_range_intensity() {
        let mut config = Config::default();
        config.filter.intensity = -2.0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("filter.intensity"));
    }

    #[test]
    fn test_validation_rejects_bad_color() {
        let mut config = Config::default();
        config.watermark.text.color = "red".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid text color"));
    }

    #[test]
    fn test_validation_rejects_zero_jpeg_quality() {
        let mut config = Config::default();
        config.encoding.jpeg_quality = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("jpeg_quality"));
    }

    #[test]
    fn test_validation_rejects_empty_dirs() {
        let mut config = Config::default();
        config.images_dir = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_color_rgba_parses_hex() {
        let style = TextStyleConfig {
            color: "#FF8800".to_string(),
            ..TextStyleConfig::default()
        };
        assert_eq!(style.color_rgba().unwrap(), [255, 136, 0, 255]);

        // Leading '#' is optional
        let style = TextStyleConfig {
            color: "102030".to_string(),
            ..TextStyleConfig::default()
        };
        assert_eq!(style.color_rgba().unwrap(), [16, 32, 48, 255]);

        // Short #RGB form expands each nibble
        let style = TextStyleConfig {
            color: "#F80".to_string(),
            ..TextStyleConfig::default()
        };
        assert_eq!(style.color_rgba().unwrap(), [255, 136, 0, 255]);
    }

    #[test]
    fn test_validation_rejects_oversized_scale() {
        let mut config = Config::default();
        config.watermark.text.scale = 40;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("watermark.text.scale"));
    }

    #[test]
    fn test_collision_policy_parses_lowercase_names() {
        let config = Config::from_yaml_with_env("on_collision: \"reject\"").unwrap();
        assert_eq!(config.on_collision, CollisionPolicy::Reject);

        let config = Config::from_yaml_with_env("on_collision: \"overwrite\"").unwrap();
        assert_eq!(config.on_collision, CollisionPolicy::Overwrite);
    }
}
