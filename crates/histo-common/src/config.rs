//! Render request configuration.
//!
//! This is the whole configuration surface of the core pipeline. Values are
//! deserializable from JSON with per-field defaults so partial requests work.

use serde::{Deserialize, Serialize};

use crate::error::{HistoError, HistoResult};

/// Width-to-height ratio of the output canvas.
pub const GOLDEN_RATIO: f64 = 1.618;

/// Maximum output width in pixels.
pub const MAX_WIDTH: u32 = 4096;

/// Inclusive bin count range for the histogram engine.
pub const MIN_BINS: usize = 2;
pub const MAX_BINS: usize = 1024;

/// Largest accepted source-image dimension. Buffers beyond this are
/// rejected rather than silently downscaled.
pub const MAX_PIXEL_DIMENSION: u32 = 8192;

/// Serialized output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// Whether the format can carry a transparent background.
    pub fn supports_alpha(&self) -> bool {
        match self {
            OutputFormat::Png | OutputFormat::Svg => true,
            OutputFormat::Pdf => false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.extension()
    }
}

/// Background fill mode for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// White with a subtle paper texture.
    White,
    /// Dark charcoal with grain.
    Dark,
    /// Filled with the most prevalent source color.
    Dominant,
    /// No background; requires an alpha-capable output format.
    Transparent,
}

/// Configuration for one render request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Style preset name, resolved against the registry.
    #[serde(default = "default_style")]
    pub style: String,

    /// Serialization format for the output bytes.
    #[serde(default = "default_format")]
    pub output_format: OutputFormat,

    /// Output width in pixels, 1..=4096.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas background treatment.
    #[serde(default = "default_background")]
    pub background: BackgroundMode,

    /// Emit grid primitives behind the histogram.
    #[serde(default)]
    pub show_grid: bool,

    /// Curve smoothing factor in [0, 1].
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,

    /// Histogram bin count per channel, 2..=1024.
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Explicit output height, bypassing the golden-ratio rule.
    #[serde(default)]
    pub height_override: Option<u32>,
}

fn default_style() -> String {
    "elegant_curves".to_string()
}
fn default_format() -> OutputFormat {
    OutputFormat::Png
}
fn default_width() -> u32 {
    1200
}
fn default_background() -> BackgroundMode {
    BackgroundMode::White
}
fn default_smoothing() -> f32 {
    0.7
}
fn default_bins() -> usize {
    256
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            output_format: default_format(),
            width: default_width(),
            background: default_background(),
            show_grid: false,
            smoothing: default_smoothing(),
            bins: default_bins(),
            height_override: None,
        }
    }
}

impl RenderConfig {
    /// Check numeric ranges. Runs before any rendering work.
    pub fn validate(&self) -> HistoResult<()> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(HistoError::InvalidInput(format!(
                "width {} out of range 1..={}",
                self.width, MAX_WIDTH
            )));
        }
        if let Some(h) = self.height_override {
            if h == 0 || h > MAX_WIDTH {
                return Err(HistoError::InvalidInput(format!(
                    "height override {} out of range 1..={}",
                    h, MAX_WIDTH
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(HistoError::InvalidInput(format!(
                "smoothing {} out of range 0..=1",
                self.smoothing
            )));
        }
        if self.bins < MIN_BINS || self.bins > MAX_BINS {
            return Err(HistoError::InvalidInput(format!(
                "bins {} out of range {}..={}",
                self.bins, MIN_BINS, MAX_BINS
            )));
        }
        Ok(())
    }

    /// Reject combinations that are individually valid but cannot be
    /// honored together. Detected before rendering starts, never mid-render.
    pub fn check_compatibility(&self) -> HistoResult<()> {
        if self.background == BackgroundMode::Transparent
            && !self.output_format.supports_alpha()
        {
            return Err(HistoError::UnsupportedConfig(format!(
                "transparent background is not representable in {} output",
                self.output_format.name()
            )));
        }
        Ok(())
    }

    /// Output height: explicit override, or derived from the golden ratio.
    pub fn output_height(&self) -> u32 {
        match self.height_override {
            Some(h) => h,
            None => derive_height(self.width),
        }
    }
}

/// Golden-ratio height for a given width, never below one pixel.
pub fn derive_height(width: u32) -> u32 {
    ((width as f64 / GOLDEN_RATIO).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_height_golden_ratio() {
        assert_eq!(derive_height(1200), 742);
        assert_eq!(derive_height(1618), 1000);
        assert_eq!(derive_height(1), 1);
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let cfg: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.style, "elegant_curves");
        assert_eq!(cfg.output_format, OutputFormat::Png);
        assert_eq!(cfg.width, 1200);
        assert_eq!(cfg.bins, 256);
        assert!(!cfg.show_grid);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        let mut cfg = RenderConfig::default();
        cfg.width = 0;
        assert!(cfg.validate().is_err());
        cfg.width = 4097;
        assert!(cfg.validate().is_err());
        cfg.width = 4096;
        assert!(cfg.validate().is_ok());

        cfg.smoothing = 1.01;
        assert!(cfg.validate().is_err());
        cfg.smoothing = 0.0;
        assert!(cfg.validate().is_ok());

        cfg.bins = 1;
        assert!(cfg.validate().is_err());
        cfg.bins = 1025;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_transparent_pdf_incompatible() {
        let cfg = RenderConfig {
            background: BackgroundMode::Transparent,
            output_format: OutputFormat::Pdf,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
        assert!(matches!(
            cfg.check_compatibility(),
            Err(HistoError::UnsupportedConfig(_))
        ));
    }
}
