//! Histogram computation and dominant-color extraction.
//!
//! Both operations are pure functions over an immutable [`PixelBuffer`]:
//! - per-channel bin tally, Gaussian smoothing, per-channel renormalization
//! - color-space bucket quantization and frequency ranking
//!
//! [`PixelBuffer`]: histo_common::PixelBuffer

pub mod dominant;
pub mod histogram;

use histo_common::Rgb;

pub use dominant::extract_dominant_colors;
pub use histogram::{compute_histogram, tally_channels};

/// Number of color channels in the histogram (R, G, B).
pub const CHANNELS: usize = 3;

/// Normalized per-channel histogram data plus ranked dominant colors.
///
/// Created once per request and immutable thereafter; every field is only
/// ever read by the style layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramData {
    red: Vec<f32>,
    green: Vec<f32>,
    blue: Vec<f32>,
    dominant_colors: Vec<Rgb>,
}

impl HistogramData {
    /// Assemble from engine outputs. All three channels must share one bin
    /// count; callers get that for free from [`compute_histogram`].
    pub fn new(channels: [Vec<f32>; 3], dominant_colors: Vec<Rgb>) -> Self {
        let [red, green, blue] = channels;
        debug_assert_eq!(red.len(), green.len());
        debug_assert_eq!(red.len(), blue.len());
        Self {
            red,
            green,
            blue,
            dominant_colors,
        }
    }

    pub fn bins(&self) -> usize {
        self.red.len()
    }

    pub fn red(&self) -> &[f32] {
        &self.red
    }

    pub fn green(&self) -> &[f32] {
        &self.green
    }

    pub fn blue(&self) -> &[f32] {
        &self.blue
    }

    /// Dominant colors ranked by prevalence, most frequent first.
    pub fn dominant_colors(&self) -> &[Rgb] {
        &self.dominant_colors
    }
}
