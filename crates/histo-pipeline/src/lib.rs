//! End-to-end render pipeline: pixels in, serialized artwork out.
//!
//! Stages run in a fixed order with cancellation checkpoints between them:
//! validation, histogram computation, dominant-color extraction, style
//! planning, compositing. Every failure mode is detected as early as the
//! data allows.

use tracing::{debug, info};

use histo_common::config::MAX_PIXEL_DIMENSION;
use histo_common::{
    CancelToken, HistoError, HistoResult, PixelBuffer, RenderConfig, Rgb,
};
use histo_engine::{compute_histogram, extract_dominant_colors, HistogramData};
use histo_render::{composite, StyleRegistry};

/// Dominant colors reported alongside the artwork.
const DOMINANT_COLOR_COUNT: usize = 5;

/// Finished render: serialized bytes plus the metadata callers surface.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub dominant_colors: Vec<Rgb>,
}

/// The render pipeline. Owns the style registry; one instance serves any
/// number of sequential or concurrent renders.
pub struct Pipeline {
    registry: StyleRegistry,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            registry: StyleRegistry::new(),
        }
    }

    /// Registered style names, sorted.
    pub fn style_names(&self) -> Vec<&'static str> {
        self.registry.style_names()
    }

    /// Run the full pipeline for one request.
    pub fn run(
        &self,
        pixels: &PixelBuffer,
        cfg: &RenderConfig,
        cancel: &CancelToken,
    ) -> HistoResult<RenderOutput> {
        cfg.validate()?;
        cfg.check_compatibility()?;
        let style = self.registry.resolve(&cfg.style)?;
        check_dimensions(pixels)?;
        cancel.checkpoint()?;

        info!(
            style = %cfg.style,
            format = cfg.output_format.extension(),
            width = cfg.width,
            pixels = pixels.pixel_count(),
            "starting render"
        );

        let channels = compute_histogram(pixels, cfg.bins, cfg.smoothing)?;
        cancel.checkpoint()?;

        let dominant = extract_dominant_colors(pixels, DOMINANT_COLOR_COUNT)?;
        cancel.checkpoint()?;

        let data = HistogramData::new(channels, dominant.clone());
        let plan = style.render(&data, cfg)?;
        debug!(
            primitives = plan.primitives.len(),
            grid = plan.grid_count(),
            "style plan built"
        );
        cancel.checkpoint()?;

        let output = composite(&plan, cfg)?;
        info!(
            bytes = output.bytes.len(),
            width = output.width,
            height = output.height,
            "render complete"
        );

        Ok(RenderOutput {
            bytes: output.bytes,
            mime_type: cfg.output_format.mime_type(),
            width: output.width,
            height: output.height,
            dominant_colors: dominant,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Source images beyond the dimension cap are rejected, not downscaled.
fn check_dimensions(pixels: &PixelBuffer) -> HistoResult<()> {
    let max = MAX_PIXEL_DIMENSION;
    if pixels.width() > max || pixels.height() > max {
        return Err(HistoError::InvalidInput(format!(
            "source image {}x{} exceeds the {}px dimension cap",
            pixels.width(),
            pixels.height(),
            max
        )));
    }
    Ok(())
}
