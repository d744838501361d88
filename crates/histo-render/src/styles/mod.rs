//! The eight histogram style presets.
//!
//! Every style consumes the same [`HistogramData`] shape, never mutates it,
//! and differs only in interpolation, palette, blending, background
//! treatment, and primitive shape.

pub mod interp;

mod elegant_curves;
mod geometric;
mod minimal;
mod neon_glow;
mod original;
mod retro_film;
mod tron;
mod watercolor;

pub use elegant_curves::ElegantCurves;
pub use geometric::Geometric;
pub use minimal::Minimal;
pub use neon_glow::NeonGlow;
pub use original::Original;
pub use retro_film::RetroFilm;
pub use tron::Tron;
pub use watercolor::Watercolor;

use histo_common::{BackgroundMode, HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use crate::plan::{BackgroundSpec, BlendMode, Channel, Point, Primitive, RenderPlan, Shape, Texture};

/// A named rendering style: histogram data in, drawing plan out.
pub trait Style: Send + Sync {
    /// Registry key; exact and case-sensitive.
    fn name(&self) -> &'static str;

    /// Build the drawing plan. Must not mutate `data` and must emit grid
    /// primitives when `cfg.show_grid` is set.
    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan>;
}

impl std::fmt::Debug for dyn Style + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Style").field("name", &self.name()).finish()
    }
}

/// Dark charcoal used by the `dark` background mode unless a style
/// overrides it.
pub const DARK_BACKGROUND: Rgba = Rgba::opaque(0x1A, 0x1A, 0x2E);

/// Fallback fill for `dominant` mode on the (degenerate) empty ranking.
const DOMINANT_FALLBACK: Rgba = Rgba::opaque(0x80, 0x80, 0x80);

/// Resolve the configured background mode into a concrete spec.
///
/// `dark` is the style's identity color where one exists; styles pass their
/// own via `dark_fill`.
pub(crate) fn resolve_background(
    cfg: &RenderConfig,
    data: &HistogramData,
    white_fill: Rgba,
    dark_fill: Rgba,
) -> BackgroundSpec {
    match cfg.background {
        BackgroundMode::White => BackgroundSpec::plain(white_fill).with_texture(Texture::Paper),
        BackgroundMode::Dark => BackgroundSpec::plain(dark_fill).with_texture(Texture::Grain),
        BackgroundMode::Dominant => BackgroundSpec::plain(
            data.dominant_colors()
                .first()
                .map(|c| c.with_alpha(255))
                .unwrap_or(DOMINANT_FALLBACK),
        ),
        BackgroundMode::Transparent => BackgroundSpec::transparent(),
    }
}

/// The three channels in draw order with their normalized curves.
pub(crate) fn channels(data: &HistogramData) -> [(Channel, &[f32]); 3] {
    [
        (Channel::Red, data.red()),
        (Channel::Green, data.green()),
        (Channel::Blue, data.blue()),
    ]
}

/// Grid primitives: three vertical and two horizontal lines.
pub(crate) fn grid_primitives(color: Rgba, opacity: f32, dashed: bool) -> Vec<Primitive> {
    let mut lines = Vec::with_capacity(5);
    for position in [0.25, 0.5, 0.75] {
        lines.push(
            Primitive::new(
                Shape::GridLine {
                    horizontal: false,
                    position,
                    dashed,
                },
                color,
            )
            .opacity(opacity),
        );
    }
    for position in [1.0 / 3.0, 2.0 / 3.0] {
        lines.push(
            Primitive::new(
                Shape::GridLine {
                    horizontal: true,
                    position,
                    dashed,
                },
                color,
            )
            .opacity(opacity),
        );
    }
    lines
}

/// Closed polygon for the region under a curve, optionally clamped to a
/// ceiling. Used by the layered gradient fills.
pub(crate) fn area_under(points: &[Point], ceiling: f32) -> Shape {
    let mut poly: Vec<Point> = points
        .iter()
        .map(|p| Point::new(p.x, p.y.min(ceiling)))
        .collect();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        poly.push(Point::new(last.x, 0.0));
        poly.push(Point::new(first.x, 0.0));
    }
    Shape::Area { points: poly }
}

/// Layered vertical gradient fill under a curve: `layers` stacked clamped
/// areas interpolating `from` at the baseline to `to` at the peak, with an
/// alpha budget spread across the stack.
pub(crate) fn gradient_fill(
    plan: &mut RenderPlan,
    channel: Channel,
    points: &[Point],
    from: Rgba,
    to: Rgba,
    total_alpha: f32,
    layers: usize,
    blend: BlendMode,
) {
    let per_layer = (total_alpha / layers as f32 * 3.0).min(1.0);
    for i in 0..layers {
        let ceiling = (i + 1) as f32 / layers as f32;
        let color = from.lerp(&to, i as f32 / layers as f32);
        plan.push(
            Primitive::new(area_under(points, ceiling), color)
                .channel(channel)
                .opacity(per_layer)
                .blend(blend),
        );
    }
}
