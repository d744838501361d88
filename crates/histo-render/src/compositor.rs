//! Plan-to-bytes compositing.
//!
//! The raster path draws onto a tiny-skia pixmap and hands the pixels to
//! the PNG encoder; the vector paths delegate to the SVG and PDF
//! serializers. All three walk the same primitive order.

use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};
use tracing::debug;

use histo_common::{HistoError, HistoResult, OutputFormat, RenderConfig, Rgba};

use crate::canvas::Layout;
use crate::pdf;
use crate::plan::{BlendMode, Point, Primitive, RenderPlan, Shape, Texture};
use crate::png;
use crate::styles::interp::Noise;
use crate::svg;

const PAPER_SEED: u64 = 7;
const GRAIN_SEED: u64 = 9;

/// Serialized render with its final pixel dimensions.
#[derive(Debug, Clone)]
pub struct CompositeOutput {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Serialize a plan into the configured output format.
pub fn composite(plan: &RenderPlan, cfg: &RenderConfig) -> HistoResult<CompositeOutput> {
    let layout = Layout::new(cfg.width, cfg.output_height());
    ensure_supported(plan, cfg.output_format)?;

    let bytes = match cfg.output_format {
        OutputFormat::Png => rasterize(plan, &layout)?,
        OutputFormat::Svg => svg::serialize(plan, &layout)?,
        OutputFormat::Pdf => pdf::serialize(plan, &layout)?,
    };

    debug!(
        format = cfg.output_format.extension(),
        width = layout.width,
        height = layout.height,
        primitives = plan.primitives.len(),
        bytes = bytes.len(),
        "composited plan"
    );

    Ok(CompositeOutput {
        bytes,
        width: layout.width,
        height: layout.height,
    })
}

/// Reject primitive kinds a backend cannot draw before any work happens,
/// so a failed render never produces partial output.
fn ensure_supported(plan: &RenderPlan, format: OutputFormat) -> HistoResult<()> {
    if format == OutputFormat::Pdf {
        if let Some(p) = plan
            .primitives
            .iter()
            .find(|p| matches!(p.shape, Shape::Stipple { .. }))
        {
            return Err(HistoError::RenderError(format!(
                "{} primitives are not supported in {} output",
                p.shape.kind(),
                format.extension()
            )));
        }
    }
    Ok(())
}

fn rasterize(plan: &RenderPlan, layout: &Layout) -> HistoResult<Vec<u8>> {
    let mut pixmap = Pixmap::new(layout.width, layout.height).ok_or_else(|| {
        HistoError::RenderError(format!(
            "cannot allocate {}x{} canvas",
            layout.width, layout.height
        ))
    })?;

    if let Some(fill) = plan.background.fill {
        pixmap.fill(to_color(fill, 255));
        if let Some(texture) = plan.background.texture {
            apply_texture(&mut pixmap, texture);
        }
    }

    let scale = layout.stroke_scale();
    for primitive in &plan.primitives {
        draw_primitive(&mut pixmap, primitive, layout, scale);
    }

    if plan.background.vignette {
        apply_vignette(&mut pixmap);
    }

    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    png::encode(&rgba, layout.width, layout.height)
}

fn draw_primitive(pixmap: &mut Pixmap, primitive: &Primitive, layout: &Layout, scale: f32) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(
        primitive.color.r,
        primitive.color.g,
        primitive.color.b,
        primitive.effective_alpha(),
    );
    paint.anti_alias = true;
    paint.blend_mode = match primitive.blend {
        BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
        BlendMode::Additive => tiny_skia::BlendMode::Plus,
    };

    match &primitive.shape {
        Shape::Curve {
            points,
            width,
            dashed,
        } => {
            if let Some(path) = polyline_path(points, layout) {
                let stroke = Stroke {
                    width: width * scale,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    dash: dash_pattern(*dashed, scale),
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        Shape::Area { points } => {
            if let Some(path) = polygon_path(points, layout) {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        Shape::Bar { x, width, height } => {
            let (left, top) = layout.map(Point::new(*x, *height));
            let (right, bottom) = layout.map(Point::new(*x + *width, 0.0));
            if let Some(rect) = Rect::from_ltrb(left, top, right, bottom) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
        Shape::Stipple { dots, radius } => {
            let mut pb = PathBuilder::new();
            for dot in dots {
                let (cx, cy) = layout.map(*dot);
                pb.push_circle(cx, cy, radius * scale);
            }
            if let Some(path) = pb.finish() {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        Shape::GridLine {
            horizontal,
            position,
            dashed,
        } => {
            let (start, end) = if *horizontal {
                (
                    layout.map(Point::new(0.0, *position)),
                    layout.map(Point::new(1.0, *position)),
                )
            } else {
                (
                    layout.map(Point::new(*position, 0.0)),
                    layout.map(Point::new(*position, 1.0)),
                )
            };
            let mut pb = PathBuilder::new();
            pb.move_to(start.0, start.1);
            pb.line_to(end.0, end.1);
            if let Some(path) = pb.finish() {
                let stroke = Stroke {
                    width: scale.max(1.0),
                    dash: dash_pattern(*dashed, scale),
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }
}

fn polyline_path(points: &[Point], layout: &Layout) -> Option<tiny_skia::Path> {
    if points.len() < 2 {
        return None;
    }
    let mut pb = PathBuilder::new();
    for (i, point) in points.iter().enumerate() {
        let (x, y) = layout.map(*point);
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.finish()
}

fn polygon_path(points: &[Point], layout: &Layout) -> Option<tiny_skia::Path> {
    if points.len() < 3 {
        return None;
    }
    let mut pb = PathBuilder::new();
    for (i, point) in points.iter().enumerate() {
        let (x, y) = layout.map(*point);
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    pb.finish()
}

fn dash_pattern(dashed: bool, scale: f32) -> Option<StrokeDash> {
    if dashed {
        StrokeDash::new(vec![8.0 * scale, 6.0 * scale], 0.0)
    } else {
        None
    }
}

fn to_color(rgba: Rgba, alpha: u8) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha.min(rgba.a))
}

/// Deterministic per-pixel luminance noise over the background fill. Runs
/// before any primitives, while every covered pixel is still opaque.
fn apply_texture(pixmap: &mut Pixmap, texture: Texture) {
    let (seed, amplitude) = match texture {
        Texture::Paper => (PAPER_SEED, 4.0),
        Texture::Grain => (GRAIN_SEED, 9.0),
    };
    let mut noise = Noise::new(seed);
    for pixel in pixmap.data_mut().chunks_exact_mut(4) {
        let delta = noise.next_signed() * amplitude;
        for channel in &mut pixel[0..3] {
            *channel = (*channel as f32 + delta).clamp(0.0, 255.0) as u8;
        }
    }
}

/// Radial darkening toward the corners. Scales the color channels only, so
/// the premultiplied invariant (channel <= alpha) is preserved.
fn apply_vignette(pixmap: &mut Pixmap) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let cx = width / 2.0;
    let cy = height / 2.0;

    let data = pixmap.data_mut();
    for y in 0..height as usize {
        let dy = (y as f32 + 0.5 - cy) / cy;
        for x in 0..width as usize {
            let dx = (x as f32 + 0.5 - cx) / cx;
            // 0 at center, 1 at corners.
            let d2 = (dx * dx + dy * dy) / 2.0;
            let factor = 1.0 - 0.35 * d2 * d2;
            let offset = (y * width as usize + x) * 4;
            for channel in &mut data[offset..offset + 3] {
                *channel = (*channel as f32 * factor) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::BackgroundSpec;

    fn curve_plan() -> RenderPlan {
        let mut plan = RenderPlan::new(BackgroundSpec::plain(Rgba::opaque(255, 255, 255)));
        plan.push(Primitive::new(
            Shape::Curve {
                points: vec![Point::new(0.0, 0.2), Point::new(1.0, 0.8)],
                width: 2.0,
                dashed: false,
            },
            Rgba::opaque(255, 0, 0),
        ));
        plan
    }

    fn cfg(format: OutputFormat) -> RenderConfig {
        RenderConfig {
            output_format: format,
            width: 200,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_png_output_signature() {
        let out = composite(&curve_plan(), &cfg(OutputFormat::Png)).unwrap();
        assert_eq!(&out.bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        assert_eq!(out.width, 200);
        assert_eq!(out.height, 124);
    }

    #[test]
    fn test_svg_and_pdf_headers() {
        let svg = composite(&curve_plan(), &cfg(OutputFormat::Svg)).unwrap();
        assert!(svg.bytes.starts_with(b"<svg"));

        let pdf = composite(&curve_plan(), &cfg(OutputFormat::Pdf)).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn test_stipple_rejected_for_pdf_before_drawing() {
        let mut plan = curve_plan();
        plan.push(Primitive::new(
            Shape::Stipple {
                dots: vec![Point::new(0.5, 0.5)],
                radius: 1.0,
            },
            Rgba::opaque(0, 0, 0),
        ));
        let err = composite(&plan, &cfg(OutputFormat::Pdf)).unwrap_err();
        match err {
            HistoError::RenderError(msg) => {
                assert!(msg.contains("stipple"));
                assert!(msg.contains("pdf"));
            }
            other => panic!("expected RenderError, got {other:?}"),
        }
    }

    #[test]
    fn test_transparent_raster_background() {
        let plan = RenderPlan::new(BackgroundSpec::transparent());
        let out = composite(&plan, &cfg(OutputFormat::Png)).unwrap();
        assert_eq!(&out.bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
