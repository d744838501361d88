//! SVG serialization: the vector twin of the raster path, walking the same
//! primitive model and emitting path descriptions instead of pixels.

use std::fmt::Write;

use histo_common::{HistoResult, Rgba};

use crate::canvas::Layout;
use crate::plan::{BlendMode, Point, Primitive, RenderPlan, Shape};

/// Serialize a plan to an SVG document at the layout's pixel size.
pub fn serialize(plan: &RenderPlan, layout: &Layout) -> HistoResult<Vec<u8>> {
    let (w, h) = (layout.width, layout.height);
    let mut out = String::with_capacity(16 * 1024);

    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
    );

    if let Some(fill) = plan.background.fill {
        let _ = write!(
            out,
            "  <rect width=\"{w}\" height=\"{h}\" fill=\"{}\"{}/>\n",
            hex(fill),
            fill_opacity_attr(fill, 1.0)
        );
    }

    for primitive in &plan.primitives {
        write_primitive(&mut out, primitive, layout);
    }

    if plan.background.vignette {
        // Vector approximation of the radial vignette: a wide dark inner
        // stroke hugging the border.
        let inset = (w.min(h) as f32) * 0.04;
        let stroke_w = (w.min(h) as f32) * 0.09;
        let _ = write!(
            out,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#000000\" stroke-opacity=\"0.18\" stroke-width=\"{:.1}\"/>\n",
            inset,
            inset,
            w as f32 - 2.0 * inset,
            h as f32 - 2.0 * inset,
            stroke_w
        );
    }

    out.push_str("</svg>\n");
    Ok(out.into_bytes())
}

fn write_primitive(out: &mut String, primitive: &Primitive, layout: &Layout) {
    let color = hex(primitive.color);
    let alpha = primitive.color.a as f32 / 255.0 * primitive.opacity;
    let blend = blend_style(primitive.blend);
    let scale = layout.stroke_scale();

    match &primitive.shape {
        Shape::Curve {
            points,
            width,
            dashed,
        } => {
            let dash = if *dashed {
                format!(" stroke-dasharray=\"{:.1} {:.1}\"", 8.0 * scale, 6.0 * scale)
            } else {
                String::new()
            };
            let _ = write!(
                out,
                "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{:.3}\" stroke-width=\"{:.2}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"{}{}/>\n",
                path_data(points, layout),
                color,
                alpha,
                width * scale,
                dash,
                blend
            );
        }
        Shape::Area { points } => {
            let _ = write!(
                out,
                "  <path d=\"{} Z\" fill=\"{}\" fill-opacity=\"{:.3}\"{}/>\n",
                path_data(points, layout),
                color,
                alpha,
                blend
            );
        }
        Shape::Bar { x, width, height } => {
            let (px, py) = layout.map(Point::new(*x, *height));
            let (px2, base_y) = layout.map(Point::new(*x + *width, 0.0));
            let _ = write!(
                out,
                "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"{:.3}\"{}/>\n",
                px,
                py,
                px2 - px,
                base_y - py,
                color,
                alpha,
                blend
            );
        }
        Shape::Stipple { dots, radius } => {
            let _ = write!(
                out,
                "  <g fill=\"{}\" fill-opacity=\"{:.3}\"{}>\n",
                color, alpha, blend
            );
            for dot in dots {
                let (cx, cy) = layout.map(*dot);
                let _ = write!(
                    out,
                    "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>\n",
                    cx,
                    cy,
                    radius * scale
                );
            }
            out.push_str("  </g>\n");
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
            let dash = if *dashed {
                format!(" stroke-dasharray=\"{:.1} {:.1}\"", 8.0 * scale, 6.0 * scale)
            } else {
                String::new()
            };
            let _ = write!(
                out,
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-opacity=\"{:.3}\" stroke-width=\"{:.2}\"{}/>\n",
                start.0,
                start.1,
                end.0,
                end.1,
                color,
                alpha,
                1.0 * scale.max(1.0),
                dash
            );
        }
    }
}

fn path_data(points: &[Point], layout: &Layout) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, point) in points.iter().enumerate() {
        let (x, y) = layout.map(*point);
        let _ = write!(d, "{}{:.2} {:.2}", if i == 0 { "M" } else { " L" }, x, y);
    }
    d
}

fn hex(color: Rgba) -> String {
    color.rgb().to_hex()
}

fn fill_opacity_attr(color: Rgba, opacity: f32) -> String {
    let alpha = color.a as f32 / 255.0 * opacity;
    if alpha < 1.0 {
        format!(" fill-opacity=\"{:.3}\"", alpha)
    } else {
        String::new()
    }
}

/// Additive blending approximated with `screen`; close enough for glow
/// stacks and universally supported, unlike `plus-lighter`.
fn blend_style(blend: BlendMode) -> &'static str {
    match blend {
        BlendMode::SourceOver => "",
        BlendMode::Additive => " style=\"mix-blend-mode:screen\"",
    }
}
