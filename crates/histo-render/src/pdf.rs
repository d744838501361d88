//! Minimal PDF serialization.
//!
//! Emits a single-page document whose content stream walks the shared
//! primitive model with native path operators. Constant alpha goes through
//! ExtGState entries; additive blending is not expressible without
//! transparency groups, so additive primitives draw with plain alpha.
//! Stipple fields are rejected up front by the compositor's pre-scan.

use std::collections::BTreeMap;
use std::fmt::Write;

use histo_common::{HistoError, HistoResult, Rgba};

use crate::canvas::Layout;
use crate::plan::{Point, Primitive, RenderPlan, Shape};

/// Serialize a plan to a single-page PDF at the layout's pixel size
/// (one pixel = one PDF unit).
pub fn serialize(plan: &RenderPlan, layout: &Layout) -> HistoResult<Vec<u8>> {
    let alphas = collect_alphas(plan);
    let content = content_stream(plan, layout, &alphas)?;

    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push("<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string());

    let mut gs_dict = String::new();
    for (index, _) in alphas.values().enumerate() {
        let _ = write!(gs_dict, "/GS{} {} 0 R ", index, 5 + index);
    }
    objects.push(format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /ExtGState << {}>> >> /Contents 4 0 R >>",
        layout.width, layout.height, gs_dict
    ));
    objects.push(format!(
        "<< /Length {} >>\nstream\n{}\nendstream",
        content.len(),
        content
    ));
    for alpha in alphas.keys() {
        let a = *alpha as f32 / 255.0;
        objects.push(format!(
            "<< /Type /ExtGState /CA {:.3} /ca {:.3} >>",
            a, a
        ));
    }

    Ok(assemble(&objects))
}

/// Alpha byte of the vignette border stroke.
const VIGNETTE_ALPHA: u8 = 46;

/// Unique effective alpha bytes mapped to their ExtGState index.
fn collect_alphas(plan: &RenderPlan) -> BTreeMap<u8, usize> {
    let mut alphas: BTreeMap<u8, usize> = BTreeMap::new();
    alphas.insert(255, 0);
    if plan.background.vignette {
        alphas.insert(VIGNETTE_ALPHA, 0);
    }
    for primitive in &plan.primitives {
        alphas.insert(primitive.effective_alpha(), 0);
    }
    let keys: Vec<u8> = alphas.keys().copied().collect();
    for (index, key) in keys.into_iter().enumerate() {
        alphas.insert(key, index);
    }
    alphas
}

fn content_stream(
    plan: &RenderPlan,
    layout: &Layout,
    alphas: &BTreeMap<u8, usize>,
) -> HistoResult<String> {
    let mut ops = String::with_capacity(8 * 1024);
    let scale = layout.stroke_scale();

    if let Some(fill) = plan.background.fill {
        let _ = writeln!(ops, "q /GS{} gs {} rg", alphas[&255], rgb(fill));
        let _ = writeln!(
            ops,
            "0 0 {} {} re f Q",
            layout.width, layout.height
        );
    }

    for primitive in &plan.primitives {
        write_primitive(&mut ops, primitive, layout, alphas, scale)?;
    }

    if plan.background.vignette {
        // Same border approximation the SVG backend uses.
        let inset = (layout.width.min(layout.height) as f32) * 0.04;
        let stroke_w = (layout.width.min(layout.height) as f32) * 0.09;
        let gs = alphas[&VIGNETTE_ALPHA];
        let _ = writeln!(ops, "q /GS{} gs 0 0 0 RG {:.2} w", gs, stroke_w);
        let _ = writeln!(
            ops,
            "{:.2} {:.2} {:.2} {:.2} re S Q",
            inset,
            inset,
            layout.width as f32 - 2.0 * inset,
            layout.height as f32 - 2.0 * inset
        );
    }

    Ok(ops)
}

fn write_primitive(
    ops: &mut String,
    primitive: &Primitive,
    layout: &Layout,
    alphas: &BTreeMap<u8, usize>,
    scale: f32,
) -> HistoResult<()> {
    let gs = alphas[&primitive.effective_alpha()];

    match &primitive.shape {
        Shape::Curve {
            points,
            width,
            dashed,
        } => {
            let _ = writeln!(
                ops,
                "q /GS{} gs {} RG {:.2} w 1 J 1 j",
                gs,
                rgb(primitive.color),
                width * scale
            );
            if *dashed {
                let _ = writeln!(ops, "[{:.1} {:.1}] 0 d", 8.0 * scale, 6.0 * scale);
            }
            write_polyline(ops, points, layout);
            let _ = writeln!(ops, "S Q");
        }
        Shape::Area { points } => {
            let _ = writeln!(ops, "q /GS{} gs {} rg", gs, rgb(primitive.color));
            write_polyline(ops, points, layout);
            let _ = writeln!(ops, "h f Q");
        }
        Shape::Bar { x, width, height } => {
            let (px, py) = layout.map_y_up(Point::new(*x, 0.0));
            let (px2, py2) = layout.map_y_up(Point::new(*x + *width, *height));
            let _ = writeln!(ops, "q /GS{} gs {} rg", gs, rgb(primitive.color));
            let _ = writeln!(
                ops,
                "{:.2} {:.2} {:.2} {:.2} re f Q",
                px,
                py,
                px2 - px,
                py2 - py
            );
        }
        Shape::Stipple { .. } => {
            // The compositor's pre-scan rejects these before serialization;
            // this arm is a backstop for direct callers.
            return Err(HistoError::RenderError(
                "stipple primitives are not supported in pdf output".to_string(),
            ));
        }
        Shape::GridLine {
            horizontal,
            position,
            dashed,
        } => {
            let (start, end) = if *horizontal {
                (
                    layout.map_y_up(Point::new(0.0, *position)),
                    layout.map_y_up(Point::new(1.0, *position)),
                )
            } else {
                (
                    layout.map_y_up(Point::new(*position, 0.0)),
                    layout.map_y_up(Point::new(*position, 1.0)),
                )
            };
            let _ = writeln!(
                ops,
                "q /GS{} gs {} RG {:.2} w",
                gs,
                rgb(primitive.color),
                scale.max(1.0)
            );
            if *dashed {
                let _ = writeln!(ops, "[{:.1} {:.1}] 0 d", 8.0 * scale, 6.0 * scale);
            }
            let _ = writeln!(
                ops,
                "{:.2} {:.2} m {:.2} {:.2} l S Q",
                start.0, start.1, end.0, end.1
            );
        }
    }
    Ok(())
}

fn write_polyline(ops: &mut String, points: &[Point], layout: &Layout) {
    for (i, point) in points.iter().enumerate() {
        let (x, y) = layout.map_y_up(*point);
        let _ = writeln!(ops, "{:.2} {:.2} {}", x, y, if i == 0 { "m" } else { "l" });
    }
}

fn rgb(color: Rgba) -> String {
    format!(
        "{:.3} {:.3} {:.3}",
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0
    )
}

/// Lay out numbered objects, the xref table, and the trailer.
fn assemble(objects: &[String]) -> Vec<u8> {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str("%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, body);
    }

    let xref_start = out.len();
    let _ = write!(out, "xref\n0 {}\n", objects.len() + 1);
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_start
    );
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::BackgroundSpec;

    #[test]
    fn test_document_structure() {
        let mut plan = RenderPlan::new(BackgroundSpec::plain(Rgba::opaque(255, 255, 255)));
        plan.push(
            Primitive::new(
                Shape::Curve {
                    points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
                    width: 2.0,
                    dashed: false,
                },
                Rgba::opaque(0, 0, 255),
            )
            .opacity(0.5),
        );

        let pdf = serialize(&plan, &Layout::golden(600)).unwrap();
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/MediaBox [0 0 600 371]"));
        assert!(text.contains("/ExtGState"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_stipple_rejected() {
        let mut plan = RenderPlan::new(BackgroundSpec::transparent());
        plan.push(Primitive::new(
            Shape::Stipple {
                dots: vec![Point::new(0.5, 0.5)],
                radius: 1.0,
            },
            Rgba::opaque(0, 0, 0),
        ));
        assert!(matches!(
            serialize(&plan, &Layout::golden(100)),
            Err(HistoError::RenderError(_))
        ));
    }
}
