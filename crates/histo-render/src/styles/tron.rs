//! Glowing neon curves over black, with a dashed cyan frame and grid.

use histo_common::{HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::interp::{bin_points, catmull_rom};
use super::{area_under, channels, grid_primitives, resolve_background, Style};
use crate::plan::{BlendMode, Channel, Point, Primitive, RenderPlan, Shape};

const BLACK: Rgba = Rgba::opaque(0, 0, 0);
const CYAN: Rgba = Rgba::opaque(0, 255, 255);
const WHITE: Rgba = Rgba::opaque(255, 255, 255);

const NEON_RED: Rgba = Rgba::opaque(0xFF, 0x00, 0x00);
const NEON_GREEN: Rgba = Rgba::opaque(0x00, 0xFF, 0x00);
const NEON_BLUE: Rgba = Rgba::opaque(0x00, 0x66, 0xFF);

/// Deeper glow stack than neon_glow; the look is harder-edged.
const GLOW_LAYERS: [(f32, f32); 7] = [
    (30.0, 0.03),
    (24.0, 0.05),
    (18.0, 0.08),
    (12.0, 0.12),
    (8.0, 0.18),
    (5.0, 0.25),
    (3.0, 0.4),
];

/// Neon curves with white cores on pure black; grid lines sit behind an
/// opaque under-curve mask so they never cross the histogram body.
pub struct Tron;

impl Style for Tron {
    fn name(&self) -> &'static str {
        "tron"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let background = resolve_background(cfg, data, Rgba::opaque(245, 245, 245), BLACK);
        let mut plan = RenderPlan::new(background);

        if cfg.show_grid {
            plan.extend(grid_primitives(CYAN, 0.5, true));
        }

        let curves: Vec<(Channel, Vec<Point>)> = channels(data)
            .into_iter()
            .map(|(ch, values)| (ch, catmull_rom(&bin_points(values), 6)))
            .collect();

        // Opaque mask under the combined maximum hides grid lines behind
        // the histogram body. Skipped when there is no fill to mask with.
        if let Some(fill) = plan.background.fill {
            let combined: Vec<Point> = combined_max(&curves);
            plan.push(Primitive::new(area_under(&combined, 1.0), fill));
        }

        // Dashed border frame, drawn over the mask like the grid style.
        plan.push(
            Primitive::new(
                Shape::Curve {
                    points: vec![
                        Point::new(0.0, 0.0),
                        Point::new(1.0, 0.0),
                        Point::new(1.0, 1.0),
                        Point::new(0.0, 1.0),
                        Point::new(0.0, 0.0),
                    ],
                    width: 1.5,
                    dashed: true,
                },
                CYAN,
            )
            .opacity(0.8),
        );

        for &(width, opacity) in &GLOW_LAYERS {
            for (channel, curve) in &curves {
                plan.push(
                    Primitive::new(
                        Shape::Curve {
                            points: curve.clone(),
                            width,
                            dashed: false,
                        },
                        neon(*channel),
                    )
                    .channel(*channel)
                    .opacity(opacity)
                    .blend(BlendMode::Additive),
                );
            }
        }

        // White cores under the final saturated strokes.
        for (channel, curve) in &curves {
            plan.push(
                Primitive::new(
                    Shape::Curve {
                        points: curve.clone(),
                        width: 1.5,
                        dashed: false,
                    },
                    WHITE,
                )
                .channel(*channel)
                .opacity(0.6)
                .blend(BlendMode::Additive),
            );
        }
        for (channel, curve) in curves {
            plan.push(
                Primitive::new(
                    Shape::Curve {
                        points: curve,
                        width: 2.5,
                        dashed: false,
                    },
                    neon(channel),
                )
                .channel(channel)
                .blend(BlendMode::Additive),
            );
        }

        Ok(plan)
    }
}

/// Pointwise maximum of the three channel curves.
fn combined_max(curves: &[(Channel, Vec<Point>)]) -> Vec<Point> {
    let longest = curves
        .iter()
        .map(|(_, c)| c.len())
        .max()
        .unwrap_or(0);
    (0..longest)
        .map(|i| {
            let x = curves
                .iter()
                .filter_map(|(_, c)| c.get(i))
                .map(|p| p.x)
                .next()
                .unwrap_or(0.0);
            let y = curves
                .iter()
                .filter_map(|(_, c)| c.get(i))
                .map(|p| p.y)
                .fold(0.0f32, f32::max);
            Point::new(x, y)
        })
        .collect()
}

fn neon(channel: Channel) -> Rgba {
    match channel {
        Channel::Red => NEON_RED,
        Channel::Green => NEON_GREEN,
        Channel::Blue => NEON_BLUE,
    }
}
