//! Classic RGB curves with stippled fills, screen-print friendly.

use histo_common::{HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::interp::{bin_points, catmull_rom, Noise};
use super::{channels, grid_primitives, resolve_background, Style, DARK_BACKGROUND};
use crate::plan::{Channel, Point, Primitive, RenderPlan, Shape};

/// Softened palette matched to the screen-print reference.
const SOFT_RED: Rgba = Rgba::opaque(0xE8, 0x5A, 0x5A);
const SOFT_GREEN: Rgba = Rgba::opaque(0x4A, 0xE8, 0x8A);
const SOFT_BLUE: Rgba = Rgba::opaque(0x5A, 0x7A, 0xBF);

const LINE_WIDTH: f32 = 2.5;

/// Horizontal dot pitch of the stipple field.
const STIPPLE_COLUMNS: usize = 96;
const STIPPLE_ROWS: usize = 56;
const DOT_RADIUS: f32 = 1.4;

/// Thick solid outlines over dotted under-curve fills; the stipple pattern
/// reads like a halftone at print scale.
pub struct Original;

impl Style for Original {
    fn name(&self) -> &'static str {
        "original"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let mut plan = RenderPlan::new(resolve_background(
            cfg,
            data,
            Rgba::opaque(255, 255, 255),
            DARK_BACKGROUND,
        ));

        if cfg.show_grid {
            plan.extend(grid_primitives(Rgba::opaque(190, 190, 190), 0.4, false));
        }

        for (seed, (channel, values)) in channels(data).into_iter().enumerate() {
            let curve = catmull_rom(&bin_points(values), 6);
            let color = soft(channel);

            plan.push(
                Primitive::new(
                    Shape::Stipple {
                        dots: stipple_under(&curve, seed as u64),
                        radius: DOT_RADIUS,
                    },
                    color,
                )
                .channel(channel)
                .opacity(0.85),
            );
            plan.push(
                Primitive::new(
                    Shape::Curve {
                        points: curve,
                        width: LINE_WIDTH,
                        dashed: false,
                    },
                    color,
                )
                .channel(channel),
            );
        }

        Ok(plan)
    }
}

/// Regular dot lattice clipped to the region under the curve, with a small
/// deterministic jitter so rows do not band.
fn stipple_under(curve: &[Point], seed: u64) -> Vec<Point> {
    let mut noise = Noise::new(0xD07 ^ seed);
    let mut dots = Vec::new();

    for col in 0..STIPPLE_COLUMNS {
        let x = (col as f32 + 0.5) / STIPPLE_COLUMNS as f32;
        let ceiling = height_at(curve, x);
        for row in 0..STIPPLE_ROWS {
            let y = (row as f32 + 0.5) / STIPPLE_ROWS as f32;
            if y >= ceiling {
                break;
            }
            let jx = x + noise.next_signed() * 0.002;
            let jy = y + noise.next_signed() * 0.002;
            dots.push(Point::new(jx.clamp(0.0, 1.0), jy.clamp(0.0, 1.0)));
        }
    }
    dots
}

/// Curve height at `x` by linear interpolation between samples.
fn height_at(curve: &[Point], x: f32) -> f32 {
    match curve.iter().position(|p| p.x >= x) {
        Some(0) => curve[0].y,
        Some(i) => {
            let a = curve[i - 1];
            let b = curve[i];
            let span = b.x - a.x;
            if span <= f32::EPSILON {
                b.y
            } else {
                let t = (x - a.x) / span;
                a.y + (b.y - a.y) * t
            }
        }
        None => curve.last().map(|p| p.y).unwrap_or(0.0),
    }
}

fn soft(channel: Channel) -> Rgba {
    match channel {
        Channel::Red => SOFT_RED,
        Channel::Green => SOFT_GREEN,
        Channel::Blue => SOFT_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_at_interpolates() {
        let curve = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!((height_at(&curve, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(height_at(&curve, 0.0), 0.0);
    }

    #[test]
    fn test_stipple_stays_under_curve() {
        let curve = vec![Point::new(0.0, 0.5), Point::new(1.0, 0.5)];
        let dots = stipple_under(&curve, 0);
        assert!(!dots.is_empty());
        for dot in dots {
            assert!(dot.y < 0.52, "dot escaped the fill region: {:?}", dot);
        }
    }
}
