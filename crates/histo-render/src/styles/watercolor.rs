//! Soft organic fills mimicking watercolor paint bleeding on paper.

use histo_common::{HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::interp::{bin_points, catmull_rom, Noise};
use super::{channels, gradient_fill, grid_primitives, resolve_background, Style};
use crate::plan::{BlendMode, Channel, Point, RenderPlan};

const PAPER: Rgba = Rgba::opaque(0xF5, 0xF5, 0xDC);
const DARK_PAPER: Rgba = Rgba::opaque(0x2B, 0x26, 0x1E);

const PALETTE: [(Rgba, Rgba); 3] = [
    (Rgba::opaque(0x8B, 0x00, 0x00), Rgba::opaque(0xDC, 0x14, 0x3C)), // dark red -> crimson
    (Rgba::opaque(0x00, 0x64, 0x00), Rgba::opaque(0x32, 0xCD, 0x32)), // dark green -> lime
    (Rgba::opaque(0x00, 0x00, 0x8B), Rgba::opaque(0x41, 0x69, 0xE1)), // dark blue -> royal
];

/// Fixed seed keeps the bleed identical for identical input.
const EDGE_SEED: u64 = 42;

/// Edge jitter amplitude relative to the curve height.
const EDGE_AMPLITUDE: f32 = 0.05;

/// Irregular paint-bleed edges and layered translucent fills; no outlines,
/// plain alpha blending where colors pool.
pub struct Watercolor;

impl Style for Watercolor {
    fn name(&self) -> &'static str {
        "watercolor"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let background = resolve_background(cfg, data, PAPER, DARK_PAPER);
        let mut plan = RenderPlan::new(background);

        if cfg.show_grid {
            plan.extend(grid_primitives(Rgba::opaque(160, 150, 120), 0.3, false));
        }

        for (seed_offset, (channel, values)) in channels(data).into_iter().enumerate() {
            let curve = catmull_rom(&bin_points(values), 6);
            let bled = bleed_edge(&curve, EDGE_SEED + seed_offset as u64);
            let (dark, light) = palette(channel);

            gradient_fill(
                &mut plan,
                channel,
                &bled,
                dark,
                light,
                0.7,
                12,
                BlendMode::SourceOver,
            );

            // Faint darker rim where the paint pools at the top edge.
            plan.push(
                crate::plan::Primitive::new(
                    crate::plan::Shape::Curve {
                        points: bled,
                        width: 3.0,
                        dashed: false,
                    },
                    dark.lerp(&light, 0.5),
                )
                .channel(channel)
                .opacity(0.15),
            );
        }

        Ok(plan)
    }
}

/// Perturb curve heights with smoothed deterministic noise so the top edge
/// looks like paint bleeding into paper.
fn bleed_edge(points: &[Point], seed: u64) -> Vec<Point> {
    let mut noise = Noise::new(seed);
    let raw: Vec<f32> = points.iter().map(|_| noise.next_signed()).collect();

    // Box-smooth the noise so the wobble is gradual, not jagged.
    let smoothed: Vec<f32> = raw
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let lo = i.saturating_sub(3);
            let hi = (i + 4).min(raw.len());
            raw[lo..hi].iter().sum::<f32>() / (hi - lo) as f32
        })
        .collect();

    points
        .iter()
        .zip(smoothed)
        .map(|(p, n)| Point::new(p.x, (p.y + n * EDGE_AMPLITUDE * p.y).clamp(0.0, 1.0)))
        .collect()
}

fn palette(channel: Channel) -> (Rgba, Rgba) {
    match channel {
        Channel::Red => PALETTE[0],
        Channel::Green => PALETTE[1],
        Channel::Blue => PALETTE[2],
    }
}
