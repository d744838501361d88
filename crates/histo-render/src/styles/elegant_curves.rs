//! Smooth curves with subtle vertical gradients on a clean background.

use histo_common::{HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::interp::{bin_points, catmull_rom};
use super::{channels, gradient_fill, grid_primitives, resolve_background, Style, DARK_BACKGROUND};
use crate::plan::{BlendMode, Channel, Primitive, RenderPlan, Shape};

/// Deep-to-vivid gradient pairs per channel.
const PALETTE: [(Rgba, Rgba); 3] = [
    (Rgba::opaque(0x4A, 0x00, 0x00), Rgba::opaque(0xFF, 0x33, 0x33)), // burgundy -> scarlet
    (Rgba::opaque(0x00, 0x4A, 0x00), Rgba::opaque(0x33, 0xFF, 0x33)), // forest -> lime
    (Rgba::opaque(0x00, 0x00, 0x4A), Rgba::opaque(0x33, 0x33, 0xFF)), // navy -> azure
];

const GRADIENT_LAYERS: usize = 16;
const SPLINE_SAMPLES: usize = 6;

/// Bezier-smoothed curves, gradient fills dark to vibrant, additive
/// blending where channels overlap.
pub struct ElegantCurves;

impl Style for ElegantCurves {
    fn name(&self) -> &'static str {
        "elegant_curves"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let mut plan = RenderPlan::new(resolve_background(
            cfg,
            data,
            Rgba::opaque(255, 255, 255),
            DARK_BACKGROUND,
        ));

        if cfg.show_grid {
            plan.extend(grid_primitives(Rgba::opaque(180, 180, 180), 0.35, false));
        }

        for (channel, values) in channels(data) {
            let curve = catmull_rom(&bin_points(values), SPLINE_SAMPLES);
            let (dark, light) = palette(channel);

            gradient_fill(
                &mut plan,
                channel,
                &curve,
                dark,
                light,
                0.6,
                GRADIENT_LAYERS,
                BlendMode::Additive,
            );

            // Subtle outline over the fill.
            plan.push(
                Primitive::new(
                    Shape::Curve {
                        points: curve,
                        width: 1.5,
                        dashed: false,
                    },
                    light,
                )
                .channel(channel)
                .opacity(0.8)
                .blend(BlendMode::Additive),
            );
        }

        Ok(plan)
    }
}

fn palette(channel: Channel) -> (Rgba, Rgba) {
    match channel {
        Channel::Red => PALETTE[0],
        Channel::Green => PALETTE[1],
        Channel::Blue => PALETTE[2],
    }
}
