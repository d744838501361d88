//! Luminous neon channels over a dark background.

use histo_common::{HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::interp::{bin_points, catmull_rom};
use super::{channels, grid_primitives, resolve_background, Style, DARK_BACKGROUND};
use crate::plan::{BlendMode, Channel, Primitive, RenderPlan, Shape};

const NEON_RED: Rgba = Rgba::opaque(0xFF, 0x00, 0x40);
const NEON_GREEN: Rgba = Rgba::opaque(0x00, 0xFF, 0x80);
const NEON_BLUE: Rgba = Rgba::opaque(0x00, 0x80, 0xFF);

/// Stacked strokes, widest and faintest first, building the bloom.
const GLOW_LAYERS: [(f32, f32); 5] = [(20.0, 0.05), (15.0, 0.08), (10.0, 0.12), (6.0, 0.18), (3.0, 0.3)];

/// Bold glowing curves: layered wide strokes for bloom, additive blending,
/// faint fills underneath.
pub struct NeonGlow;

impl Style for NeonGlow {
    fn name(&self) -> &'static str {
        "neon_glow"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let mut plan = RenderPlan::new(resolve_background(
            cfg,
            data,
            Rgba::opaque(240, 240, 245),
            DARK_BACKGROUND,
        ));

        if cfg.show_grid {
            plan.extend(grid_primitives(Rgba::opaque(90, 90, 120), 0.4, false));
        }

        let curves: Vec<(Channel, Vec<_>)> = channels(data)
            .into_iter()
            .map(|(ch, values)| (ch, catmull_rom(&bin_points(values), 6)))
            .collect();

        // Faint fill under each curve first, so the glow sits on top.
        for (channel, curve) in &curves {
            plan.push(
                Primitive::new(super::area_under(curve, 1.0), neon(*channel))
                    .channel(*channel)
                    .opacity(0.15)
                    .blend(BlendMode::Additive),
            );
        }

        // Glow passes.
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

        // Crisp core lines on top.
        for (channel, curve) in curves {
            plan.push(
                Primitive::new(
                    Shape::Curve {
                        points: curve,
                        width: 2.0,
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

fn neon(channel: Channel) -> Rgba {
    match channel {
        Channel::Red => NEON_RED,
        Channel::Green => NEON_GREEN,
        Channel::Blue => NEON_BLUE,
    }
}
