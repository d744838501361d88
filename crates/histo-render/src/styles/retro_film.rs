//! Faded analog-film look: muted palette, channel mis-registration, grain
//! and a vignette.

use histo_common::{BackgroundMode, HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::interp::{bin_points, catmull_rom};
use super::{area_under, channels, grid_primitives, resolve_background, Style};
use crate::plan::{Channel, Point, Primitive, RenderPlan, Shape, Texture};

const FADED_CREAM: Rgba = Rgba::opaque(0xEF, 0xE6, 0xD8);
const FADED_DARK: Rgba = Rgba::opaque(0x20, 0x1A, 0x18);

const MUTED_RED: Rgba = Rgba::opaque(0xC4, 0x6A, 0x6A);
const MUTED_GREEN: Rgba = Rgba::opaque(0x7F, 0xA8, 0x7F);
const MUTED_BLUE: Rgba = Rgba::opaque(0x6A, 0x7F, 0xB5);

/// Horizontal offset per channel, emulating mis-registered emulsion layers.
const MISREGISTRATION: f32 = 0.004;

/// Muted curves with slight per-channel offset; the background always
/// carries film grain and a vignette pass.
pub struct RetroFilm;

impl Style for RetroFilm {
    fn name(&self) -> &'static str {
        "retro_film"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let mut background = resolve_background(cfg, data, FADED_CREAM, FADED_DARK);
        // Film identity: grain and vignette regardless of fill mode, except
        // fully transparent output where there is nothing to texture.
        if cfg.background != BackgroundMode::Transparent {
            background = background.with_texture(Texture::Grain).with_vignette();
        }
        let mut plan = RenderPlan::new(background);

        if cfg.show_grid {
            plan.extend(grid_primitives(Rgba::opaque(140, 130, 115), 0.35, false));
        }

        for (channel, values) in channels(data) {
            let offset = registration_offset(channel);
            let curve: Vec<Point> = catmull_rom(&bin_points(values), 6)
                .into_iter()
                .map(|p| Point::new((p.x + offset).clamp(0.0, 1.0), p.y))
                .collect();
            let color = muted(channel);

            plan.push(
                Primitive::new(area_under(&curve, 1.0), color)
                    .channel(channel)
                    .opacity(0.25),
            );
            plan.push(
                Primitive::new(
                    Shape::Curve {
                        points: curve,
                        width: 2.0,
                        dashed: false,
                    },
                    color,
                )
                .channel(channel)
                .opacity(0.85),
            );
        }

        Ok(plan)
    }
}

fn registration_offset(channel: Channel) -> f32 {
    match channel {
        Channel::Red => -MISREGISTRATION,
        Channel::Green => 0.0,
        Channel::Blue => MISREGISTRATION,
    }
}

fn muted(channel: Channel) -> Rgba {
    match channel {
        Channel::Red => MUTED_RED,
        Channel::Green => MUTED_GREEN,
        Channel::Blue => MUTED_BLUE,
    }
}
