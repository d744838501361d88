//! Ultra-clean thin lines, pure RGB, nothing else.

use histo_common::{HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::interp::bin_points;
use super::{channels, grid_primitives, resolve_background, Style, DARK_BACKGROUND};
use crate::plan::{Channel, Primitive, RenderPlan, Shape};

/// Linear interpolation between bin midpoints, one clean stroke per
/// channel. The quiet baseline the other styles are measured against.
pub struct Minimal;

impl Style for Minimal {
    fn name(&self) -> &'static str {
        "minimal"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let mut plan = RenderPlan::new(resolve_background(
            cfg,
            data,
            Rgba::opaque(255, 255, 255),
            DARK_BACKGROUND,
        ));

        if cfg.show_grid {
            plan.extend(grid_primitives(Rgba::opaque(200, 200, 200), 0.5, false));
        }

        for (channel, values) in channels(data) {
            plan.push(
                Primitive::new(
                    Shape::Curve {
                        points: bin_points(values),
                        width: 3.5,
                        dashed: false,
                    },
                    pure(channel),
                )
                .channel(channel)
                .opacity(0.9),
            );
        }

        Ok(plan)
    }
}

fn pure(channel: Channel) -> Rgba {
    match channel {
        Channel::Red => Rgba::opaque(255, 0, 0),
        Channel::Green => Rgba::opaque(0, 255, 0),
        Channel::Blue => Rgba::opaque(0, 0, 255),
    }
}
