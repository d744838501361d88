//! Hard-edged discrete bars with flat saturated colors.

use histo_common::{HistoResult, RenderConfig, Rgba};
use histo_engine::HistogramData;

use super::{channels, grid_primitives, resolve_background, Style, DARK_BACKGROUND};
use crate::plan::{BlendMode, Channel, Primitive, RenderPlan, Shape};

const COLUMNS: usize = 48;

/// Gap between bars as a fraction of the column width.
const BAR_INSET: f32 = 0.15;

const FLAT_RED: Rgba = Rgba::opaque(0xFF, 0x33, 0x33);
const FLAT_GREEN: Rgba = Rgba::opaque(0x33, 0xFF, 0x33);
const FLAT_BLUE: Rgba = Rgba::opaque(0x33, 0x33, 0xFF);

/// Bins folded down to a fixed column count, drawn as flat bars; channel
/// overlap resolves additively into secondary colors.
pub struct Geometric;

impl Style for Geometric {
    fn name(&self) -> &'static str {
        "geometric"
    }

    fn render(&self, data: &HistogramData, cfg: &RenderConfig) -> HistoResult<RenderPlan> {
        let mut plan = RenderPlan::new(resolve_background(
            cfg,
            data,
            Rgba::opaque(250, 250, 250),
            DARK_BACKGROUND,
        ));

        if cfg.show_grid {
            plan.extend(grid_primitives(Rgba::opaque(170, 170, 170), 0.4, false));
        }

        let column_w = 1.0 / COLUMNS as f32;
        let bar_w = column_w * (1.0 - BAR_INSET);

        for (channel, values) in channels(data) {
            let color = flat(channel);
            for (i, height) in fold_columns(values, COLUMNS).into_iter().enumerate() {
                if height <= 0.0 {
                    continue;
                }
                plan.push(
                    Primitive::new(
                        Shape::Bar {
                            x: i as f32 * column_w + column_w * BAR_INSET * 0.5,
                            width: bar_w,
                            height,
                        },
                        color,
                    )
                    .channel(channel)
                    .opacity(0.7)
                    .blend(BlendMode::Additive),
                );
            }
        }

        Ok(plan)
    }
}

/// Fold bins into `columns` buckets, keeping each bucket's peak so narrow
/// spikes stay visible.
fn fold_columns(values: &[f32], columns: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; columns];
    let n = values.len().max(1);
    for (i, &v) in values.iter().enumerate() {
        let col = (i * columns / n).min(columns - 1);
        out[col] = out[col].max(v);
    }
    out
}

fn flat(channel: Channel) -> Rgba {
    match channel {
        Channel::Red => FLAT_RED,
        Channel::Green => FLAT_GREEN,
        Channel::Blue => FLAT_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_columns_keeps_peaks() {
        let mut values = vec![0.0f32; 256];
        values[255] = 1.0;
        let folded = fold_columns(&values, 48);
        assert_eq!(folded.len(), 48);
        assert_eq!(folded[47], 1.0);
        assert!(folded[..47].iter().all(|&v| v == 0.0));
    }
}
